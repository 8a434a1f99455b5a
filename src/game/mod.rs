//! Game state, catalog, parameters and the named-event bus.

pub mod catalog;
pub mod events;
pub mod parameters;
pub mod sampling;
pub mod state;

pub use catalog::{Catalog, ResourceBank, ResourceKind, SkillData, SkillType, UnitData, UnitKind};
pub use events::{EventBus, EventPayload, GameEvent, Subscription};
pub use parameters::{ParameterStore, ParameterValue};
pub use state::{GameState, PlayerId, Position, Unit, UnitFormationType, UnitId};
