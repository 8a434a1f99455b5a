//! Skill effects.

use crate::game::catalog::{SkillData, SkillType};
use crate::game::events::{EventBus, EventPayload, UNITS_SPAWNED};
use crate::game::{GameState, Position, UnitId};
use tracing::{debug, warn};

/// Offset factor of instantiated characters relative to the source footprint.
const SPAWN_OFFSET: f32 = 0.7;

/// Applies a skill cast by `source`. Returns the unit created, if any.
///
/// Does nothing if the source unit no longer exists.
pub fn apply(
    skill: &SkillData,
    game: &mut GameState,
    events: &mut EventBus,
    source: UnitId,
) -> Option<UnitId> {
    let Some(unit) = game.unit(source) else {
        debug!(skill = %skill.code, %source, "Skill source is gone");
        return None;
    };

    match skill.skill_type {
        SkillType::InstantiateCharacter => {
            let position = Position::new(
                unit.position.x - unit.footprint.x * SPAWN_OFFSET,
                unit.position.z - unit.footprint.z * SPAWN_OFFSET,
            );
            let owner = unit.owner;

            let Some(code) = skill.unit_reference.as_deref() else {
                warn!(skill = %skill.code, "Skill has no unit reference");
                return None;
            };
            let id = game.spawn_unit(code, owner, position)?;
            if let Some(spawned) = game.unit_mut(id) {
                spawned.fov_enabled = true;
            }
            events.publish(UNITS_SPAWNED, EventPayload::Unit(id));
            debug!(skill = %skill.code, %source, %id, %position, "Character instantiated");
            Some(id)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    #[test]
    fn test_instantiate_character_next_to_source() {
        let mut game = GameState::from_config(&Config::default()).unwrap();
        let mut events = EventBus::new();
        let mut sub = events.subscribe(&[UNITS_SPAWNED]);

        let house = game
            .spawn_unit("house", 1, Position::new(10.0, 20.0))
            .unwrap();
        let skill = game.catalog.skill("train_soldier").unwrap().clone();

        let id = apply(&skill, &mut game, &mut events, house).unwrap();
        let soldier = game.unit(id).unwrap();
        assert_eq!(soldier.code, "soldier");
        assert_eq!(soldier.owner, 1);
        assert!(soldier.fov_enabled);
        assert!((soldier.position.x - (10.0 - 3.0 * 0.7)).abs() < 1e-5);
        assert!((soldier.position.z - (20.0 - 3.0 * 0.7)).abs() < 1e-5);
        assert_eq!(sub.try_next().unwrap().payload, EventPayload::Unit(id));
    }

    #[test]
    fn test_missing_source_is_noop() {
        let mut game = GameState::from_config(&Config::default()).unwrap();
        let mut events = EventBus::new();
        let skill = game.catalog.skill("train_soldier").unwrap().clone();
        let before = game.units().len();

        assert!(apply(&skill, &mut game, &mut events, UnitId(999)).is_none());
        assert_eq!(game.units().len(), before);
    }
}
