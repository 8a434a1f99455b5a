//! Debug console commands: registry, parsing and dispatch.
//!
//! Parsing is separated from execution so that the coercion rules can be
//! unit tested without game state.

pub mod definitions;
pub mod handlers;
pub mod help;
pub mod registry;
pub mod router;
pub mod tokenizer;

pub use definitions::{CommandDescriptor, CommandHandler, ParamKind};
pub use handlers::{builtin_registry, CommandContext};
pub use registry::CommandRegistry;
pub use router::{CommandArgs, CommandRouter, DispatchError, ParsedCommand};
