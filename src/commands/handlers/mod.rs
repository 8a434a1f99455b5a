//! Built-in console command handlers.
//!
//! Handlers receive a [`CommandContext`] with mutable access to the game
//! state, the event bus and the console, and report through the console log.

pub mod game;
pub mod system;

use super::definitions::CommandDescriptor;
use super::registry::CommandRegistry;
use crate::console::{ConsoleLog, DisplayState};
use crate::game::{EventBus, GameState};

/// Context provided to command handlers.
pub struct CommandContext<'a> {
    pub game: &'a mut GameState,
    pub events: &'a mut EventBus,
    /// Console overlay state.
    pub display: &'a mut DisplayState,
    /// Console log for feedback lines.
    pub log: &'a mut ConsoleLog,
}

/// Builds the registry of built-in commands, in help order.
pub fn builtin_registry() -> CommandRegistry {
    let mut registry = CommandRegistry::new();

    registry.register(CommandDescriptor::no_args(
        "toggle_fov",
        "Toggles the FOV parameter on/off.",
        "toggle_fov",
        game::toggle_fov,
    ));
    registry.register(CommandDescriptor::with_int(
        "add_gold",
        "Adds a given amount of gold to the current player.",
        "add_gold <amount>",
        game::add_gold,
    ));
    registry.register(CommandDescriptor::no_args(
        "?",
        "Lists all available debug commands.",
        "?",
        system::show_help,
    ));
    registry.register(CommandDescriptor::with_text_int(
        "spawn_units",
        "Instantiates multiple instances of a character unit (by reference code), using a Poisson disc sampling for random positioning.",
        "spawn_units <code> <amount>",
        game::spawn_units,
    ));
    registry.register(CommandDescriptor::with_int(
        "set_unit_formation_type",
        "Sets the unit formation type (by index).",
        "set_unit_formation_type <formation_index>",
        game::set_unit_formation_type,
    ));

    registry
}
