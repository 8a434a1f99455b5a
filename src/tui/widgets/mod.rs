//! TUI widgets for Skirmish.
//!
//! Contains reusable UI components.

pub mod buildings;
pub mod console;
pub mod header;
pub mod help;
pub mod input;
pub mod resources;
pub mod selection;
pub mod settings;
pub mod toast;
