//! Skirmish - debug console, skill timers and HUD for an RTS prototype.
//!
//! This library exposes the core modules for use in integration tests.

pub mod app;
pub mod cli;
pub mod commands;
pub mod config;
pub mod console;
pub mod error;
pub mod game;
pub mod hud;
pub mod logging;
pub mod skills;
pub mod tui;
