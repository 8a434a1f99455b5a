//! Error types for Skirmish.
//!
//! Defines the main error enum used throughout the application. Console
//! dispatch failures have their own type in [`crate::commands::DispatchError`]
//! because they never abort the application.

use thiserror::Error;

/// Main error type for Skirmish operations.
#[derive(Error, Debug)]
pub enum SkirmishError {
    /// Configuration errors (invalid config file, unknown catalog references, etc.)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Console command errors surfaced outside the dispatcher.
    #[error("Command error: {0}")]
    Command(String),

    /// Skill system errors (unknown skill, trigger while not ready, etc.)
    #[error("Skill error: {0}")]
    Skill(String),

    /// Internal application errors (terminal failures, unexpected states, etc.)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl SkirmishError {
    /// Creates a configuration error with the given message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Creates a command error with the given message.
    pub fn command(msg: impl Into<String>) -> Self {
        Self::Command(msg.into())
    }

    /// Creates a skill error with the given message.
    pub fn skill(msg: impl Into<String>) -> Self {
        Self::Skill(msg.into())
    }

    /// Creates an internal error with the given message.
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Returns the error category as a string for display purposes.
    pub fn category(&self) -> &'static str {
        match self {
            Self::Config(_) => "Configuration Error",
            Self::Command(_) => "Command Error",
            Self::Skill(_) => "Skill Error",
            Self::Internal(_) => "Internal Error",
        }
    }
}

/// Result type alias using SkirmishError.
pub type Result<T> = std::result::Result<T, SkirmishError>;
