//! Command descriptors.
//!
//! A descriptor carries the metadata shown in help and autocomplete plus a
//! handler. The handler variant fixes the arity and parameter types, so the
//! dispatcher can coerce string tokens before invoking it.

use super::handlers::CommandContext;
use std::fmt;

/// Handler taking no parameters.
pub type NoArgsFn = Box<dyn Fn(&mut CommandContext<'_>) + Send + Sync>;
/// Handler taking one integer parameter.
pub type IntFn = Box<dyn Fn(&mut CommandContext<'_>, i32) + Send + Sync>;
/// Handler taking a string followed by an integer.
pub type TextIntFn = Box<dyn Fn(&mut CommandContext<'_>, &str, i32) + Send + Sync>;

/// Type of a command parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    /// Signed 32-bit integer.
    Int,
    /// Any token.
    Text,
}

/// Typed handler of a command.
pub enum CommandHandler {
    NoArgs(NoArgsFn),
    Int(IntFn),
    TextInt(TextIntFn),
}

impl CommandHandler {
    /// Parameter types, in order.
    pub fn params(&self) -> &'static [ParamKind] {
        match self {
            Self::NoArgs(_) => &[],
            Self::Int(_) => &[ParamKind::Int],
            Self::TextInt(_) => &[ParamKind::Text, ParamKind::Int],
        }
    }

    /// Number of parameters.
    pub fn arity(&self) -> usize {
        self.params().len()
    }
}

impl fmt::Debug for CommandHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let variant = match self {
            Self::NoArgs(_) => "NoArgs",
            Self::Int(_) => "Int",
            Self::TextInt(_) => "TextInt",
        };
        write!(f, "CommandHandler::{variant}")
    }
}

/// A registered console command.
#[derive(Debug)]
pub struct CommandDescriptor {
    /// Lowercase command name.
    pub name: String,
    /// Short description shown in help.
    pub description: String,
    /// Usage format, e.g. `add_gold <amount>`.
    pub format: String,
    pub handler: CommandHandler,
}

impl CommandDescriptor {
    /// Creates a descriptor; the name is lowercased.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        format: impl Into<String>,
        handler: CommandHandler,
    ) -> Self {
        Self {
            name: name.into().to_lowercase(),
            description: description.into(),
            format: format.into(),
            handler,
        }
    }

    /// Creates a command without parameters.
    pub fn no_args<F>(name: &str, description: &str, format: &str, f: F) -> Self
    where
        F: Fn(&mut CommandContext<'_>) + Send + Sync + 'static,
    {
        Self::new(name, description, format, CommandHandler::NoArgs(Box::new(f)))
    }

    /// Creates a command with one integer parameter.
    pub fn with_int<F>(name: &str, description: &str, format: &str, f: F) -> Self
    where
        F: Fn(&mut CommandContext<'_>, i32) + Send + Sync + 'static,
    {
        Self::new(name, description, format, CommandHandler::Int(Box::new(f)))
    }

    /// Creates a command with a string and an integer parameter.
    pub fn with_text_int<F>(name: &str, description: &str, format: &str, f: F) -> Self
    where
        F: Fn(&mut CommandContext<'_>, &str, i32) + Send + Sync + 'static,
    {
        Self::new(name, description, format, CommandHandler::TextInt(Box::new(f)))
    }

    pub fn arity(&self) -> usize {
        self.handler.arity()
    }

    /// The `<format> - <description>` line used by help and autocomplete.
    pub fn help_line(&self) -> String {
        format!("{} - {}", self.format, self.description)
    }
}
