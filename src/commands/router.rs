//! Command parsing and dispatch.
//!
//! Parses a console line against the registry into a typed call and invokes
//! it. Parsing is pure, so the coercion rules can be tested without game state.

use super::definitions::{CommandDescriptor, CommandHandler, IntFn, NoArgsFn, TextIntFn};
use super::handlers::CommandContext;
use super::registry::CommandRegistry;
use super::tokenizer::{parse_int, tokenize};
use thiserror::Error;
use tracing::{debug, warn};

/// Why a console line was not dispatched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DispatchError {
    /// No command with this name is registered.
    #[error("Unknown command '{name}'")]
    UnknownCommand { name: String },

    /// Fewer tokens than the command's parameters.
    #[error("Missing parameter! '{name}' expects {expected}, got {found}")]
    MissingArgument {
        name: String,
        expected: usize,
        found: usize,
    },

    /// An integer parameter did not parse.
    ///
    /// `reported` is true when the failure is surfaced to the player; the
    /// single-integer form is skipped silently.
    #[error("'{name}' requires {expected} parameter!")]
    ArgumentTypeMismatch {
        name: String,
        token: String,
        expected: &'static str,
        reported: bool,
    },
}

impl DispatchError {
    /// Whether this failure is shown in the console log.
    pub fn is_reported(&self) -> bool {
        match self {
            Self::UnknownCommand { .. } => false,
            Self::MissingArgument { .. } => true,
            Self::ArgumentTypeMismatch { reported, .. } => *reported,
        }
    }
}

/// Arguments coerced from a console line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandArgs {
    None,
    Int(i32),
    TextInt(String, i32),
}

enum BoundCall<'r> {
    NoArgs(&'r NoArgsFn),
    Int(&'r IntFn, i32),
    TextInt(&'r TextIntFn, String, i32),
}

/// A console line resolved to a command and typed arguments.
pub struct ParsedCommand<'r> {
    descriptor: &'r CommandDescriptor,
    call: BoundCall<'r>,
}

impl<'r> ParsedCommand<'r> {
    pub fn descriptor(&self) -> &'r CommandDescriptor {
        self.descriptor
    }

    pub fn name(&self) -> &'r str {
        &self.descriptor.name
    }

    pub fn args(&self) -> CommandArgs {
        match &self.call {
            BoundCall::NoArgs(_) => CommandArgs::None,
            BoundCall::Int(_, value) => CommandArgs::Int(*value),
            BoundCall::TextInt(_, text, value) => CommandArgs::TextInt(text.clone(), *value),
        }
    }

    /// Runs the handler.
    pub fn invoke(self, ctx: &mut CommandContext<'_>) {
        match self.call {
            BoundCall::NoArgs(f) => f(ctx),
            BoundCall::Int(f, value) => f(ctx, value),
            BoundCall::TextInt(f, text, value) => f(ctx, &text, value),
        }
    }
}

impl std::fmt::Debug for ParsedCommand<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParsedCommand")
            .field("name", &self.descriptor.name)
            .field("args", &self.args())
            .finish()
    }
}

/// Routes console lines to registered commands.
#[derive(Debug, Default)]
pub struct CommandRouter {
    registry: CommandRegistry,
}

impl CommandRouter {
    pub fn new(registry: CommandRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut CommandRegistry {
        &mut self.registry
    }

    /// Parses a console line into a typed call.
    pub fn parse(&self, input: &str) -> Result<ParsedCommand<'_>, DispatchError> {
        let tokens = tokenize(input);
        let name = tokens[0].to_lowercase();

        let descriptor = self
            .registry
            .lookup(&name)
            .ok_or(DispatchError::UnknownCommand { name })?;

        let arity = descriptor.arity();
        if arity > 0 && tokens.len() < 1 + arity {
            return Err(DispatchError::MissingArgument {
                name: descriptor.name.clone(),
                expected: arity,
                found: tokens.len() - 1,
            });
        }

        let call = match &descriptor.handler {
            CommandHandler::NoArgs(f) => BoundCall::NoArgs(f),
            CommandHandler::Int(f) => {
                let value = parse_int(tokens[1]).ok_or_else(|| {
                    DispatchError::ArgumentTypeMismatch {
                        name: descriptor.name.clone(),
                        token: tokens[1].to_string(),
                        expected: "an int",
                        reported: false,
                    }
                })?;
                BoundCall::Int(f, value)
            }
            CommandHandler::TextInt(f) => {
                let value = parse_int(tokens[2]).ok_or_else(|| {
                    DispatchError::ArgumentTypeMismatch {
                        name: descriptor.name.clone(),
                        token: tokens[2].to_string(),
                        expected: "a string and an int",
                        reported: true,
                    }
                })?;
                BoundCall::TextInt(f, tokens[1].to_string(), value)
            }
        };

        Ok(ParsedCommand { descriptor, call })
    }

    /// Parses and runs a console line. Returns the name of the command run.
    ///
    /// Reported failures are logged and written to the console log; the
    /// others are only traced.
    pub fn dispatch<'r>(
        &'r self,
        input: &str,
        ctx: &mut CommandContext<'_>,
    ) -> Result<&'r str, DispatchError> {
        match self.parse(input) {
            Ok(parsed) => {
                let name = parsed.name();
                debug!(command = name, args = ?parsed.args(), "Dispatching command");
                parsed.invoke(ctx);
                Ok(name)
            }
            Err(err) => {
                if err.is_reported() {
                    warn!(input, error = %err, "Command rejected");
                    ctx.log.error(err.to_string());
                } else {
                    debug!(input, error = %err, "Command skipped");
                }
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn router() -> CommandRouter {
        let mut registry = CommandRegistry::new();
        registry.register(CommandDescriptor::no_args("toggle_fov", "", "toggle_fov", |_| {}));
        registry.register(CommandDescriptor::with_int(
            "add_gold",
            "",
            "add_gold <amount>",
            |_, _| {},
        ));
        registry.register(CommandDescriptor::with_text_int(
            "spawn_units",
            "",
            "spawn_units <code> <amount>",
            |_, _, _| {},
        ));
        CommandRouter::new(registry)
    }

    #[test]
    fn test_parse_no_args() {
        let router = router();
        let parsed = router.parse("toggle_fov").unwrap();
        assert_eq!(parsed.name(), "toggle_fov");
        assert_eq!(parsed.args(), CommandArgs::None);
    }

    #[test]
    fn test_parse_no_args_ignores_extra_tokens() {
        let router = router();
        let parsed = router.parse("toggle_fov now please").unwrap();
        assert_eq!(parsed.args(), CommandArgs::None);
    }

    #[test]
    fn test_parse_name_case_insensitive() {
        let router = router();
        let parsed = router.parse("ADD_Gold 100").unwrap();
        assert_eq!(parsed.name(), "add_gold");
        assert_eq!(parsed.args(), CommandArgs::Int(100));
    }

    #[test]
    fn test_parse_unknown() {
        let router = router();
        let err = router.parse("fly 3").unwrap_err();
        assert_eq!(
            err,
            DispatchError::UnknownCommand {
                name: "fly".to_string()
            }
        );
        assert!(!err.is_reported());
    }

    #[test]
    fn test_parse_missing_argument() {
        let router = router();
        let err = router.parse("add_gold").unwrap_err();
        assert_eq!(
            err,
            DispatchError::MissingArgument {
                name: "add_gold".to_string(),
                expected: 1,
                found: 0
            }
        );
        assert!(err.is_reported());
    }

    #[test]
    fn test_parse_missing_third_token() {
        let router = router();
        let err = router.parse("spawn_units knight").unwrap_err();
        assert!(matches!(
            err,
            DispatchError::MissingArgument {
                expected: 2,
                found: 1,
                ..
            }
        ));
    }

    #[test]
    fn test_parse_int_mismatch_is_silent() {
        let router = router();
        let err = router.parse("add_gold lots").unwrap_err();
        assert!(matches!(
            err,
            DispatchError::ArgumentTypeMismatch {
                reported: false,
                ..
            }
        ));
        assert!(!err.is_reported());
    }

    #[test]
    fn test_parse_text_int_mismatch_is_reported() {
        let router = router();
        let err = router.parse("spawn_units knight abc").unwrap_err();
        assert!(err.is_reported());
        assert_eq!(
            err.to_string(),
            "'spawn_units' requires a string and an int parameter!"
        );
    }

    #[test]
    fn test_parse_text_int() {
        let router = router();
        let parsed = router.parse("spawn_units Knight 5").unwrap();
        assert_eq!(
            parsed.args(),
            CommandArgs::TextInt("Knight".to_string(), 5)
        );
    }

    #[test]
    fn test_parse_double_space_shifts_arguments() {
        let router = router();
        // The empty token takes the argument slot.
        let err = router.parse("add_gold  100").unwrap_err();
        assert!(matches!(
            err,
            DispatchError::ArgumentTypeMismatch { ref token, .. } if token.is_empty()
        ));
    }

    #[test]
    fn test_parse_empty_line() {
        let router = router();
        assert!(matches!(
            router.parse(""),
            Err(DispatchError::UnknownCommand { .. })
        ));
    }
}
