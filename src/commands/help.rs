//! Help and autocomplete text for the debug console.

use super::registry::CommandRegistry;

/// One `<format> - <description>` line per command, in registration order.
pub fn help_lines(registry: &CommandRegistry) -> Vec<String> {
    registry.all().map(|c| c.help_line()).collect()
}

/// Help lines of the commands whose name starts with `input`.
pub fn autocomplete_lines(registry: &CommandRegistry, input: &str) -> Vec<String> {
    registry.complete(input).map(|c| c.help_line()).collect()
}
