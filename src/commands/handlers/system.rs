//! Console system commands.

use super::CommandContext;
use crate::console::DisplayState;

/// Handle `?`: show the help overlay.
pub fn show_help(ctx: &mut CommandContext<'_>) {
    *ctx.display = DisplayState::ShowHelp;
}
