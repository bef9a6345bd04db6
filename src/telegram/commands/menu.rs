//! Menu command handlers
//!
//! Handles the greeting menu and the help text.

use super::{CommandContext, Reply};
use crate::telegram::{formatters, keyboards};

/// Handle /start: greeting plus the main menu
pub fn handle_start_command(ctx: &CommandContext) -> Reply {
    Reply::with_keyboard(
        formatters::render_welcome(),
        keyboards::main_menu(&ctx.settings.web_panel_url),
    )
}

/// Handle /help
pub fn handle_help_command(ctx: &CommandContext) -> Reply {
    Reply::with_keyboard(
        formatters::render_help(),
        keyboards::main_menu(&ctx.settings.web_panel_url),
    )
}
