//! Status and information commands
//!
//! Commands for viewing server online, recent purchases and statistics.
//! Each handler fetches fresh data and returns the rendered HTML; a failed
//! fetch renders the fixed error message.

use super::CommandContext;
use crate::apis::ApiError;
use crate::logger::{self, LogTag};
use crate::telegram::formatters::{
    render_payments, render_server_status, render_statistics, ERROR_MESSAGE,
};

fn log_fetch_failure(what: &str, error: &ApiError) {
    logger::warning(
        LogTag::Commands,
        &format!("Failed to fetch {} for command: {}", what, error),
    );
}

/// Handle /online and the online buttons
pub async fn handle_online_command(ctx: &CommandContext) -> String {
    match ctx.status.fetch_servers().await {
        Ok(servers) => render_server_status(&servers, ctx.settings.progress_bar_width),
        Err(e) => {
            log_fetch_failure("servers", &e);
            ERROR_MESSAGE.to_string()
        }
    }
}

/// Handle /payments and the purchases buttons
pub async fn handle_payments_command(ctx: &CommandContext) -> String {
    match ctx.payments.fetch_payments().await {
        Ok(payments) => render_payments(&payments, ctx.settings.payments_limit),
        Err(e) => {
            log_fetch_failure("payments", &e);
            ERROR_MESSAGE.to_string()
        }
    }
}

/// Handle /stats and the statistics buttons
pub async fn handle_stats_command(ctx: &CommandContext) -> String {
    let (servers, payments) = tokio::join!(ctx.status.fetch_servers(), ctx.payments.fetch_payments());

    match (servers, payments) {
        (Ok(servers), Ok(payments)) => render_statistics(&servers, &payments),
        (Err(e), _) => {
            log_fetch_failure("servers", &e);
            ERROR_MESSAGE.to_string()
        }
        (_, Err(e)) => {
            log_fetch_failure("payments", &e);
            ERROR_MESSAGE.to_string()
        }
    }
}
