use frizmonitor::{
    arguments::{is_help_requested, is_once_enabled, print_help},
    config::{self, with_config},
    logger::{self, LogTag},
};
use std::path::PathBuf;

/// Main entry point for the FrizMine monitor
///
/// - `--help`: print usage and exit
/// - `--once`: fetch both API resources, print them and exit
/// - default: run the Telegram bot and the purchase watcher until Ctrl+C
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logger system
    logger::init();

    // Check for help request first (before any other processing)
    if is_help_requested() {
        print_help();
        return Ok(());
    }

    // Optional .env with FRIZMINE_BOT_TOKEN
    if let Ok(path) = dotenv::dotenv() {
        logger::debug(
            LogTag::Config,
            &format!("Loaded environment from {}", path.display()),
        );
    }

    config::load_config().map_err(anyhow::Error::msg)?;

    let (file_enabled, log_dir) =
        with_config(|c| (c.logging.file_enabled, PathBuf::from(&c.logging.directory)));
    if file_enabled {
        match logger::enable_file_logging(&log_dir) {
            Ok(path) => logger::debug(
                LogTag::System,
                &format!("Writing logs to {}", path.display()),
            ),
            Err(e) => logger::warning(LogTag::System, &format!("File logging disabled: {}", e)),
        }
    }

    let result = if is_once_enabled() {
        frizmonitor::run::run_once().await
    } else {
        frizmonitor::run::run_bot().await
    };

    if let Err(e) = &result {
        logger::error(LogTag::System, &format!("❌ FrizMine monitor failed: {}", e));
    }

    logger::flush();
    result.map_err(anyhow::Error::msg)
}
