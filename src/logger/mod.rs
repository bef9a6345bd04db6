//! Structured logging for the FrizMine monitor
//!
//! - Standard levels (Error/Warning/Info/Debug/Verbose)
//! - Per-subsystem debug control via `--debug-<tag>` flags
//! - Colored console output plus optional file persistence
//!
//! ## Usage
//!
//! ```rust,ignore
//! use frizmonitor::logger::{self, LogTag};
//!
//! logger::error(LogTag::Api, "Connection failed");
//! logger::info(LogTag::Notifier, "Watermark initialized at 105");
//! logger::debug(LogTag::Telegram, "Update batch: 3"); // Only with --debug-telegram
//! ```
//!
//! Call [`init`] once at startup, and [`enable_file_logging`] after the config
//! is loaded (the log directory comes from `[logging]`).

mod config;
mod core;
mod file;
mod format;
mod levels;
mod tags;

pub use config::{get_logger_config, init_from_args, set_logger_config, LoggerConfig};
pub use levels::LogLevel;
pub use tags::LogTag;

use std::path::{Path, PathBuf};

/// Initialize console logging from command-line flags
pub fn init() {
    config::init_from_args();
}

/// Start mirroring log lines into a file under `directory`
pub fn enable_file_logging(directory: &Path) -> Result<PathBuf, String> {
    file::init_file_logging(directory)
}

/// Log at ERROR level (always shown)
pub fn error(tag: LogTag, message: &str) {
    core::log_internal(tag, LogLevel::Error, message);
}

/// Log at WARNING level
pub fn warning(tag: LogTag, message: &str) {
    core::log_internal(tag, LogLevel::Warning, message);
}

/// Log at INFO level (normal operation)
pub fn info(tag: LogTag, message: &str) {
    core::log_internal(tag, LogLevel::Info, message);
}

/// Log at DEBUG level, only shown with `--debug-<tag>`
pub fn debug(tag: LogTag, message: &str) {
    core::log_internal(tag, LogLevel::Debug, message);
}

/// Log at VERBOSE level, only shown with `--verbose`
pub fn verbose(tag: LogTag, message: &str) {
    core::log_internal(tag, LogLevel::Verbose, message);
}

/// Flush pending file writes (call during shutdown)
pub fn flush() {
    file::flush_file_logging();
}
