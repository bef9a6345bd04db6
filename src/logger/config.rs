/// Logger configuration derived from command-line flags
use super::levels::LogLevel;
use super::tags::LogTag;
use crate::arguments;
use once_cell::sync::Lazy;
use std::collections::HashSet;
use std::sync::RwLock;

#[derive(Debug, Clone)]
pub struct LoggerConfig {
    /// Highest level that may be printed
    pub min_level: LogLevel,
    /// Tags with debug output enabled via --debug-<tag>
    pub debug_tags: HashSet<LogTag>,
    /// --debug-all
    pub debug_all: bool,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            min_level: LogLevel::Debug,
            debug_tags: HashSet::new(),
            debug_all: false,
        }
    }
}

static LOGGER_CONFIG: Lazy<RwLock<LoggerConfig>> =
    Lazy::new(|| RwLock::new(LoggerConfig::default()));

pub fn get_logger_config() -> LoggerConfig {
    LOGGER_CONFIG
        .read()
        .map(|config| config.clone())
        .unwrap_or_default()
}

pub fn set_logger_config(config: LoggerConfig) {
    if let Ok(mut guard) = LOGGER_CONFIG.write() {
        *guard = config;
    }
}

/// Build the logger configuration from the process arguments
pub fn init_from_args() {
    set_logger_config(config_from_flags(
        &arguments::debug_keys(),
        arguments::is_verbose_enabled(),
        arguments::is_quiet_enabled(),
    ));
}

pub(crate) fn config_from_flags(debug_keys: &[String], verbose: bool, quiet: bool) -> LoggerConfig {
    let debug_all = debug_keys.iter().any(|key| key == "all");
    let debug_tags = debug_keys
        .iter()
        .filter_map(|key| LogTag::from_debug_key(key))
        .collect();

    let min_level = if quiet {
        LogLevel::Warning
    } else if verbose {
        LogLevel::Verbose
    } else {
        LogLevel::Debug
    };

    LoggerConfig {
        min_level,
        debug_tags,
        debug_all,
    }
}

pub fn is_debug_enabled_for_tag(config: &LoggerConfig, tag: &LogTag) -> bool {
    config.debug_all || config.debug_tags.contains(tag)
}
