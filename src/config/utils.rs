/// Configuration utilities - loading and access helpers
///
/// The configuration is loaded once at startup into a global `RwLock` and read
/// through [`with_config`] / [`get_config_clone`].
use super::schemas::Config;
use crate::logger::{self, LogTag};
use once_cell::sync::{Lazy, OnceCell};
use std::path::Path;
use std::sync::RwLock;

/// Global configuration instance
pub static CONFIG: OnceCell<RwLock<Config>> = OnceCell::new();

/// Used by readers before `load_config` ran (tests, `--help`)
static DEFAULT_CONFIG: Lazy<Config> = Lazy::new(Config::default);

/// Default configuration file path
pub const CONFIG_FILE_PATH: &str = "data/config.toml";

/// Load configuration from the default path (or `--config <path>`)
pub fn load_config() -> Result<(), String> {
    let path = crate::arguments::config_path_override()
        .unwrap_or_else(|| CONFIG_FILE_PATH.to_string());
    load_config_from_path(&path)
}

/// Load configuration from a specific file path and install it globally
///
/// A missing file is not an error: defaults are used and a warning is logged.
pub fn load_config_from_path(path: &str) -> Result<(), String> {
    let config = if Path::new(path).exists() {
        let config = read_config_file(path)?;
        logger::info(LogTag::Config, &format!("Loaded configuration from '{}'", path));
        config
    } else {
        logger::warning(
            LogTag::Config,
            &format!("Config file '{}' not found, using default values", path),
        );
        Config::default()
    };

    CONFIG
        .set(RwLock::new(config))
        .map_err(|_| "Config already initialized".to_string())
}

/// Parse a TOML config file without touching the global instance
pub fn read_config_file(path: &str) -> Result<Config, String> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config file '{}': {}", path, e))?;

    toml::from_str::<Config>(&contents)
        .map_err(|e| format!("Failed to parse config file '{}': {}", path, e))
}

/// Read from the global configuration
///
/// Falls back to the built-in defaults when the config was never loaded.
pub fn with_config<F, R>(f: F) -> R
where
    F: FnOnce(&Config) -> R,
{
    match CONFIG.get() {
        Some(lock) => match lock.read() {
            Ok(config) => f(&config),
            Err(poisoned) => f(&poisoned.into_inner()),
        },
        None => f(&DEFAULT_CONFIG),
    }
}

/// Clone of the entire configuration, for holding values across await points
pub fn get_config_clone() -> Config {
    with_config(|c| c.clone())
}

/// Resolve the Telegram bot token
///
/// The environment variable named by `telegram.token_env_var` wins over the
/// `bot_token` value from the file. Returns `None` when neither is set.
pub fn resolve_bot_token(config: &Config) -> Option<String> {
    resolve_bot_token_with(config, |name| std::env::var(name).ok())
}

pub(crate) fn resolve_bot_token_with<F>(config: &Config, lookup: F) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    let from_env = if config.telegram.token_env_var.is_empty() {
        None
    } else {
        lookup(&config.telegram.token_env_var)
    };

    from_env
        .map(|token| token.trim().to_string())
        .filter(|token| !token.is_empty())
        .or_else(|| {
            let token = config.telegram.bot_token.trim();
            (!token.is_empty()).then(|| token.to_string())
        })
}
