/// Centralized argument handling for the FrizMine monitor
///
/// All command-line flag checks go through this module so the logger, the
/// config loader and `main` agree on what was passed.
///
/// Supported flags:
/// - `--config <path>`   use a different TOML config file
/// - `--once`            fetch both resources once, print them and exit
/// - `--debug-<tag>`     enable debug logs for one log tag (`--debug-all` for every tag)
/// - `--verbose`         enable verbose logs
/// - `--quiet`           only warnings and errors
/// - `--help`            print usage and exit
use once_cell::sync::Lazy;
use std::env;
use std::sync::Mutex;

/// Global command-line arguments storage
pub static CMD_ARGS: Lazy<Mutex<Vec<String>>> = Lazy::new(|| Mutex::new(env::args().collect()));

/// Sets the global command-line arguments
/// Used by tests to override the default env::args() collection
pub fn set_cmd_args(args: Vec<String>) {
    if let Ok(mut cmd_args) = CMD_ARGS.lock() {
        *cmd_args = args;
    }
}

/// Gets a copy of the current command-line arguments
pub fn get_cmd_args() -> Vec<String> {
    match CMD_ARGS.lock() {
        Ok(args) => args.clone(),
        Err(_) => env::args().collect(),
    }
}

/// Checks if a specific argument is present in the command line
pub fn has_arg(arg: &str) -> bool {
    get_cmd_args().iter().any(|a| a == arg)
}

/// Gets the value of a command-line argument that follows a flag
pub fn get_arg_value(flag: &str) -> Option<String> {
    let args = get_cmd_args();
    args.iter()
        .position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .filter(|value| !value.starts_with("--"))
        .cloned()
}

// =============================================================================
// MODE FLAGS
// =============================================================================

pub fn is_help_requested() -> bool {
    has_arg("--help") || has_arg("-h")
}

/// One-shot diagnostic mode (no Telegram, no timer)
pub fn is_once_enabled() -> bool {
    has_arg("--once")
}

pub fn is_verbose_enabled() -> bool {
    has_arg("--verbose")
}

pub fn is_quiet_enabled() -> bool {
    has_arg("--quiet")
}

/// Config file override from `--config <path>`
pub fn config_path_override() -> Option<String> {
    get_arg_value("--config")
}

/// Collects the tag keys passed as `--debug-<key>`
///
/// `--debug-all` is returned as the key `all`.
pub fn debug_keys() -> Vec<String> {
    get_cmd_args()
        .iter()
        .filter_map(|a| a.strip_prefix("--debug-"))
        .filter(|key| !key.is_empty())
        .map(|key| key.to_lowercase())
        .collect()
}

pub fn print_help() {
    println!(
        "frizmonitor {}\n\n\
         USAGE:\n    frizmonitor [FLAGS]\n\n\
         FLAGS:\n    \
         --config <path>   Config file (default: data/config.toml)\n    \
         --once            Fetch server status and purchases once, print and exit\n    \
         --debug-<tag>     Debug logs for a tag: system, config, api, telegram,\n                      \
         notifier, subscriptions, commands (or --debug-all)\n    \
         --verbose         Verbose logs\n    \
         --quiet           Only warnings and errors\n    \
         -h, --help        Print this help\n\n\
         ENVIRONMENT:\n    \
         FRIZMINE_BOT_TOKEN  Telegram bot token (name configurable via telegram.token_env_var)",
        crate::version::VERSION
    );
}
