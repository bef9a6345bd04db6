//! Configuration system
//!
//! - `macros`  the `config_struct!` declaration macro
//! - `schemas` every config section with its defaults
//! - `utils`   loading, global access and bot token resolution

pub mod macros;
pub mod schemas;
pub mod utils;

pub use schemas::{ApiConfig, Config, DisplayConfig, LoggingConfig, NotificationsConfig, TelegramConfig};
pub use utils::{
    get_config_clone, load_config, load_config_from_path, read_config_file,
    resolve_bot_token, with_config, CONFIG_FILE_PATH,
};
