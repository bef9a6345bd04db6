/// Configuration schemas - every section declared once with its defaults
///
/// Each section maps to a TOML table in `data/config.toml`. Missing keys and
/// missing tables fall back to the defaults below.
use crate::config_struct;

// ============================================================================
// TELEGRAM
// ============================================================================

config_struct! {
    /// Telegram bot connection and command surface
    pub struct TelegramConfig {
        /// Run the bot at all (disable for `--once`-style diagnostics)
        enabled: bool = true,
        /// Bot token from @BotFather. Prefer the environment variable below.
        bot_token: String = String::new(),
        /// Environment variable checked before `bot_token`
        token_env_var: String = "FRIZMINE_BOT_TOKEN".to_string(),
        /// Answer /start, /online, /payments, /stats and menu buttons
        commands_enabled: bool = true,
        /// Long-poll timeout for getUpdates
        poll_timeout_secs: u32 = 10,
        /// Link shown as a URL button in the main menu (empty hides it)
        web_panel_url: String = "https://unknown095812.github.io/frizmine-panel/frizmine_panel.html".to_string(),
    }
}

// ============================================================================
// UPSTREAM API
// ============================================================================

config_struct! {
    /// FrizMine public API endpoints
    pub struct ApiConfig {
        servers_url: String = "https://frizmine.shop/api/servers/public".to_string(),
        payments_url: String = "https://frizmine.shop/api/payments/last".to_string(),
        /// Per-request timeout; a timed-out request counts as a failed fetch
        timeout_secs: u64 = 10,
        user_agent: String = crate::version::user_agent(),
    }
}

// ============================================================================
// PURCHASE NOTIFICATIONS
// ============================================================================

config_struct! {
    /// Purchase watcher timer
    pub struct NotificationsConfig {
        enabled: bool = true,
        interval_secs: u64 = 60,
        /// Delay before the first poll after startup
        initial_delay_secs: u64 = 10,
    }
}

// ============================================================================
// DISPLAY
// ============================================================================

config_struct! {
    /// Rendering options for chat messages
    pub struct DisplayConfig {
        /// Purchases listed by /payments
        payments_limit: usize = 10,
        /// Cells in a load progress bar
        progress_bar_width: usize = 10,
    }
}

// ============================================================================
// LOGGING
// ============================================================================

config_struct! {
    pub struct LoggingConfig {
        file_enabled: bool = true,
        directory: String = "logs".to_string(),
    }
}

// ============================================================================
// ROOT
// ============================================================================

config_struct! {
    /// Root configuration
    pub struct Config {
        telegram: TelegramConfig = TelegramConfig::default(),
        api: ApiConfig = ApiConfig::default(),
        notifications: NotificationsConfig = NotificationsConfig::default(),
        display: DisplayConfig = DisplayConfig::default(),
        logging: LoggingConfig = LoggingConfig::default(),
    }
}
