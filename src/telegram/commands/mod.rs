//! Command router
//!
//! Text commands (`/start`, `/online`, `/payments`, `/stats`, `/help`) are
//! answered with a new message; button presses edit the message they belong
//! to (see [`callbacks`]).

pub mod callbacks;
pub mod menu;
pub mod status;

use crate::apis::{PaymentSource, StatusSource};
use crate::config::Config;
use crate::logger::{self, LogTag};
use crate::notifications::SubscriptionRegistry;
use crate::telegram::bot::TelegramBot;
use crate::telegram::keyboards;
use std::sync::Arc;
use teloxide::prelude::*;
use teloxide::types::{ChatId, InlineKeyboardMarkup, ParseMode, Update, UpdateKind};

// ============================================================================
// COMMANDS
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Start,
    Online,
    Payments,
    Stats,
    Help,
}

impl Command {
    /// Parse `/name`, `/name@bot` and `/name args`
    ///
    /// A command addressed to another bot (`/name@other_bot`) is ignored.
    pub fn parse(text: &str, bot_username: &str) -> Option<Self> {
        let first = text.split_whitespace().next()?;
        let body = first.strip_prefix('/')?;

        let name = match body.split_once('@') {
            Some((name, target)) => {
                if !bot_username.is_empty() && !target.eq_ignore_ascii_case(bot_username) {
                    return None;
                }
                name
            }
            None => body,
        };

        match name.to_lowercase().as_str() {
            "start" => Some(Command::Start),
            "online" => Some(Command::Online),
            "payments" => Some(Command::Payments),
            "stats" => Some(Command::Stats),
            "help" => Some(Command::Help),
            _ => None,
        }
    }
}

// ============================================================================
// CONTEXT
// ============================================================================

/// Display options the handlers need
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSettings {
    pub web_panel_url: String,
    pub payments_limit: usize,
    pub progress_bar_width: usize,
}

impl CommandSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            web_panel_url: config.telegram.web_panel_url.clone(),
            payments_limit: config.display.payments_limit,
            progress_bar_width: config.display.progress_bar_width,
        }
    }
}

/// Everything a handler may touch: both API clients and the registry
/// shared with the purchase watcher
pub struct CommandContext {
    pub status: Arc<dyn StatusSource>,
    pub payments: Arc<dyn PaymentSource>,
    pub registry: Arc<SubscriptionRegistry>,
    pub settings: CommandSettings,
}

/// Text plus optional inline keyboard
#[derive(Debug, Clone, PartialEq)]
pub struct Reply {
    pub text: String,
    pub keyboard: Option<InlineKeyboardMarkup>,
}

impl Reply {
    pub fn text(text: String) -> Self {
        Self {
            text,
            keyboard: None,
        }
    }

    pub fn with_keyboard(text: String, keyboard: InlineKeyboardMarkup) -> Self {
        Self {
            text,
            keyboard: Some(keyboard),
        }
    }
}

impl CommandContext {
    /// Build the reply for a text command
    pub async fn reply_to_command(&self, command: Command) -> Reply {
        match command {
            Command::Start => menu::handle_start_command(self),
            Command::Help => menu::handle_help_command(self),
            Command::Online => Reply::with_keyboard(
                status::handle_online_command(self).await,
                keyboards::online_refresh(),
            ),
            Command::Payments => Reply::with_keyboard(
                status::handle_payments_command(self).await,
                keyboards::payments_refresh(),
            ),
            Command::Stats => Reply::with_keyboard(
                status::handle_stats_command(self).await,
                keyboards::stats_refresh(),
            ),
        }
    }
}

/// Send a reply as a new HTML message
pub async fn send_reply(bot: &Bot, chat_id: ChatId, reply: Reply) -> Result<(), String> {
    let mut request = bot
        .send_message(chat_id, reply.text)
        .parse_mode(ParseMode::Html);
    if let Some(keyboard) = reply.keyboard {
        request = request.reply_markup(keyboard);
    }

    request
        .await
        .map_err(|e| format!("Failed to send reply: {}", e))?;
    Ok(())
}

// ============================================================================
// ROUTER
// ============================================================================

/// Dispatches inbound updates to the handlers
pub struct CommandRouter {
    bot: TelegramBot,
    context: Arc<CommandContext>,
}

impl CommandRouter {
    pub fn new(bot: TelegramBot, context: Arc<CommandContext>) -> Self {
        Self { bot, context }
    }

    pub fn context(&self) -> &Arc<CommandContext> {
        &self.context
    }

    /// Handle one update; errors are logged, never propagated
    pub async fn handle_update(&self, update: Update) {
        let result = match update.kind {
            UpdateKind::Message(message) => {
                let command = message
                    .text()
                    .and_then(|text| Command::parse(text, self.bot.username()));

                match command {
                    Some(command) => {
                        logger::debug(
                            LogTag::Commands,
                            &format!("{:?} from chat {}", command, message.chat.id.0),
                        );
                        let reply = self.context.reply_to_command(command).await;
                        send_reply(self.bot.get_bot(), message.chat.id, reply).await
                    }
                    None => Ok(()),
                }
            }
            UpdateKind::CallbackQuery(query) => {
                callbacks::handle_callback_query(self.bot.get_bot(), &self.context, query).await
            }
            _ => Ok(()),
        };

        if let Err(e) = result {
            logger::warning(LogTag::Commands, &e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::apis::{ApiError, PaymentEvent, ServerStatus};
    use crate::telegram::formatters::ERROR_MESSAGE;
    use async_trait::async_trait;
    use chrono::DateTime;

    struct FixedStatus(Result<Vec<ServerStatus>, ApiError>);

    #[async_trait]
    impl StatusSource for FixedStatus {
        async fn fetch_servers(&self) -> Result<Vec<ServerStatus>, ApiError> {
            self.0.clone()
        }
    }

    struct FixedPayments(Result<Vec<PaymentEvent>, ApiError>);

    #[async_trait]
    impl PaymentSource for FixedPayments {
        async fn fetch_payments(&self) -> Result<Vec<PaymentEvent>, ApiError> {
            self.0.clone()
        }
    }

    fn context(
        servers: Result<Vec<ServerStatus>, ApiError>,
        payments: Result<Vec<PaymentEvent>, ApiError>,
    ) -> CommandContext {
        CommandContext {
            status: Arc::new(FixedStatus(servers)),
            payments: Arc::new(FixedPayments(payments)),
            registry: Arc::new(SubscriptionRegistry::new()),
            settings: CommandSettings::from_config(&Config::default()),
        }
    }

    fn servers() -> Vec<ServerStatus> {
        vec![
            ServerStatus {
                identifier: "lobby".to_string(),
                display_name: "Lobby".to_string(),
                current_online: 40,
                capacity: 100,
                is_lobby: true,
            },
            ServerStatus {
                identifier: "anarchy".to_string(),
                display_name: "Anarchy".to_string(),
                current_online: 30,
                capacity: 100,
                is_lobby: false,
            },
        ]
    }

    fn payments() -> Vec<PaymentEvent> {
        vec![PaymentEvent {
            id: 7,
            nickname: "Notch".to_string(),
            paid_at: DateTime::parse_from_rfc3339("2024-05-01T10:11:12Z").unwrap(),
        }]
    }

    #[test]
    fn test_command_parse() {
        assert_eq!(Command::parse("/start", "frizbot"), Some(Command::Start));
        assert_eq!(Command::parse("/online@FrizBot", "frizbot"), Some(Command::Online));
        assert_eq!(Command::parse("/payments now please", "frizbot"), Some(Command::Payments));
        assert_eq!(Command::parse("/STATS", ""), Some(Command::Stats));
        assert_eq!(Command::parse("/stats@other_bot", "frizbot"), None);
        assert_eq!(Command::parse("/unknown", "frizbot"), None);
        assert_eq!(Command::parse("hello /start", "frizbot"), None);
        assert_eq!(Command::parse("", "frizbot"), None);
    }

    #[tokio::test]
    async fn test_command_replies() {
        let ctx = context(Ok(servers()), Ok(payments()));

        let start = ctx.reply_to_command(Command::Start).await;
        assert!(start.text.contains("FRIZMINE MONITOR BOT"));
        assert!(start.keyboard.is_some());

        let online = ctx.reply_to_command(Command::Online).await;
        assert!(online.text.contains("<b>Total online:</b> 40"));
        assert_eq!(online.keyboard, Some(keyboards::online_refresh()));

        let stats = ctx.reply_to_command(Command::Stats).await;
        assert!(stats.text.contains("<b>Total slots:</b> 200"));
        assert!(stats.text.contains("Notch"));
    }

    #[tokio::test]
    async fn test_fetch_failure_renders_error_message() {
        let ctx = context(Err(ApiError::Timeout), Ok(payments()));

        assert_eq!(ctx.reply_to_command(Command::Online).await.text, ERROR_MESSAGE);
        assert_eq!(ctx.reply_to_command(Command::Stats).await.text, ERROR_MESSAGE);
        assert!(ctx
            .reply_to_command(Command::Payments)
            .await
            .text
            .contains("Notch"));
    }

    #[tokio::test]
    async fn test_callbacks() {
        let ctx = context(Ok(servers()), Ok(vec![]));
        let chat = ChatId(555);

        let refresh = callbacks::reply_to_callback(&ctx, chat, "refresh_online").await.unwrap();
        let view = callbacks::reply_to_callback(&ctx, chat, "online").await.unwrap();
        assert_eq!(refresh, view);

        let payments = callbacks::reply_to_callback(&ctx, chat, "payments").await.unwrap();
        assert_eq!(payments.text, ERROR_MESSAGE);
        assert_eq!(payments.keyboard, Some(keyboards::payments_refresh()));

        assert!(callbacks::reply_to_callback(&ctx, chat, "menu:trade").await.is_none());
    }

    #[tokio::test]
    async fn test_notify_button_toggles_subscription() {
        let ctx = context(Ok(servers()), Ok(payments()));
        let chat = ChatId(-42);

        let on = callbacks::reply_to_callback(&ctx, chat, "notify").await.unwrap();
        assert!(on.text.contains("enabled"));
        assert!(ctx.registry.contains(chat));

        let off = callbacks::reply_to_callback(&ctx, chat, "notify").await.unwrap();
        assert!(off.text.contains("disabled"));
        assert!(!ctx.registry.contains(chat));
        assert!(off.keyboard.is_none());
    }
}
