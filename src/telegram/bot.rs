//! Telegram bot instance management
//!
//! Wraps the teloxide `Bot`, validates the token at startup and implements
//! [`MessageSink`] for purchase announcements.

use crate::logger::{self, LogTag};
use crate::notifications::{DeliveryError, MessageSink};
use async_trait::async_trait;
use teloxide::prelude::*;
use teloxide::types::{ChatId, ParseMode};
use teloxide::{ApiError as TelegramApiError, RequestError};

/// Validated bot handle
#[derive(Clone)]
pub struct TelegramBot {
    bot: Bot,
    username: String,
}

impl TelegramBot {
    /// Create the bot and validate the token with getMe
    pub async fn connect(token: &str) -> Result<Self, String> {
        if token.is_empty() {
            return Err("Bot token is empty".to_string());
        }

        let bot = Bot::new(token);
        match bot.get_me().await {
            Ok(me) => {
                let username = me.username.clone().unwrap_or_default();
                logger::info(
                    LogTag::Telegram,
                    &format!(
                        "Bot initialized: @{} (ID: {})",
                        if username.is_empty() { "unknown" } else { &username },
                        me.id
                    ),
                );
                Ok(Self { bot, username })
            }
            Err(e) => {
                logger::error(
                    LogTag::Telegram,
                    &format!("Failed to validate bot token: {}", e),
                );
                Err(format!("Invalid bot token: {}", e))
            }
        }
    }

    /// Bot pointed at a closed local port, for tests that must not reach Telegram
    #[cfg(test)]
    pub(crate) fn offline(username: &str) -> Self {
        let api_url = url::Url::parse("http://127.0.0.1:9/").expect("valid local url");
        Self {
            bot: Bot::new("0:offline").set_api_url(api_url),
            username: username.to_string(),
        }
    }

    /// Get the underlying Bot instance
    pub fn get_bot(&self) -> &Bot {
        &self.bot
    }

    /// Bot username without the leading `@`
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Send an HTML message to a chat
    pub async fn send_message(&self, chat_id: ChatId, message: &str) -> Result<(), RequestError> {
        self.bot
            .send_message(chat_id, message)
            .parse_mode(ParseMode::Html)
            .await?;
        Ok(())
    }
}

#[async_trait]
impl MessageSink for TelegramBot {
    async fn deliver(&self, destination: ChatId, text: &str) -> Result<(), DeliveryError> {
        self.send_message(destination, text)
            .await
            .map_err(|e| classify_request_error(&e))?;

        logger::debug(
            LogTag::Telegram,
            &format!("Sent notification to chat {} (length={})", destination.0, text.len()),
        );
        Ok(())
    }
}

/// Map a Bot API failure onto a delivery error kind
pub fn classify_request_error(error: &RequestError) -> DeliveryError {
    match error {
        RequestError::Api(
            TelegramApiError::BotBlocked
            | TelegramApiError::BotKicked
            | TelegramApiError::BotKickedFromSupergroup,
        ) => DeliveryError::Blocked,
        RequestError::Api(TelegramApiError::ChatNotFound | TelegramApiError::UserDeactivated) => {
            DeliveryError::NotFound
        }
        other => DeliveryError::Transport(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_request_error() {
        assert_eq!(
            classify_request_error(&RequestError::Api(TelegramApiError::BotBlocked)),
            DeliveryError::Blocked
        );
        assert_eq!(
            classify_request_error(&RequestError::Api(TelegramApiError::ChatNotFound)),
            DeliveryError::NotFound
        );
        assert!(matches!(
            classify_request_error(&RequestError::Api(TelegramApiError::MessageTextIsEmpty)),
            DeliveryError::Transport(_)
        ));
    }

    #[tokio::test]
    async fn test_connect_rejects_empty_token() {
        assert!(TelegramBot::connect("").await.is_err());
    }
}
