use crate::config::Config;
use crate::logger::{self, LogTag};
use crate::services::{Service, ServiceHealth};
use crate::telegram::commands::CommandRouter;
use crate::telegram::polling;
use crate::telegram::TelegramBot;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::Notify;
use tokio::task::JoinHandle;

/// Answers commands and button presses
pub struct TelegramService {
    bot: TelegramBot,
    router: Arc<CommandRouter>,
    poll_timeout_secs: u32,
    polling: bool,
}

impl TelegramService {
    pub fn new(bot: TelegramBot, router: Arc<CommandRouter>, poll_timeout_secs: u32) -> Self {
        Self {
            bot,
            router,
            poll_timeout_secs,
            polling: false,
        }
    }
}

#[async_trait]
impl Service for TelegramService {
    fn name(&self) -> &'static str {
        "telegram"
    }

    fn priority(&self) -> i32 {
        50
    }

    fn is_enabled(&self, config: &Config) -> bool {
        config.telegram.enabled && config.telegram.commands_enabled
    }

    async fn start(&mut self, shutdown: Arc<Notify>) -> Result<Vec<JoinHandle<()>>, String> {
        let handle = polling::start_polling(
            self.router.clone(),
            self.bot.get_bot().clone(),
            self.poll_timeout_secs,
            shutdown,
        );
        self.polling = true;

        logger::info(
            LogTag::Telegram,
            &format!("Answering commands as @{}", self.bot.username()),
        );
        Ok(vec![handle])
    }

    async fn stop(&mut self) -> Result<(), String> {
        self.polling = false;
        logger::info(LogTag::Telegram, "Telegram service stopped");
        Ok(())
    }

    async fn health(&self) -> ServiceHealth {
        if self.polling {
            ServiceHealth::Healthy
        } else {
            ServiceHealth::Unhealthy("not polling".to_string())
        }
    }
}
