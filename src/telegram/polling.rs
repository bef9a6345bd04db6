//! Update polling
//!
//! Long-polls `getUpdates` with offset tracking. Each update is handled in
//! its own task so a slow API fetch behind one button never stalls the poll.

use crate::logger::{self, LogTag};
use crate::telegram::commands::CommandRouter;
use std::sync::Arc;
use std::time::Duration;
use teloxide::prelude::*;
use tokio::sync::Notify;
use tokio::task::JoinHandle;

const ERROR_BACKOFF: Duration = Duration::from_secs(5);

/// Start the polling task; it ends when `shutdown` is notified
pub fn start_polling(
    router: Arc<CommandRouter>,
    bot: Bot,
    poll_timeout_secs: u32,
    shutdown: Arc<Notify>,
) -> JoinHandle<()> {
    // Registered before spawning so a shutdown sent right away is not missed
    let stop = shutdown.notified_owned();

    tokio::spawn(async move {
        tokio::pin!(stop);

        let mut offset: i32 = 0;
        logger::info(LogTag::Telegram, "Command polling started");

        loop {
            let mut request = bot.get_updates().timeout(poll_timeout_secs);
            if offset > 0 {
                request = request.offset(offset);
            }

            let result = tokio::select! {
                _ = &mut stop => {
                    logger::info(LogTag::Telegram, "Command polling received shutdown signal");
                    break;
                }
                result = request.send() => result,
            };

            match result {
                Ok(updates) => {
                    if !updates.is_empty() {
                        logger::debug(
                            LogTag::Telegram,
                            &format!("Received {} update(s)", updates.len()),
                        );
                    }

                    for update in updates {
                        offset = next_offset(offset, update.id.0);
                        let router = router.clone();
                        tokio::spawn(async move {
                            router.handle_update(update).await;
                        });
                    }
                }
                Err(e) => {
                    logger::warning(
                        LogTag::Telegram,
                        &format!("getUpdates failed, retrying in {}s: {}", ERROR_BACKOFF.as_secs(), e),
                    );
                    tokio::select! {
                        _ = &mut stop => break,
                        _ = tokio::time::sleep(ERROR_BACKOFF) => {}
                    }
                }
            }
        }

        logger::info(LogTag::Telegram, "Command polling stopped");
    })
}

/// Offset acknowledging `update_id` and everything before it
fn next_offset(current: i32, update_id: u32) -> i32 {
    let next = i32::try_from(update_id).unwrap_or(i32::MAX).saturating_add(1);
    current.max(next)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::apis::{HttpClient, PaymentClient, ServerStatusClient};
    use crate::config::Config;
    use crate::notifications::SubscriptionRegistry;
    use crate::telegram::commands::{CommandContext, CommandSettings};
    use crate::telegram::TelegramBot;

    fn router(bot: TelegramBot) -> Arc<CommandRouter> {
        let http = HttpClient::new(1, "frizmonitor-test").unwrap();
        let context = CommandContext {
            status: Arc::new(ServerStatusClient::new(http.clone(), "http://127.0.0.1:9/servers")),
            payments: Arc::new(PaymentClient::new(http, "http://127.0.0.1:9/payments")),
            registry: Arc::new(SubscriptionRegistry::new()),
            settings: CommandSettings::from_config(&Config::default()),
        };
        Arc::new(CommandRouter::new(bot, Arc::new(context)))
    }

    #[tokio::test]
    async fn test_polling_stops_on_shutdown_sent_right_after_start() {
        let bot = TelegramBot::offline("frizmonitor_bot");
        let shutdown = Arc::new(Notify::new());

        let handle = start_polling(router(bot.clone()), bot.get_bot().clone(), 30, shutdown.clone());
        shutdown.notify_waiters();

        let joined = tokio::time::timeout(Duration::from_secs(2), handle).await;
        assert!(joined.is_ok(), "polling missed the shutdown notification");
    }

    #[test]
    fn test_next_offset() {
        assert_eq!(next_offset(0, 41), 42);
        assert_eq!(next_offset(100, 41), 100);
        assert_eq!(next_offset(0, u32::MAX), i32::MAX);
    }
}
