//! Callback query handlers for inline keyboard buttons
//!
//! Every button edits the message it belongs to. View buttons and their
//! refresh variants render the same content.

use super::status::{handle_online_command, handle_payments_command, handle_stats_command};
use super::{CommandContext, Reply};
use crate::logger::{self, LogTag};
use crate::telegram::{formatters, keyboards};
use teloxide::prelude::*;
use teloxide::types::{CallbackQuery, ChatId, ParseMode};
use teloxide::{ApiError as TelegramApiError, RequestError};

/// Build the reply for a button press, `None` for unknown data
pub async fn reply_to_callback(ctx: &CommandContext, chat_id: ChatId, data: &str) -> Option<Reply> {
    let parts: Vec<&str> = data.split(':').collect();

    let reply = match parts.as_slice() {
        [keyboards::CB_ONLINE] | [keyboards::CB_REFRESH_ONLINE] => {
            Reply::with_keyboard(handle_online_command(ctx).await, keyboards::online_refresh())
        }
        [keyboards::CB_PAYMENTS] | [keyboards::CB_REFRESH_PAYMENTS] => {
            Reply::with_keyboard(handle_payments_command(ctx).await, keyboards::payments_refresh())
        }
        [keyboards::CB_STATS] | [keyboards::CB_REFRESH_STATS] => {
            Reply::with_keyboard(handle_stats_command(ctx).await, keyboards::stats_refresh())
        }
        [keyboards::CB_NOTIFY] => {
            let subscribed = ctx.registry.toggle(chat_id);
            logger::info(
                LogTag::Subscriptions,
                &format!(
                    "Chat {} {} purchase notifications ({} subscribed)",
                    chat_id.0,
                    if subscribed { "enabled" } else { "disabled" },
                    ctx.registry.len()
                ),
            );
            Reply::text(formatters::render_subscription_state(subscribed))
        }
        _ => {
            logger::debug(LogTag::Commands, &format!("Unknown callback: {}", data));
            return None;
        }
    };

    Some(reply)
}

/// Handle callback query from inline keyboard button
pub async fn handle_callback_query(
    bot: &Bot,
    ctx: &CommandContext,
    query: CallbackQuery,
) -> Result<(), String> {
    // Always answer callback query first to remove loading indicator
    bot.answer_callback_query(query.id.clone())
        .await
        .map_err(|e| format!("Failed to answer callback: {}", e))?;

    let data = query.data.as_deref().unwrap_or("");
    let chat_id = match query.message.as_ref() {
        Some(message) => message.chat().id,
        None => ChatId(query.from.id.0 as i64),
    };

    logger::debug(
        LogTag::Commands,
        &format!("Callback '{}' from chat {}", data, chat_id.0),
    );

    let reply = match reply_to_callback(ctx, chat_id, data).await {
        Some(reply) => reply,
        None => return Ok(()),
    };

    match query.message.as_ref() {
        Some(message) => edit_with_reply(bot, chat_id, message.id(), reply).await,
        None => super::send_reply(bot, chat_id, reply).await,
    }
}

async fn edit_with_reply(
    bot: &Bot,
    chat_id: ChatId,
    message_id: teloxide::types::MessageId,
    reply: Reply,
) -> Result<(), String> {
    let mut request = bot
        .edit_message_text(chat_id, message_id, reply.text)
        .parse_mode(ParseMode::Html);
    if let Some(keyboard) = reply.keyboard {
        request = request.reply_markup(keyboard);
    }

    match request.await {
        Ok(_) => Ok(()),
        // Refresh pressed with nothing changed
        Err(RequestError::Api(TelegramApiError::MessageNotModified)) => Ok(()),
        Err(e) => Err(format!("Failed to edit message: {}", e)),
    }
}
