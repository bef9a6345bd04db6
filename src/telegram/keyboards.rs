//! Inline keyboard builders
//!
//! Callback data values are the plain action names routed by
//! `commands::callbacks`. Telegram caps callback data at 64 bytes.

use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup};

pub const CB_ONLINE: &str = "online";
pub const CB_PAYMENTS: &str = "payments";
pub const CB_STATS: &str = "stats";
pub const CB_NOTIFY: &str = "notify";
pub const CB_REFRESH_ONLINE: &str = "refresh_online";
pub const CB_REFRESH_PAYMENTS: &str = "refresh_payments";
pub const CB_REFRESH_STATS: &str = "refresh_stats";

// === HELPER FUNCTIONS ===

/// Create a callback button
fn btn(text: &str, callback_data: &str) -> InlineKeyboardButton {
    InlineKeyboardButton::callback(text.to_string(), callback_data.to_string())
}

/// Create a URL button, `None` if the URL does not parse
fn url_btn(text: &str, link: &str) -> Option<InlineKeyboardButton> {
    link.parse::<url::Url>()
        .ok()
        .map(|parsed| InlineKeyboardButton::url(text.to_string(), parsed))
}

fn refresh(callback_data: &str) -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![vec![btn("🔄 Refresh", callback_data)]])
}

// === MAIN MENU ===

/// Main menu, one action per row; the web panel row is skipped when empty or invalid
pub fn main_menu(web_panel_url: &str) -> InlineKeyboardMarkup {
    let mut rows = vec![
        vec![btn("📊 Server online", CB_ONLINE)],
        vec![btn("💰 Recent purchases", CB_PAYMENTS)],
        vec![btn("📈 Statistics", CB_STATS)],
        vec![btn("🔔 Notifications", CB_NOTIFY)],
    ];

    if !web_panel_url.is_empty() {
        if let Some(button) = url_btn("🌐 Web panel", web_panel_url) {
            rows.push(vec![button]);
        }
    }

    InlineKeyboardMarkup::new(rows)
}

// === REFRESH KEYBOARDS ===

pub fn online_refresh() -> InlineKeyboardMarkup {
    refresh(CB_REFRESH_ONLINE)
}

pub fn payments_refresh() -> InlineKeyboardMarkup {
    refresh(CB_REFRESH_PAYMENTS)
}

pub fn stats_refresh() -> InlineKeyboardMarkup {
    refresh(CB_REFRESH_STATS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use teloxide::types::InlineKeyboardButtonKind;

    fn callback_data(markup: &InlineKeyboardMarkup) -> Vec<String> {
        markup
            .inline_keyboard
            .iter()
            .flatten()
            .filter_map(|button| match &button.kind {
                InlineKeyboardButtonKind::CallbackData(data) => Some(data.clone()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_main_menu_layout() {
        let menu = main_menu("https://example.org/panel.html");
        assert_eq!(menu.inline_keyboard.len(), 5);
        assert_eq!(
            callback_data(&menu),
            vec!["online", "payments", "stats", "notify"]
        );
        assert!(matches!(
            menu.inline_keyboard[4][0].kind,
            InlineKeyboardButtonKind::Url(_)
        ));
    }

    #[test]
    fn test_main_menu_without_panel() {
        assert_eq!(main_menu("").inline_keyboard.len(), 4);
        assert_eq!(main_menu("not a url").inline_keyboard.len(), 4);
    }

    #[test]
    fn test_refresh_keyboards() {
        assert_eq!(callback_data(&online_refresh()), vec!["refresh_online"]);
        assert_eq!(callback_data(&payments_refresh()), vec!["refresh_payments"]);
        assert_eq!(callback_data(&stats_refresh()), vec!["refresh_stats"]);
    }

    #[test]
    fn test_callback_data_fits_telegram_limit() {
        let all = [
            CB_ONLINE,
            CB_PAYMENTS,
            CB_STATS,
            CB_NOTIFY,
            CB_REFRESH_ONLINE,
            CB_REFRESH_PAYMENTS,
            CB_REFRESH_STATS,
        ];
        assert!(all.iter().all(|data| !data.is_empty() && data.len() <= 64));
    }
}
