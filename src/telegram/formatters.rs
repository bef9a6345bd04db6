//! HTML message formatters
//!
//! Pure functions from API data to Telegram HTML. Names coming from the API
//! are escaped; everything else is static markup.

use crate::apis::{load_percentage, PaymentEvent, ServerStatus};

/// Shown when a resource could not be fetched or came back empty
pub const ERROR_MESSAGE: &str = "❌ <b>Failed to load data</b>\n\nThe FrizMine API did not answer. Try again in a minute.";

const SEPARATOR: &str = "━━━━━━━━━━━━━━━━━━";

/// Escape the characters Telegram HTML treats as markup
pub fn html_escape(text: &str) -> String {
    htmlescape::encode_minimal(text)
}

/// `▓` for every full `100 / width` percent, `░` for the rest
pub fn progress_bar(percent: u32, width: usize) -> String {
    let filled = (percent as usize * width / 100).min(width);
    format!("{}{}", "▓".repeat(filled), "░".repeat(width - filled))
}

fn load_line(server: &ServerStatus, bar_width: usize) -> String {
    let percent = server.load_percent();
    format!(
        "{} {}/{} ({}%)",
        progress_bar(percent, bar_width),
        server.current_online,
        server.capacity,
        percent
    )
}

// === SERVER STATUS ===

/// Lobby entry plus game servers, in API order
struct ServerSplit<'a> {
    lobby: Option<&'a ServerStatus>,
    games: Vec<&'a ServerStatus>,
}

impl<'a> ServerSplit<'a> {
    fn new(servers: &'a [ServerStatus]) -> Self {
        Self {
            lobby: servers.iter().find(|s| s.is_lobby),
            games: servers.iter().filter(|s| !s.is_lobby).collect(),
        }
    }

    /// Players counted by the lobby, 0 without a lobby record
    fn total_online(&self) -> u32 {
        self.lobby.map(|l| l.current_online).unwrap_or(0)
    }

    fn games_online(&self) -> u64 {
        self.games.iter().map(|s| u64::from(s.current_online)).sum()
    }

    /// First game server with the highest online
    fn most_popular(&self) -> Option<&'a ServerStatus> {
        self.games.iter().copied().reduce(|best, s| {
            if s.current_online > best.current_online {
                s
            } else {
                best
            }
        })
    }

    /// First game server with the lowest online
    fn least_popular(&self) -> Option<&'a ServerStatus> {
        self.games.iter().copied().reduce(|best, s| {
            if s.current_online < best.current_online {
                s
            } else {
                best
            }
        })
    }
}

fn popularity_line(server: &ServerStatus) -> String {
    format!(
        "{} ({} players)",
        html_escape(&server.display_name),
        server.current_online
    )
}

/// Server status board for /online
pub fn render_server_status(servers: &[ServerStatus], bar_width: usize) -> String {
    if servers.is_empty() {
        return ERROR_MESSAGE.to_string();
    }

    let split = ServerSplit::new(servers);

    let mut message = format!(
        "📊 <b>FRIZMINE SERVER STATUS</b>\n{}\n\
         👥 <b>Total online:</b> {}\n\
         🎮 <b>On game servers:</b> {}\n\n",
        SEPARATOR,
        split.total_online(),
        split.games_online()
    );

    if let Some(lobby) = split.lobby {
        message.push_str(&format!(
            "🟪 <b>{}</b>\n{}\n\n",
            html_escape(&lobby.display_name),
            load_line(lobby, bar_width)
        ));
    }

    message.push_str("<b>GAME SERVERS:</b>\n");
    for server in &split.games {
        let emoji = if server.current_online > 0 { "🟢" } else { "🔴" };
        message.push_str(&format!(
            "{} <b>{}</b>\n{}\n\n",
            emoji,
            html_escape(&server.display_name),
            load_line(server, bar_width)
        ));
    }

    if let Some(top) = split.most_popular() {
        message.push_str(&format!(
            "{}\n🔥 <b>Most popular:</b>\n{}",
            SEPARATOR,
            popularity_line(top)
        ));
    }

    message
}

// === PAYMENTS ===

/// First `limit` purchases, newest first, for /payments
pub fn render_payments(payments: &[PaymentEvent], limit: usize) -> String {
    if payments.is_empty() {
        return ERROR_MESSAGE.to_string();
    }

    let mut message = format!("💰 <b>RECENT PURCHASES</b>\n{}\n\n", SEPARATOR);

    for (i, payment) in payments.iter().take(limit).enumerate() {
        message.push_str(&format!(
            "{}. <b>{}</b>\n   🆔 {} • 🕐 {}\n\n",
            i + 1,
            html_escape(&payment.nickname),
            payment.id,
            payment.paid_at.format("%H:%M")
        ));
    }

    message
}

// === STATISTICS ===

/// Combined statistics, needs both resources
pub fn render_statistics(servers: &[ServerStatus], payments: &[PaymentEvent]) -> String {
    if servers.is_empty() || payments.is_empty() {
        return ERROR_MESSAGE.to_string();
    }

    let split = ServerSplit::new(servers);
    let total_online = split.total_online();
    let total_slots: u64 = servers.iter().map(|s| u64::from(s.capacity)).sum();
    let load = load_percentage(u64::from(total_online), total_slots);

    let mut message = format!(
        "📈 <b>FULL STATISTICS</b>\n{}\n\n\
         👥 <b>Total online:</b> {}\n\
         🎮 <b>On game servers:</b> {}\n\
         📊 <b>Total slots:</b> {}\n\
         ⚡ <b>Load:</b> {}%\n\
         🖥️ <b>Servers:</b> {}\n\n",
        SEPARATOR,
        total_online,
        split.games_online(),
        total_slots,
        load,
        servers.len()
    );

    if let (Some(most), Some(least)) = (split.most_popular(), split.least_popular()) {
        message.push_str(&format!(
            "🔥 <b>Most popular:</b>\n{}\n\n🌙 <b>Least popular:</b>\n{}\n\n",
            popularity_line(most),
            popularity_line(least)
        ));
    }

    let last = &payments[0];
    message.push_str(&format!(
        "💸 <b>Last purchase:</b>\n{}\nTime: {}",
        html_escape(&last.nickname),
        last.paid_at.format("%H:%M:%S")
    ));

    message
}

// === NOTIFICATIONS ===

/// Announcement pushed to subscribers for each new purchase
pub fn render_new_payment(payment: &PaymentEvent) -> String {
    format!(
        "💰 <b>NEW PURCHASE!</b>\n\n\
         Player: <b>{}</b>\n\
         ID: {}\n\
         Time: {}",
        html_escape(&payment.nickname),
        payment.id,
        payment.paid_at.format("%H:%M:%S")
    )
}

pub fn render_subscription_state(subscribed: bool) -> String {
    if subscribed {
        "🔔 <b>Notifications enabled!</b>\nYou will get a message for every new purchase.".to_string()
    } else {
        "🔕 <b>Notifications disabled</b>".to_string()
    }
}

// === STATIC TEXTS ===

pub fn render_welcome() -> String {
    "🟪 <b>FRIZMINE MONITOR BOT</b>\n\n\
     Track FrizMine server statistics in real time!\n\n\
     Choose an action:"
        .to_string()
}

pub fn render_help() -> String {
    "❓ <b>Commands</b>\n\n\
     /start - main menu\n\
     /online - server status\n\
     /payments - recent purchases\n\
     /stats - full statistics\n\
     /help - this message\n\n\
     Use 🔔 in the menu to get notified about new purchases."
        .to_string()
}
