//! Telegram front-end for the FrizMine monitor
//!
//! # Architecture
//!
//! ```text
//! telegram/
//! ├── mod.rs           # This file - public API
//! ├── bot.rs           # Bot handle, token validation, MessageSink
//! ├── polling.rs       # getUpdates loop
//! ├── keyboards.rs     # Inline keyboards
//! ├── formatters.rs    # HTML message formatters
//! │
//! └── commands/        # Command handlers
//!     ├── mod.rs       # Command parsing, context, router
//!     ├── status.rs    # /online, /payments, /stats
//!     ├── menu.rs      # /start, /help
//!     └── callbacks.rs # Button click handlers
//! ```

pub mod bot;
pub mod commands;
pub mod formatters;
pub mod keyboards;
pub mod polling;

pub use bot::TelegramBot;
pub use commands::{Command, CommandContext, CommandRouter, CommandSettings, Reply};
pub use formatters::{html_escape, ERROR_MESSAGE};
