pub mod apis;
pub mod arguments;
pub mod config;
pub mod logger;
pub mod notifications;
pub mod run;
pub mod services;
pub mod telegram;
pub mod version;
