pub mod payment_watch_service;
pub mod telegram_service;

pub use payment_watch_service::PaymentWatchService;
pub use telegram_service::TelegramService;
