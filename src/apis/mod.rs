//! FrizMine API clients
//!
//! ```text
//! apis/
//! ├── client.rs    # HttpClient with bounded timeout
//! ├── types.rs     # ApiError, domain types, wire records
//! ├── servers.rs   # ServerStatusClient + StatusSource
//! └── payments.rs  # PaymentClient + PaymentSource
//! ```
//!
//! Both clients treat transport errors, timeouts, non-2xx statuses and parse
//! errors the same way: `Err(ApiError)`. Retrying is up to the caller.

pub mod client;
pub mod payments;
pub mod servers;
pub mod types;

pub use client::HttpClient;
pub use payments::{parse_payments, PaymentClient, PaymentSource};
pub use servers::{parse_servers, ServerStatusClient, StatusSource};
pub use types::{load_percentage, ApiError, PaymentEvent, ServerStatus};
