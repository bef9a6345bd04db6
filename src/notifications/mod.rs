//! Live purchase notifications
//!
//! ```text
//! notifications/
//! ├── registry.rs   # SubscriptionRegistry, shared with command handlers
//! ├── watermark.rs  # Watermark state machine + newest-first diff
//! ├── notifier.rs   # PaymentNotifier: tick, fan-out, timer loop
//! └── types.rs      # MessageSink, DeliveryError, DeliveryReport, TickOutcome
//! ```

pub mod notifier;
pub mod registry;
pub mod types;
pub mod watermark;

pub use notifier::PaymentNotifier;
pub use registry::SubscriptionRegistry;
pub use types::{
    DeliveryAttempt, DeliveryError, DeliveryReport, MessageSink, SkipReason, TickOutcome,
};
pub use watermark::{collect_new_events, Observation, Watermark};
