//! Delivery types shared by the purchase watcher and the Telegram transport

use async_trait::async_trait;
use teloxide::types::ChatId;
use thiserror::Error;

use crate::apis::ApiError;

/// Why a single message could not reach a destination
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeliveryError {
    /// The user blocked the bot or left the chat
    #[error("destination blocked the bot")]
    Blocked,
    /// The chat no longer exists or the account was deleted
    #[error("destination not found")]
    NotFound,
    #[error("transport error: {0}")]
    Transport(String),
}

/// Outbound message channel to chat destinations
#[async_trait]
pub trait MessageSink: Send + Sync {
    async fn deliver(&self, destination: ChatId, text: &str) -> Result<(), DeliveryError>;
}

/// One (event, destination) delivery
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryAttempt {
    pub payment_id: u64,
    pub destination: ChatId,
    pub result: Result<(), DeliveryError>,
}

/// Everything that happened during one fan-out
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeliveryReport {
    /// Payment ids processed, oldest first
    pub payment_ids: Vec<u64>,
    /// In delivery order: events oldest first, destinations per snapshot
    pub attempts: Vec<DeliveryAttempt>,
    /// Destinations dropped from the registry because delivery failed
    pub removed: Vec<ChatId>,
}

impl DeliveryReport {
    pub fn delivered_count(&self) -> usize {
        self.attempts.iter().filter(|a| a.result.is_ok()).count()
    }

    pub fn failed_count(&self) -> usize {
        self.attempts.len() - self.delivered_count()
    }
}

/// Why a tick did nothing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    FetchFailed(ApiError),
    EmptyList,
}

/// Result of one purchase watcher tick
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickOutcome {
    /// Fetch failed or returned nothing; state untouched
    Skipped(SkipReason),
    /// First successful fetch set the watermark; nothing sent
    Initialized { watermark: u64 },
    /// No event above the watermark
    Idle { watermark: u64 },
    /// New events were fanned out and the watermark advanced
    Delivered {
        watermark: u64,
        report: DeliveryReport,
    },
}
