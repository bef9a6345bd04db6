/// Payment history client
///
/// Endpoint: `GET /api/payments/last` returning a JSON array of
/// `{ id, nickname, paid_at }` records, newest first. The order is passed
/// through untouched; the purchase watcher relies on it.
use super::client::HttpClient;
use super::types::{ApiError, PaymentEvent, PaymentRecord};
use crate::config::ApiConfig;
use crate::logger::{self, LogTag};
use async_trait::async_trait;

/// Anything that can produce the latest payment events, newest first
#[async_trait]
pub trait PaymentSource: Send + Sync {
    async fn fetch_payments(&self) -> Result<Vec<PaymentEvent>, ApiError>;
}

pub struct PaymentClient {
    http_client: HttpClient,
    url: String,
}

impl PaymentClient {
    pub fn new(http_client: HttpClient, url: impl Into<String>) -> Self {
        Self {
            http_client,
            url: url.into(),
        }
    }

    pub fn from_config(config: &ApiConfig) -> Result<Self, String> {
        let http_client = HttpClient::new(config.timeout_secs, &config.user_agent)?;
        Ok(Self::new(http_client, config.payments_url.clone()))
    }

    /// Single bounded-timeout read, no retry
    pub async fn fetch(&self) -> Result<Vec<PaymentEvent>, ApiError> {
        let body = self.http_client.get_text(&self.url, "payments").await?;
        parse_payments(&body)
    }
}

#[async_trait]
impl PaymentSource for PaymentClient {
    async fn fetch_payments(&self) -> Result<Vec<PaymentEvent>, ApiError> {
        self.fetch().await
    }
}

/// Parse a payment history body, preserving upstream order
pub fn parse_payments(body: &str) -> Result<Vec<PaymentEvent>, ApiError> {
    let records: Vec<PaymentRecord> = serde_json::from_str(body)
        .map_err(|e| ApiError::InvalidResponse(format!("payments: {}", e)))?;

    let events: Vec<PaymentEvent> = records.into_iter().map(PaymentEvent::from).collect();

    if !is_newest_first(&events) {
        logger::warning(
            LogTag::Api,
            "payments: ids are not strictly descending, new purchases may be missed",
        );
    }

    Ok(events)
}

fn is_newest_first(events: &[PaymentEvent]) -> bool {
    events.windows(2).all(|pair| pair[0].id > pair[1].id)
}
