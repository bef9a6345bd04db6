/// FrizMine API types
///
/// Wire records mirror the JSON exactly and are converted into the domain
/// types (`ServerStatus`, `PaymentEvent`) at the client boundary. Any shape
/// deviation is reported as `ApiError::InvalidResponse`.
use chrono::{DateTime, FixedOffset, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Deserializer};

// ============================================================================
// API ERROR TYPES
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    NetworkError(String),
    Timeout,
    HttpStatus { status: u16, body: String },
    InvalidResponse(String),
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::NetworkError(msg) => write!(f, "Network error: {}", msg),
            ApiError::Timeout => write!(f, "Request timeout"),
            ApiError::HttpStatus { status, body } => write!(f, "HTTP {}: {}", status, body),
            ApiError::InvalidResponse(msg) => write!(f, "Invalid response: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<ApiError> for String {
    fn from(err: ApiError) -> String {
        err.to_string()
    }
}

// ============================================================================
// DOMAIN TYPES
// ============================================================================

/// One entry of the public server list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerStatus {
    pub identifier: String,
    pub display_name: String,
    pub current_online: u32,
    pub capacity: u32,
    /// The aggregate lobby record (at most one per batch)
    pub is_lobby: bool,
}

impl ServerStatus {
    /// Load in whole percent, 0 when capacity is 0
    pub fn load_percent(&self) -> u32 {
        load_percentage(u64::from(self.current_online), u64::from(self.capacity))
    }
}

/// Integer percentage of `used` over `total`, truncated; 0 when `total` is 0
pub fn load_percentage(used: u64, total: u64) -> u32 {
    if total == 0 {
        return 0;
    }
    (used.saturating_mul(100) / total).min(u64::from(u32::MAX)) as u32
}

/// One purchase from the payment history
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentEvent {
    /// Assigned upstream, unique and increasing with creation time
    pub id: u64,
    pub nickname: String,
    pub paid_at: DateTime<FixedOffset>,
}

// ============================================================================
// WIRE RECORDS
// ============================================================================

#[derive(Debug, Deserialize)]
pub(crate) struct ServerRecord {
    #[serde(default, deserialize_with = "deserialize_optional_identifier")]
    pub id: Option<String>,
    pub name: String,
    pub online: u32,
    pub max: u32,
    #[serde(default)]
    pub lobby: bool,
}

impl From<ServerRecord> for ServerStatus {
    fn from(record: ServerRecord) -> Self {
        ServerStatus {
            identifier: record.id.unwrap_or_else(|| record.name.clone()),
            display_name: record.name,
            current_online: record.online,
            capacity: record.max,
            is_lobby: record.lobby,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct PaymentRecord {
    pub id: u64,
    pub nickname: String,
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub paid_at: DateTime<FixedOffset>,
}

impl From<PaymentRecord> for PaymentEvent {
    fn from(record: PaymentRecord) -> Self {
        PaymentEvent {
            id: record.id,
            nickname: record.nickname,
            paid_at: record.paid_at,
        }
    }
}

// ============================================================================
// CUSTOM DESERIALIZERS
// ============================================================================

/// Server ids come as strings or numbers depending on the backend version
fn deserialize_optional_identifier<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;
    use serde_json::Value;

    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(other) => Err(Error::custom(format!(
            "Expected string or number for server id, got: {}",
            other
        ))),
    }
}

/// RFC 3339 timestamp; a value without offset is taken as UTC
fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<DateTime<FixedOffset>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    let raw = String::deserialize(deserializer)?;
    parse_timestamp(&raw).ok_or_else(|| Error::custom(format!("Invalid timestamp: '{}'", raw)))
}

pub(crate) fn parse_timestamp(raw: &str) -> Option<DateTime<FixedOffset>> {
    let raw = raw.trim();

    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed);
    }

    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .map(|naive| Utc.from_utc_datetime(&naive).fixed_offset())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    #[test]
    fn test_load_percentage_zero_capacity() {
        assert_eq!(load_percentage(0, 0), 0);
        assert_eq!(load_percentage(15, 0), 0);
    }

    #[test]
    fn test_load_percentage_truncates() {
        assert_eq!(load_percentage(1, 3), 33);
        assert_eq!(load_percentage(50, 100), 50);
        assert_eq!(load_percentage(120, 100), 120);
    }

    #[test]
    fn test_server_record_identifier_fallback() {
        let record: ServerRecord =
            serde_json::from_str(r#"{"name":"Anarchy-1","online":3,"max":100}"#).unwrap();
        let status = ServerStatus::from(record);
        assert_eq!(status.identifier, "Anarchy-1");
        assert!(!status.is_lobby);

        let record: ServerRecord =
            serde_json::from_str(r#"{"id":7,"name":"Lobby","online":40,"max":500,"lobby":true}"#)
                .unwrap();
        let status = ServerStatus::from(record);
        assert_eq!(status.identifier, "7");
        assert!(status.is_lobby);
    }

    #[test]
    fn test_server_record_rejects_negative_online() {
        let result: Result<ServerRecord, _> =
            serde_json::from_str(r#"{"name":"A","online":-1,"max":10}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_timestamp_variants() {
        let zulu = parse_timestamp("2024-05-01T12:34:56Z").unwrap();
        assert_eq!((zulu.hour(), zulu.minute(), zulu.second()), (12, 34, 56));

        let offset = parse_timestamp("2024-05-01T12:34:56.123456+03:00").unwrap();
        assert_eq!(offset.hour(), 12);
        assert_eq!(offset.offset().local_minus_utc(), 3 * 3600);

        let naive = parse_timestamp("2024-05-01T08:00:00").unwrap();
        assert_eq!(naive.offset().local_minus_utc(), 0);
        assert_eq!(naive.hour(), 8);

        assert!(parse_timestamp("yesterday").is_none());
    }
}
