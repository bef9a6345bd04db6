/// Server status client
///
/// Endpoint: `GET /api/servers/public` returning a JSON array of
/// `{ id?, name, online, max, lobby? }` records.
use super::client::HttpClient;
use super::types::{ApiError, ServerRecord, ServerStatus};
use crate::config::ApiConfig;
use async_trait::async_trait;

/// Anything that can produce the current server list
#[async_trait]
pub trait StatusSource: Send + Sync {
    async fn fetch_servers(&self) -> Result<Vec<ServerStatus>, ApiError>;
}

pub struct ServerStatusClient {
    http_client: HttpClient,
    url: String,
}

impl ServerStatusClient {
    pub fn new(http_client: HttpClient, url: impl Into<String>) -> Self {
        Self {
            http_client,
            url: url.into(),
        }
    }

    pub fn from_config(config: &ApiConfig) -> Result<Self, String> {
        let http_client = HttpClient::new(config.timeout_secs, &config.user_agent)?;
        Ok(Self::new(http_client, config.servers_url.clone()))
    }

    /// Single bounded-timeout read, no retry
    pub async fn fetch(&self) -> Result<Vec<ServerStatus>, ApiError> {
        let body = self.http_client.get_text(&self.url, "servers").await?;
        parse_servers(&body)
    }
}

#[async_trait]
impl StatusSource for ServerStatusClient {
    async fn fetch_servers(&self) -> Result<Vec<ServerStatus>, ApiError> {
        self.fetch().await
    }
}

/// Parse and validate a server list body
pub fn parse_servers(body: &str) -> Result<Vec<ServerStatus>, ApiError> {
    let records: Vec<ServerRecord> = serde_json::from_str(body)
        .map_err(|e| ApiError::InvalidResponse(format!("servers: {}", e)))?;

    let servers: Vec<ServerStatus> = records.into_iter().map(ServerStatus::from).collect();

    let lobbies = servers.iter().filter(|s| s.is_lobby).count();
    if lobbies > 1 {
        return Err(ApiError::InvalidResponse(format!(
            "servers: expected at most one lobby record, got {}",
            lobbies
        )));
    }

    Ok(servers)
}
