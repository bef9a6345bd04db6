/// Base HTTP client with a bounded per-request timeout
use super::types::ApiError;
use reqwest::Client;
use std::time::{Duration, Instant};

use crate::logger::{self, LogTag};

/// HTTP client wrapper shared by the status and payment clients
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    timeout: Duration,
}

impl HttpClient {
    pub fn new(timeout_secs: u64, user_agent: &str) -> Result<Self, String> {
        let timeout = Duration::from_secs(timeout_secs);
        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(timeout)
            .user_agent(user_agent)
            .build()
            .map_err(|e| format!("Failed to create HTTP client: {}", e))?;

        Ok(Self { client, timeout })
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// GET `url` and return the body of a 2xx response
    ///
    /// `endpoint` is only used for log lines.
    pub async fn get_text(&self, url: &str, endpoint: &str) -> Result<String, ApiError> {
        let start = Instant::now();

        let response = self
            .client
            .get(url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| classify_error(endpoint, e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| classify_error(endpoint, e))?;

        logger::debug(
            LogTag::Api,
            &format!(
                "{} -> HTTP {} ({} bytes, {} ms)",
                endpoint,
                status.as_u16(),
                body.len(),
                start.elapsed().as_millis()
            ),
        );

        if !status.is_success() {
            return Err(ApiError::HttpStatus {
                status: status.as_u16(),
                body: truncate_body(&body),
            });
        }

        Ok(body)
    }
}

fn classify_error(endpoint: &str, err: reqwest::Error) -> ApiError {
    if err.is_timeout() {
        logger::debug(LogTag::Api, &format!("{} timed out", endpoint));
        ApiError::Timeout
    } else {
        ApiError::NetworkError(err.to_string())
    }
}

/// Keep error bodies short in logs and error values
fn truncate_body(body: &str) -> String {
    const MAX_BODY_CHARS: usize = 200;
    if body.chars().count() > MAX_BODY_CHARS {
        format!("{}...", body.chars().take(MAX_BODY_CHARS).collect::<String>())
    } else {
        body.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_body() {
        assert_eq!(truncate_body("short"), "short");
        let long = "x".repeat(500);
        let truncated = truncate_body(&long);
        assert_eq!(truncated.chars().count(), 203);
        assert!(truncated.ends_with("..."));
    }

    #[test]
    fn test_client_keeps_timeout() {
        let client = HttpClient::new(10, "frizmonitor-test").unwrap();
        assert_eq!(client.timeout(), Duration::from_secs(10));
    }

    #[tokio::test]
    async fn test_unreachable_host_is_a_fetch_failure() {
        let client = HttpClient::new(2, "frizmonitor-test").unwrap();
        // Port 9 on localhost (discard) is closed on test machines
        let result = client.get_text("http://127.0.0.1:9/servers", "test").await;
        assert!(matches!(
            result,
            Err(ApiError::NetworkError(_)) | Err(ApiError::Timeout)
        ));
    }

    #[tokio::test]
    async fn test_silent_server_times_out() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        // Accept and hold the connection without ever answering
        let server = tokio::spawn(async move {
            let (socket, _) = listener.accept().await.unwrap();
            tokio::time::sleep(Duration::from_secs(10)).await;
            drop(socket);
        });

        let client = HttpClient::new(1, "frizmonitor-test").unwrap();
        let started = Instant::now();
        let result = client
            .get_text(&format!("http://{}/api/payments", addr), "test")
            .await;

        assert_eq!(result, Err(ApiError::Timeout));
        assert!(started.elapsed() < Duration::from_secs(5));
        server.abort();
    }
}
