//! API client module
//!
//! HTTP client for the Logview API server.

use anyhow::{bail, Context, Result};
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use shared::models::{LogAnalytics, LogEntry, LogFilterParams};

/// Body of `GET /health`.
#[derive(Debug, Deserialize)]
pub struct Health {
    /// Reported status, `"OK"` when healthy.
    pub status: String,
    /// Server time.
    pub timestamp: String,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

/// HTTP client for the Logview API
pub struct ApiClient {
    base_url: String,
    client: Client,
}

impl ApiClient {
    /// Create a new API client
    ///
    /// # Arguments
    /// * `base_url` - The base URL of the API server
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: Client::new(),
        }
    }

    /// Base URL requests are sent to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// URL of the real-time WebSocket endpoint.
    ///
    /// `http` maps to `ws` and `https` to `wss`.
    pub fn ws_url(&self) -> Result<String> {
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            bail!("API URL must start with http:// or https://, got {}", self.base_url);
        }
        Ok(format!("{}/ws", self.base_url.replacen("http", "ws", 1)))
    }

    /// Check server health
    pub async fn health(&self) -> Result<Health> {
        let url = format!("{}/health", self.base_url);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .context("Failed to send health request")?;

        self.handle_response(response).await
    }

    /// Query log entries, most recent first
    ///
    /// # Arguments
    /// * `params` - Filter parameters; absent ones are not sent
    pub async fn query_logs(&self, params: &LogFilterParams) -> Result<Vec<LogEntry>> {
        let url = format!("{}/logs", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(params)
            .send()
            .await
            .context("Failed to send log query request")?;

        self.handle_response(response).await
    }

    /// Fetch analytics over the filtered entries
    ///
    /// # Arguments
    /// * `params` - Filter parameters; absent ones are not sent
    pub async fn analytics(&self, params: &LogFilterParams) -> Result<LogAnalytics> {
        let url = format!("{}/logs/analytics", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(params)
            .send()
            .await
            .context("Failed to send analytics request")?;

        self.handle_response(response).await
    }

    /// Ingest one log entry
    ///
    /// # Arguments
    /// * `payload` - The entry as sent on the wire
    ///
    /// # Returns
    /// The entry as stored by the server
    pub async fn ingest(&self, payload: &Value) -> Result<LogEntry> {
        let url = format!("{}/logs", self.base_url);
        let response = self
            .client
            .post(&url)
            .json(payload)
            .send()
            .await
            .context("Failed to send ingest request")?;

        self.handle_response(response).await
    }

    /// Handle API response and deserialize JSON
    ///
    /// Error bodies of the form `{"error": "..."}` are unwrapped into the
    /// returned error.
    async fn handle_response<T: serde::de::DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T> {
        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorBody>(&error_text)
                .map_or(error_text, |body| body.error);
            bail!("Request failed with status {}: {}", status, message);
        }

        response
            .json()
            .await
            .context("Failed to parse response JSON")
    }
}
