//! HTTP client for the file-storage service.
//!
//! Fetches raw file content with `GET {base_url}/api/files/{id}`.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use tracing::debug;
use uuid::Uuid;

use docstat_core::{defaults, ContentSource, Error, Result};

/// Connection settings for the file-storage service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentClientConfig {
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for ContentClientConfig {
    fn default() -> Self {
        Self {
            base_url: defaults::STORAGE_SERVICE_URL.to_string(),
            timeout_secs: defaults::STORAGE_TIMEOUT_SECS,
        }
    }
}

impl ContentClientConfig {
    /// Read `STORAGE_SERVICE_URL` and `STORAGE_TIMEOUT_SECS`.
    pub fn from_env() -> Self {
        let base_url = std::env::var("STORAGE_SERVICE_URL")
            .unwrap_or_else(|_| defaults::STORAGE_SERVICE_URL.to_string());
        let timeout_secs = std::env::var("STORAGE_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(defaults::STORAGE_TIMEOUT_SECS);
        Self {
            base_url,
            timeout_secs,
        }
    }
}

/// [`ContentSource`] backed by the file-storage service's HTTP API.
#[derive(Clone)]
pub struct HttpContentSource {
    client: Client,
    base_url: String,
}

impl HttpContentSource {
    pub fn new(config: ContentClientConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| Error::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn from_env() -> Result<Self> {
        Self::new(ContentClientConfig::from_env())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn file_url(&self, file_id: Uuid) -> String {
        format!("{}/api/files/{}", self.base_url, file_id)
    }
}

#[async_trait]
impl ContentSource for HttpContentSource {
    async fn fetch_text(&self, file_id: Uuid) -> Result<String> {
        let start = Instant::now();

        let response = self
            .client
            .get(self.file_url(file_id))
            .send()
            .await
            .map_err(|e| {
                Error::UpstreamUnavailable(format!("Content store request failed: {}", e))
            })?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(Error::FileNotFound(file_id));
        }
        if status.is_server_error() {
            return Err(Error::UpstreamUnavailable(format!(
                "Content store returned {}",
                status
            )));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Request(format!(
                "Content store returned {}: {}",
                status, body
            )));
        }

        let bytes = response.bytes().await.map_err(|e| {
            Error::UpstreamUnavailable(format!("Failed to read content store response: {}", e))
        })?;
        let text = String::from_utf8(bytes.to_vec()).map_err(|_| {
            Error::InvalidInput(format!("File {} is not valid UTF-8 text", file_id))
        })?;

        debug!(
            subsystem = "analysis",
            component = "content_client",
            op = "fetch",
            file_id = %file_id,
            size_bytes = text.len(),
            duration_ms = start.elapsed().as_millis() as u64,
            "Fetched file content"
        );
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ContentClientConfig::default();
        assert_eq!(config.base_url, "http://localhost:8081");
        assert_eq!(config.timeout_secs, 10);
    }

    #[test]
    fn test_file_url_strips_trailing_slash() {
        let client = HttpContentSource::new(ContentClientConfig {
            base_url: "http://storage:8081/".to_string(),
            timeout_secs: 1,
        })
        .unwrap();
        assert_eq!(client.base_url(), "http://storage:8081");
        assert_eq!(
            client.file_url(Uuid::nil()),
            "http://storage:8081/api/files/00000000-0000-0000-0000-000000000000"
        );
    }
}
