//! Thin HTTP client wrapper.
//!
//! Wraps reqwest with a configured connect timeout and user agent, and
//! classifies response statuses for the retry layer.

use crate::config::NetworkConfig;
use crate::{Result, YeastkernError};
use reqwest::{Client, Response, StatusCode};
use std::time::Duration;

/// HTTP client used by the file fetcher.
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    /// Create a new HTTP client with default configuration.
    pub fn new() -> Result<Self> {
        Self::with_connect_timeout(NetworkConfig::CONNECT_TIMEOUT)
    }

    /// Create a new HTTP client with a custom connect timeout.
    pub fn with_connect_timeout(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .connect_timeout(timeout)
            .user_agent(NetworkConfig::USER_AGENT)
            .build()
            .map_err(|e| YeastkernError::Network {
                message: format!("Failed to create HTTP client: {}", e),
                cause: None,
            })?;

        Ok(Self { client })
    }

    /// Get a reference to the underlying reqwest client.
    pub fn inner(&self) -> &Client {
        &self.client
    }

    /// Make a GET request. Transport failures map to [`YeastkernError`];
    /// the response is returned regardless of status, the caller decides.
    pub async fn get(&self, url: &str) -> Result<Response> {
        self.client
            .get(url)
            .send()
            .await
            .map_err(|e| match YeastkernError::from(e) {
                YeastkernError::Network { message, cause } => YeastkernError::Network {
                    message: format!("GET {} failed: {}", url, message),
                    cause,
                },
                other => other,
            })
    }

    /// Check if an HTTP status code indicates a retryable error.
    pub fn is_retryable_status(status: StatusCode) -> bool {
        matches!(status.as_u16(), 408 | 429 | 500 | 502 | 503 | 504)
    }
}
