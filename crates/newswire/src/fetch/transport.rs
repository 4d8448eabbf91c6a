//! Fetch Transport
//!
//! Seam between the fetcher and the network. Tests substitute mock
//! transports; production uses one `reqwest` client, whose connection pool
//! is shared by the tasks of a single fan-out call.

use std::time::Duration;

use async_trait::async_trait;

use crate::error::{NewswireError, Result};

/// Transport trait for retrieving one target body
#[async_trait]
pub trait Transport: Send + Sync {
    /// Fetch the target and return its body as text
    async fn get(&self, url: &str, timeout: Duration) -> Result<String>;
}

/// HTTP transport backed by a shared `reqwest` connection pool
pub struct HttpTransport {
    client: reqwest::Client,
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpTransport {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, url: &str, timeout: Duration) -> Result<String> {
        let response = self
            .client
            .get(url)
            .timeout(timeout)
            .send()
            .await?
            .error_for_status()?;

        let body = response.text().await?;
        Ok(body)
    }
}

impl From<tokio::time::error::Elapsed> for NewswireError {
    fn from(_: tokio::time::error::Elapsed) -> Self {
        NewswireError::BatchTimeout
    }
}
