//! SerpAPI Client
//!
//! Google web search via serpapi.com. The API key comes from
//! `SERPAPI_KEY`; a missing key surfaces as a configuration error before
//! any request is made.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::{NewswireError, Result};

const SEARCH_URL: &str = "https://serpapi.com/search";

/// Maximum result count SerpAPI accepts
pub const MAX_RESULTS: u32 = 100;

/// Web search backend abstraction
#[async_trait]
pub trait WebSearchSource: Send + Sync {
    /// Run a web search
    async fn search(
        &self,
        query: &str,
        num_results: u32,
        location: Option<&str>,
        timeout: Duration,
    ) -> Result<Value>;
}

/// Live SerpAPI client
pub struct SerpApiClient {
    client: reqwest::Client,
    api_key: Option<String>,
}

impl SerpApiClient {
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
        }
    }

    /// Read the API key from `SERPAPI_KEY`
    pub fn from_env() -> Self {
        Self::new(std::env::var("SERPAPI_KEY").ok())
    }

    fn key(&self) -> Result<&str> {
        self.api_key
            .as_deref()
            .filter(|k| !k.is_empty())
            .ok_or_else(|| NewswireError::MissingCredential("SERPAPI_KEY".into()))
    }
}

#[async_trait]
impl WebSearchSource for SerpApiClient {
    async fn search(
        &self,
        query: &str,
        num_results: u32,
        location: Option<&str>,
        timeout: Duration,
    ) -> Result<Value> {
        let key = self.key()?;
        let mut params = vec![
            ("q", query.to_string()),
            ("num", num_results.min(MAX_RESULTS).to_string()),
            ("api_key", key.to_string()),
            ("engine", "google".to_string()),
        ];
        if let Some(location) = location {
            params.push(("location", location.to_string()));
        }

        tracing::debug!(query, "searching web");
        let response = self
            .client
            .get(SEARCH_URL)
            .query(&params)
            .timeout(timeout)
            .send()
            .await?
            .error_for_status()?;

        let payload = response.json::<Value>().await?;
        Ok(payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_key_is_a_config_error_without_network() {
        let client = SerpApiClient::new(None);
        let err = client
            .search("rust", 10, None, Duration::from_secs(1))
            .await
            .unwrap_err();
        assert!(matches!(err, NewswireError::MissingCredential(_)));
    }
}
