//! NewsAPI Client
//!
//! Article search and top headlines via newsapi.org. The API key comes
//! from `NEWSAPI_KEY`; a missing key surfaces as a configuration error
//! before any request is made.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::{NewswireError, Result};

const EVERYTHING_URL: &str = "https://newsapi.org/v2/everything";
const HEADLINES_URL: &str = "https://newsapi.org/v2/top-headlines";

/// Maximum page size NewsAPI accepts
pub const MAX_PAGE_SIZE: u32 = 100;

/// News backend abstraction (Strategy pattern)
#[async_trait]
pub trait NewsSource: Send + Sync {
    /// Search articles matching a query
    async fn search(
        &self,
        query: &str,
        language: &str,
        sort_by: &str,
        page_size: u32,
        timeout: Duration,
    ) -> Result<Value>;

    /// Fetch top headlines for a country, optionally filtered by category
    async fn top_headlines(
        &self,
        country: &str,
        category: Option<&str>,
        page_size: u32,
        timeout: Duration,
    ) -> Result<Value>;
}

/// Live NewsAPI client
pub struct NewsApiClient {
    client: reqwest::Client,
    api_key: Option<String>,
}

impl NewsApiClient {
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
        }
    }

    /// Read the API key from `NEWSAPI_KEY`
    pub fn from_env() -> Self {
        Self::new(std::env::var("NEWSAPI_KEY").ok())
    }

    fn key(&self) -> Result<&str> {
        self.api_key
            .as_deref()
            .filter(|k| !k.is_empty())
            .ok_or_else(|| NewswireError::MissingCredential("NEWSAPI_KEY".into()))
    }

    async fn get_json(
        &self,
        url: &str,
        params: &[(&str, String)],
        timeout: Duration,
    ) -> Result<Value> {
        let response = self
            .client
            .get(url)
            .query(params)
            .timeout(timeout)
            .send()
            .await?
            .error_for_status()?;

        let payload = response.json::<Value>().await?;
        Ok(payload)
    }
}

#[async_trait]
impl NewsSource for NewsApiClient {
    async fn search(
        &self,
        query: &str,
        language: &str,
        sort_by: &str,
        page_size: u32,
        timeout: Duration,
    ) -> Result<Value> {
        let key = self.key()?;
        let params = [
            ("q", query.to_string()),
            ("language", language.to_string()),
            ("sortBy", sort_by.to_string()),
            ("pageSize", page_size.min(MAX_PAGE_SIZE).to_string()),
            ("apiKey", key.to_string()),
        ];

        tracing::debug!(query, "searching news");
        self.get_json(EVERYTHING_URL, &params, timeout).await
    }

    async fn top_headlines(
        &self,
        country: &str,
        category: Option<&str>,
        page_size: u32,
        timeout: Duration,
    ) -> Result<Value> {
        let key = self.key()?;
        let mut params = vec![
            ("country", country.to_string()),
            ("pageSize", page_size.min(MAX_PAGE_SIZE).to_string()),
            ("apiKey", key.to_string()),
        ];
        if let Some(category) = category {
            params.push(("category", category.to_string()));
        }

        tracing::debug!(country, ?category, "fetching top headlines");
        self.get_json(HEADLINES_URL, &params, timeout).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_key_is_a_config_error_without_network() {
        let client = NewsApiClient::new(None);

        let err = client
            .search("rust", "en", "publishedAt", 10, Duration::from_secs(1))
            .await
            .unwrap_err();
        assert!(matches!(err, NewswireError::MissingCredential(_)));

        let err = client
            .top_headlines("us", None, 10, Duration::from_secs(1))
            .await
            .unwrap_err();
        assert!(matches!(err, NewswireError::MissingCredential(_)));
    }

    #[tokio::test]
    async fn test_empty_key_is_treated_as_missing() {
        let client = NewsApiClient::new(Some(String::new()));
        let err = client
            .search("rust", "en", "publishedAt", 10, Duration::from_secs(1))
            .await
            .unwrap_err();
        assert!(matches!(err, NewswireError::MissingCredential(_)));
    }
}
