//! News Tools
//!
//! `search_news` and `get_top_headlines`, backed by a [`NewsSource`].
//! Defaults (language, country, page size, timeout) come from the shared
//! configuration at call time.

use std::sync::Arc;

use async_trait::async_trait;

use gateway_core::{
    Result as CoreResult, Tool, ToolCall, ToolResult, ToolSchema, tool::ParameterSpec,
};

use crate::clients::{NewsSource, newsapi::MAX_PAGE_SIZE};
use crate::config::SharedConfig;

fn article_count(payload: &serde_json::Value) -> usize {
    payload["articles"].as_array().map_or(0, Vec::len)
}

fn clamped_page_size(call: &ToolCall, default: u32) -> u32 {
    let requested = call
        .int_arg("page_size")
        .and_then(|n| u32::try_from(n).ok())
        .unwrap_or(default);
    requested.clamp(1, MAX_PAGE_SIZE)
}

/// Tool for searching news articles
pub struct SearchNewsTool {
    source: Arc<dyn NewsSource>,
    config: SharedConfig,
}

impl SearchNewsTool {
    pub fn new(source: Arc<dyn NewsSource>, config: SharedConfig) -> Self {
        Self { source, config }
    }
}

#[async_trait]
impl Tool for SearchNewsTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "search_news".into(),
            description: "Search news articles matching a query.".into(),
            parameters: vec![
                ParameterSpec::required("query", "string", "Search query"),
                ParameterSpec::optional("language", "string", "Language code (e.g., 'en')"),
                ParameterSpec::optional(
                    "sort_by",
                    "string",
                    "Sort order: relevancy, popularity, or publishedAt",
                ),
                ParameterSpec::optional("page_size", "number", "Number of articles (max 100)"),
            ],
        }
    }

    async fn execute(&self, call: &ToolCall) -> CoreResult<ToolResult> {
        let query = call.str_arg("query").ok_or_else(|| {
            gateway_core::GatewayError::ToolValidation("query must be a string".into())
        })?;

        let (default_language, default_page_size, timeout) = {
            let cfg = self.config.read().unwrap();
            (cfg.default_language.clone(), cfg.max_articles, cfg.timeout())
        };

        let language = call.str_arg("language").unwrap_or(&default_language);
        let sort_by = call.str_arg("sort_by").unwrap_or("publishedAt");
        let page_size = clamped_page_size(call, default_page_size);

        let payload = self
            .source
            .search(query, language, sort_by, page_size, timeout)
            .await?;

        let output = format!("Found {} articles for '{query}'", article_count(&payload));
        Ok(ToolResult::success("search_news", output).with_data(payload))
    }
}

/// Tool for fetching top headlines
pub struct TopHeadlinesTool {
    source: Arc<dyn NewsSource>,
    config: SharedConfig,
}

impl TopHeadlinesTool {
    pub fn new(source: Arc<dyn NewsSource>, config: SharedConfig) -> Self {
        Self { source, config }
    }
}

#[async_trait]
impl Tool for TopHeadlinesTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "get_top_headlines".into(),
            description: "Get current top headlines, optionally filtered by country and category."
                .into(),
            parameters: vec![
                ParameterSpec::optional("country", "string", "Country code (e.g., 'us')"),
                ParameterSpec::optional(
                    "category",
                    "string",
                    "Category: business, entertainment, health, science, sports, technology",
                ),
                ParameterSpec::optional("page_size", "number", "Number of articles (max 100)"),
            ],
        }
    }

    async fn execute(&self, call: &ToolCall) -> CoreResult<ToolResult> {
        let (default_country, default_page_size, timeout) = {
            let cfg = self.config.read().unwrap();
            (cfg.default_country.clone(), cfg.max_articles, cfg.timeout())
        };

        let country = call.str_arg("country").unwrap_or(&default_country);
        let category = call.str_arg("category");
        let page_size = clamped_page_size(call, default_page_size);

        let payload = self
            .source
            .top_headlines(country, category, page_size, timeout)
            .await?;

        let output = format!(
            "Fetched {} top headlines for '{country}'",
            article_count(&payload)
        );
        Ok(ToolResult::success("get_top_headlines", output).with_data(payload))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config;
    use crate::error::{NewswireError, Result};
    use gateway_core::GatewayError;
    use serde_json::{Value, json};
    use std::time::Duration;

    struct CannedNewsSource;

    #[async_trait]
    impl NewsSource for CannedNewsSource {
        async fn search(
            &self,
            query: &str,
            language: &str,
            _sort_by: &str,
            page_size: u32,
            _timeout: Duration,
        ) -> Result<Value> {
            Ok(json!({
                "articles": [{"title": format!("{query} ({language}, {page_size})")}],
                "totalResults": 1,
            }))
        }

        async fn top_headlines(
            &self,
            country: &str,
            _category: Option<&str>,
            _page_size: u32,
            _timeout: Duration,
        ) -> Result<Value> {
            Ok(json!({ "articles": [{"title": format!("headline for {country}")}] }))
        }
    }

    struct KeylessSource;

    #[async_trait]
    impl NewsSource for KeylessSource {
        async fn search(
            &self,
            _query: &str,
            _language: &str,
            _sort_by: &str,
            _page_size: u32,
            _timeout: Duration,
        ) -> Result<Value> {
            Err(NewswireError::MissingCredential("NEWSAPI_KEY".into()))
        }

        async fn top_headlines(
            &self,
            _country: &str,
            _category: Option<&str>,
            _page_size: u32,
            _timeout: Duration,
        ) -> Result<Value> {
            Err(NewswireError::MissingCredential("NEWSAPI_KEY".into()))
        }
    }

    #[tokio::test]
    async fn test_search_news_uses_config_defaults() {
        let tool = SearchNewsTool::new(
            Arc::new(CannedNewsSource),
            config::shared(Default::default()),
        );

        let call = ToolCall::new("search_news").with_arg("query", json!("rust"));
        let result = tool.execute(&call).await.unwrap();

        assert!(result.success);
        assert!(result.output.contains("1 articles"));
        // Defaults flowed through: language "en", page size 20.
        let title = result.data.unwrap()["articles"][0]["title"].clone();
        assert_eq!(title, json!("rust (en, 20)"));
    }

    #[tokio::test]
    async fn test_page_size_is_clamped() {
        let tool = SearchNewsTool::new(
            Arc::new(CannedNewsSource),
            config::shared(Default::default()),
        );

        let call = ToolCall::new("search_news")
            .with_arg("query", json!("rust"))
            .with_arg("page_size", json!(5000));
        let result = tool.execute(&call).await.unwrap();

        let title = result.data.unwrap()["articles"][0]["title"].clone();
        assert_eq!(title, json!("rust (en, 100)"));
    }

    #[tokio::test]
    async fn test_missing_credential_surfaces_as_config_error() {
        let tool = TopHeadlinesTool::new(Arc::new(KeylessSource), config::shared(Default::default()));

        let err = tool.execute(&ToolCall::new("get_top_headlines")).await.unwrap_err();
        assert!(matches!(err, GatewayError::Config(_)));
    }

    #[tokio::test]
    async fn test_headlines_respect_country_argument() {
        let tool = TopHeadlinesTool::new(
            Arc::new(CannedNewsSource),
            config::shared(Default::default()),
        );

        let call = ToolCall::new("get_top_headlines").with_arg("country", json!("gb"));
        let result = tool.execute(&call).await.unwrap();

        assert!(result.output.contains("'gb'"));
    }
}
