//! RSS Tool
//!
//! `parse_rss_feed`: guard the target, fetch it once, and summarize the
//! feed. Multi-feed aggregation goes through
//! [`FeedAggregator::fetch_feeds`](crate::feed::FeedAggregator) instead.

use async_trait::async_trait;

use gateway_core::{
    Result as CoreResult, Tool, ToolCall, ToolResult, ToolSchema, tool::ParameterSpec,
};

use crate::config::SharedConfig;
use crate::feed::FeedAggregator;

const DEFAULT_MAX_ENTRIES: usize = 10;

/// Tool for parsing one RSS/Atom feed
pub struct ParseRssFeedTool {
    aggregator: FeedAggregator,
    config: SharedConfig,
}

impl ParseRssFeedTool {
    pub fn new(aggregator: FeedAggregator, config: SharedConfig) -> Self {
        Self { aggregator, config }
    }
}

#[async_trait]
impl Tool for ParseRssFeedTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "parse_rss_feed".into(),
            description: "Fetch and parse an RSS or Atom feed.".into(),
            parameters: vec![
                ParameterSpec::required("url", "string", "Feed URL (http or https)"),
                ParameterSpec::optional("max_entries", "number", "Maximum entries to return"),
            ],
        }
    }

    async fn execute(&self, call: &ToolCall) -> CoreResult<ToolResult> {
        let url = call.str_arg("url").ok_or_else(|| {
            gateway_core::GatewayError::ToolValidation("url must be a string".into())
        })?;

        let timeout = self.config.read().unwrap().timeout();
        let max_entries = call
            .int_arg("max_entries")
            .and_then(|n| usize::try_from(n).ok())
            .filter(|&n| n > 0)
            .unwrap_or(DEFAULT_MAX_ENTRIES);

        let summary = self.aggregator.fetch_single(url, timeout, max_entries).await?;

        let output = format!(
            "Parsed feed '{}' ({} entries)",
            summary.feed_title, summary.total_entries
        );
        let data = serde_json::to_value(&summary)
            .map_err(gateway_core::GatewayError::from)?;
        Ok(ToolResult::success("parse_rss_feed", output).with_data(data))
    }
}
