//! Feed Parsing & Aggregation
//!
//! Turns raw RSS/Atom payloads into a compact summary, and aggregates the
//! configured default feeds through the bounded fetcher. Per-feed failures
//! stay inline as `{"url", "error"}` entries; an optional whole-batch
//! deadline aborts the aggregate call with a single top-level error.

use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::config::GatewayConfig;
use crate::error::{NewswireError, Result};
use crate::fetch::{ConcurrentFetcher, FetchTask, Transport, check_target};

/// One entry of a parsed feed
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct FeedEntry {
    pub title: String,
    pub link: String,
    pub description: String,
    pub published: String,
    pub author: String,
}

/// Compact summary of a parsed feed
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FeedSummary {
    pub feed_title: String,
    pub feed_description: String,
    pub entries: Vec<FeedEntry>,
    pub total_entries: usize,
}

/// Parse a feed body, keeping at most `max_entries` entries.
pub fn parse_feed(body: &str, max_entries: usize) -> Result<FeedSummary> {
    let feed = feed_rs::parser::parse(body.as_bytes())
        .map_err(|e| NewswireError::Feed(e.to_string()))?;

    let entries: Vec<FeedEntry> = feed
        .entries
        .iter()
        .take(max_entries)
        .map(|entry| FeedEntry {
            title: entry.title.as_ref().map(|t| t.content.clone()).unwrap_or_default(),
            link: entry.links.first().map(|l| l.href.clone()).unwrap_or_default(),
            description: entry
                .summary
                .as_ref()
                .map(|t| t.content.clone())
                .unwrap_or_default(),
            published: entry.published.map(|d| d.to_rfc2822()).unwrap_or_default(),
            author: entry
                .authors
                .first()
                .map(|p| p.name.clone())
                .unwrap_or_default(),
        })
        .collect();

    Ok(FeedSummary {
        feed_title: feed.title.map(|t| t.content).unwrap_or_default(),
        feed_description: feed.description.map(|t| t.content).unwrap_or_default(),
        total_entries: entries.len(),
        entries,
    })
}

/// Aggregates multiple feeds through the bounded fetcher
#[derive(Clone)]
pub struct FeedAggregator {
    transport: Arc<dyn Transport>,
}

impl FeedAggregator {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Fetch and summarize one feed (guard, fetch, parse).
    pub async fn fetch_single(
        &self,
        url: &str,
        timeout: Duration,
        max_entries: usize,
    ) -> Result<FeedSummary> {
        check_target(url)?;
        let body = self.transport.get(url, timeout).await?;
        parse_feed(&body, max_entries)
    }

    /// Fetch every feed under the concurrency cap and render the aggregate
    /// shape `{"feeds": [...], "total_feeds": N}` in input order.
    pub async fn fetch_feeds(
        &self,
        urls: &[String],
        max_concurrent: usize,
        timeout: Duration,
        max_entries: usize,
    ) -> Value {
        let fetcher = ConcurrentFetcher::new(Arc::clone(&self.transport), max_concurrent);
        let tasks = urls
            .iter()
            .map(|url| FetchTask::new(url.clone(), timeout))
            .collect();

        let aggregate = fetcher.fetch_all(tasks).await;

        let feeds: Vec<Value> = aggregate
            .results
            .into_iter()
            .map(|result| match result.outcome {
                Ok(body) => match parse_feed(&body, max_entries) {
                    Ok(summary) => json!({ "url": result.target, "data": summary }),
                    Err(e) => json!({ "url": result.target, "error": e.to_string() }),
                },
                Err(reason) => json!({ "url": result.target, "error": reason }),
            })
            .collect();

        json!({ "feeds": feeds, "total_feeds": aggregate.total })
    }

    /// Aggregate the configured default feeds under the configured
    /// concurrency cap and per-request timeout.
    pub async fn fetch_default_feeds(
        &self,
        config: &GatewayConfig,
        max_entries: usize,
    ) -> Value {
        self.fetch_feeds(
            &config.default_rss_feeds,
            config.max_concurrent_requests,
            config.timeout(),
            max_entries,
        )
        .await
    }

    /// Like [`fetch_feeds`](Self::fetch_feeds), but the whole batch is
    /// subject to one deadline; exceeding it aborts the batch with a single
    /// top-level error.
    pub async fn fetch_feeds_within(
        &self,
        urls: &[String],
        max_concurrent: usize,
        timeout: Duration,
        max_entries: usize,
        deadline: Duration,
    ) -> Result<Value> {
        let result = tokio::time::timeout(
            deadline,
            self.fetch_feeds(urls, max_concurrent, timeout, max_entries),
        )
        .await?;
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    const RSS_SAMPLE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0">
  <channel>
    <title>Example News</title>
    <description>Canned headlines</description>
    <item>
      <title>First story</title>
      <link>https://news.example.com/1</link>
      <description>Something happened</description>
      <pubDate>Sat, 01 Mar 2025 09:00:00 GMT</pubDate>
    </item>
    <item>
      <title>Second story</title>
      <link>https://news.example.com/2</link>
      <description>Something else happened</description>
    </item>
    <item>
      <title>Third story</title>
      <link>https://news.example.com/3</link>
    </item>
  </channel>
</rss>"#;

    struct CannedTransport;

    #[async_trait]
    impl Transport for CannedTransport {
        async fn get(&self, url: &str, _timeout: Duration) -> Result<String> {
            if url.contains("garbage") {
                return Ok("this is not xml".into());
            }
            Ok(RSS_SAMPLE.to_string())
        }
    }

    #[test]
    fn test_parse_feed_summary() {
        let summary = parse_feed(RSS_SAMPLE, 10).unwrap();
        assert_eq!(summary.feed_title, "Example News");
        assert_eq!(summary.feed_description, "Canned headlines");
        assert_eq!(summary.total_entries, 3);
        assert_eq!(summary.entries[0].title, "First story");
        assert_eq!(summary.entries[0].link, "https://news.example.com/1");
    }

    #[test]
    fn test_parse_feed_caps_entries() {
        let summary = parse_feed(RSS_SAMPLE, 2).unwrap();
        assert_eq!(summary.total_entries, 2);
        assert_eq!(summary.entries.len(), 2);
    }

    #[test]
    fn test_malformed_payload_is_an_error_not_a_panic() {
        assert!(matches!(
            parse_feed("<html>not a feed</html>", 5),
            Err(NewswireError::Feed(_))
        ));
    }

    #[tokio::test]
    async fn test_aggregate_shape_preserves_input_order() {
        let aggregator = FeedAggregator::new(Arc::new(CannedTransport));
        let urls = vec![
            "https://feeds.example.com/a.xml".to_string(),
            "http://127.0.0.1/x".to_string(),
            "https://feeds.example.com/b.xml".to_string(),
        ];

        let value = aggregator
            .fetch_feeds(&urls, 2, Duration::from_secs(5), 5)
            .await;

        assert_eq!(value["total_feeds"], 3);
        let feeds = value["feeds"].as_array().unwrap();
        assert_eq!(feeds.len(), 3);
        assert_eq!(feeds[0]["url"], urls[0]);
        assert_eq!(feeds[0]["data"]["feed_title"], "Example News");
        assert_eq!(feeds[1]["error"], "unsafe target");
        assert_eq!(feeds[2]["data"]["total_entries"], 3);
    }

    #[tokio::test]
    async fn test_unparseable_feed_reported_inline() {
        let aggregator = FeedAggregator::new(Arc::new(CannedTransport));
        let urls = vec![
            "https://feeds.example.com/garbage.xml".to_string(),
            "https://feeds.example.com/ok.xml".to_string(),
        ];

        let value = aggregator
            .fetch_feeds(&urls, 2, Duration::from_secs(5), 5)
            .await;

        let feeds = value["feeds"].as_array().unwrap();
        assert!(feeds[0]["error"].is_string());
        assert!(feeds[1]["data"].is_object());
    }

    #[tokio::test]
    async fn test_default_feeds_aggregate_uses_configured_urls() {
        let aggregator = FeedAggregator::new(Arc::new(CannedTransport));
        let config = GatewayConfig::default();

        let value = aggregator.fetch_default_feeds(&config, 5).await;

        assert_eq!(value["total_feeds"], config.default_rss_feeds.len());
        let feeds = value["feeds"].as_array().unwrap();
        for (entry, url) in feeds.iter().zip(&config.default_rss_feeds) {
            assert_eq!(entry["url"], *url);
            assert!(entry["data"].is_object());
        }
    }

    #[tokio::test]
    async fn test_batch_deadline_aborts_with_single_error() {
        struct StalledTransport;

        #[async_trait]
        impl Transport for StalledTransport {
            async fn get(&self, _url: &str, _timeout: Duration) -> Result<String> {
                tokio::time::sleep(Duration::from_secs(60)).await;
                Ok(String::new())
            }
        }

        let aggregator = FeedAggregator::new(Arc::new(StalledTransport));
        let urls = vec!["https://feeds.example.com/a.xml".to_string()];

        let err = aggregator
            .fetch_feeds_within(
                &urls,
                2,
                Duration::from_secs(30),
                5,
                Duration::from_millis(50),
            )
            .await
            .unwrap_err();

        assert!(matches!(err, NewswireError::BatchTimeout));
    }
}
