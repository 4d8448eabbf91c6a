//! # newswire
//!
//! News, web search, RSS, and calendar capabilities for the conversational
//! gateway. This crate owns the domain side of the system:
//!
//! - Remote source clients (NewsAPI, SerpAPI) consumed as opaque payloads
//! - Bounded-concurrency feed fetching with per-source failure isolation
//!   and an SSRF target guard
//! - An in-memory calendar event book
//! - The shared runtime configuration context
//! - The eight catalog tools registered with the gateway
//!
//! ## Fan-out model
//!
//! ```text
//! urls ──► guard ──► [Semaphore(C)] ──► transport ──► parse
//!   │        │                             │
//!   │        └─ rejected: Err, no network  └─ failure isolated per task
//!   └──────────── output order == input order ────────────► aggregate
//! ```

pub mod calendar;
pub mod clients;
pub mod config;
pub mod error;
pub mod feed;
pub mod fetch;
pub mod tools;

pub use calendar::{CalendarEvent, EventBook, NewEvent};
pub use config::{ConfigDelta, GatewayConfig, SharedConfig};
pub use error::{NewswireError, Result};
pub use feed::{FeedAggregator, FeedSummary, parse_feed};
pub use fetch::{AggregateResult, ConcurrentFetcher, FetchResult, FetchTask};

/// System prompt for the news gateway agent
pub const NEWSWIRE_PROMPT: &str = r#"You are a helpful news and information assistant.

You can search news articles, fetch top headlines, search the web, parse RSS
feeds, and manage a simple calendar of events.

## How to respond

- Answer directly when no external data is needed.
- To call a tool, reply with a single JSON object in this exact format:
  {"action": "use_tool", "tool": "tool_name", "arguments": {"arg": "value"}}
- After receiving tool results, summarize them for the user in plain language.
- Dates use YYYY-MM-DD and times use HH:MM (24-hour).
- If a tool reports an error, explain it briefly and suggest what to try next.

Never invent articles, search results, or events. Only report what the tools
returned."#;
