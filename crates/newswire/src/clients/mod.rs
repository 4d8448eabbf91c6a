//! Remote Source Clients
//!
//! Thin clients over the third-party news and web-search APIs. Response
//! bodies are consumed as opaque JSON payloads; their field-level shapes
//! belong to the upstream services.

pub mod newsapi;
pub mod serpapi;

pub use newsapi::{NewsApiClient, NewsSource};
pub use serpapi::{SerpApiClient, WebSearchSource};
