//! Multi-Source Fetching
//!
//! Bounded fan-out retrieval over independent remote targets with
//! per-source failure isolation, plus the target guard and transport seam
//! it runs on.

mod fetcher;
mod guard;
mod transport;

pub use fetcher::{AggregateResult, ConcurrentFetcher, FetchResult, FetchTask};
pub use guard::check_target;
pub use transport::{HttpTransport, Transport};
