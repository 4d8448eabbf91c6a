//! Bounded Concurrent Fetcher
//!
//! Retrieves N independent targets under a global concurrency cap,
//! returning exactly one result per input, in input order. Each task's
//! failure (guard rejection, timeout, transport error) is converted to a
//! terminal `Err` entry at the task boundary and never disturbs siblings;
//! the call is a single join point that returns only once every task is
//! terminal.

use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;
use tokio::sync::Semaphore;

use super::guard::check_target;
use super::transport::Transport;

/// One fetch target with its per-request timeout
#[derive(Clone, Debug)]
pub struct FetchTask {
    pub target: String,
    pub timeout: Duration,
}

impl FetchTask {
    pub fn new(target: impl Into<String>, timeout: Duration) -> Self {
        Self {
            target: target.into(),
            timeout,
        }
    }
}

/// Terminal outcome for one target
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FetchResult {
    pub target: String,
    pub outcome: Result<String, String>,
}

impl FetchResult {
    pub fn is_ok(&self) -> bool {
        self.outcome.is_ok()
    }
}

/// Results for a whole fan-out call; order equals input order and
/// `total` always equals the input task count.
#[derive(Clone, Debug)]
pub struct AggregateResult {
    pub results: Vec<FetchResult>,
    pub total: usize,
}

/// Bounded fan-out fetcher
pub struct ConcurrentFetcher {
    transport: Arc<dyn Transport>,
    limit: usize,
}

impl ConcurrentFetcher {
    /// Create a fetcher with a concurrency cap (clamped to at least 1)
    pub fn new(transport: Arc<dyn Transport>, limit: usize) -> Self {
        Self {
            transport,
            limit: limit.max(1),
        }
    }

    /// Fetch every task, returning one result per input in input order.
    pub async fn fetch_all(&self, tasks: Vec<FetchTask>) -> AggregateResult {
        let total = tasks.len();
        // Tokio's semaphore is fair: waiters are admitted FIFO as slots
        // free on task termination.
        let gate = Arc::new(Semaphore::new(self.limit));

        let futures = tasks.into_iter().map(|task| {
            let transport = Arc::clone(&self.transport);
            let gate = Arc::clone(&gate);

            async move {
                let outcome = run_task(transport, gate, &task).await;
                if let Err(ref reason) = outcome {
                    tracing::debug!(target = %task.target, reason = %reason, "fetch task failed");
                }
                FetchResult {
                    target: task.target,
                    outcome,
                }
            }
        });

        // join_all preserves input order regardless of completion order.
        let results = join_all(futures).await;
        AggregateResult { results, total }
    }
}

async fn run_task(
    transport: Arc<dyn Transport>,
    gate: Arc<Semaphore>,
    task: &FetchTask,
) -> Result<String, String> {
    // Rejected targets terminate before admission and before any network
    // access.
    if check_target(&task.target).is_err() {
        return Err("unsafe target".into());
    }

    let _permit = gate
        .acquire_owned()
        .await
        .map_err(|_| "fetcher shut down".to_string())?;

    match tokio::time::timeout(task.timeout, transport.get(&task.target, task.timeout)).await {
        Ok(Ok(body)) => Ok(body),
        Ok(Err(e)) => Err(e.to_string()),
        Err(_) => Err(format!(
            "request timed out after {:.1}s",
            task.timeout.as_secs_f64()
        )),
    }
}
