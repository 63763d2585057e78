//! Bounded parallel runner
//!
//! Applies a fetch task to a list of URLs with at most `concurrency_limit`
//! invocations in flight. Each task waits out the politeness delay after
//! taking its permit, so a single permit spaces requests at least that far
//! apart.

use crate::crawler::fetcher::CrawlResult;
use futures::FutureExt;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

/// Runs `task` once per URL under a concurrency cap
///
/// # Arguments
///
/// * `urls` - URLs to process; duplicates are processed twice
/// * `politeness_delay` - Sleep taken inside each permit before the task runs
/// * `concurrency_limit` - Maximum tasks in flight (values below 1 act as 1)
/// * `task` - The per-URL work, usually a page fetch
///
/// # Returns
///
/// One result per input URL, in input order. A task that panics is
/// reported as a failed result for its URL; the other tasks are unaffected.
///
/// Tasks are owned by a [`JoinSet`]: dropping the returned future aborts
/// every task that has not finished, so nothing is fetched after a caller
/// abandons the run.
pub async fn run_parallel<F, Fut>(
    urls: Vec<String>,
    politeness_delay: Duration,
    concurrency_limit: usize,
    task: F,
) -> Vec<CrawlResult>
where
    F: Fn(String) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = CrawlResult> + Send + 'static,
{
    let limit = concurrency_limit.max(1);
    let semaphore = Arc::new(Semaphore::new(limit));
    let task = Arc::new(task);

    tracing::debug!(
        "Running {} tasks (limit {}, delay {:?})",
        urls.len(),
        limit,
        politeness_delay
    );

    let mut join_set = JoinSet::new();
    for (index, url) in urls.iter().cloned().enumerate() {
        let semaphore = Arc::clone(&semaphore);
        let task = Arc::clone(&task);

        join_set.spawn(async move {
            let _permit = match semaphore.acquire_owned().await {
                Ok(permit) => permit,
                Err(_) => return (index, CrawlResult::failure(url, "Runner semaphore closed")),
            };

            if !politeness_delay.is_zero() {
                tokio::time::sleep(politeness_delay).await;
            }

            // A panic is reported against this URL instead of losing its slot
            let result = match AssertUnwindSafe((*task)(url.clone())).catch_unwind().await {
                Ok(result) => result,
                Err(_) => {
                    tracing::warn!("Task for {} panicked", url);
                    CrawlResult::failure(url, "Task failed: panicked")
                }
            };
            (index, result)
        });
    }

    let mut slots: Vec<Option<CrawlResult>> = vec![None; urls.len()];
    while let Some(joined) = join_set.join_next().await {
        match joined {
            Ok((index, result)) => slots[index] = Some(result),
            Err(e) => tracing::warn!("Runner task did not complete: {}", e),
        }
    }

    urls.into_iter()
        .zip(slots)
        .map(|(url, slot)| {
            slot.unwrap_or_else(|| CrawlResult::failure(url, "Task failed: did not complete"))
        })
        .collect()
}
