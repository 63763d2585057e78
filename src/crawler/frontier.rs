//! Breadth-first frontier engine
//!
//! Walks a site from a seed URL one fetch at a time, following links in
//! breadth-first order until the queue drains or the URL budget is spent:
//! - FIFO queue of `(url, depth)` entries
//! - Dedup at dequeue time through a visited set that only grows
//! - Depth bound, URL-count bound, and optional same-origin scoping
//!
//! Every [`Frontier`] owns its queue, visited set and results, so
//! independent traversals can run concurrently without coordination.

use crate::config::RunConfig;
use crate::crawler::fetcher::PageFetcher;
use crate::url::{domain_of, is_valid_url, normalize_url, Domain};
use std::collections::{HashSet, VecDeque};

/// A URL waiting in the frontier queue
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrontierEntry {
    /// Normalized URL
    pub url: String,

    /// Link distance from the seed (the seed is depth 0)
    pub depth: u32,
}

/// Lifecycle of a traversal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrontierState {
    /// Created, nothing fetched yet
    Idle,
    /// Traversal loop in progress
    Running,
    /// Queue drained or URL budget reached
    Done,
}

/// Breadth-first traversal state for a single run
#[derive(Debug)]
pub struct Frontier {
    seed: String,
    seed_domain: Option<Domain>,
    config: RunConfig,
    queue: VecDeque<FrontierEntry>,
    visited: HashSet<String>,
    results: HashSet<String>,
    fetched: usize,
    failed: usize,
    state: FrontierState,
}

impl Frontier {
    /// Creates a traversal rooted at `seed`
    ///
    /// The seed is normalized and queued at depth 0.
    pub fn new(seed: &str, config: RunConfig) -> Self {
        let seed = normalize_url(seed);
        let seed_domain = domain_of(&seed);

        let mut queue = VecDeque::new();
        queue.push_back(FrontierEntry {
            url: seed.clone(),
            depth: 0,
        });

        Self {
            seed,
            seed_domain,
            config,
            queue,
            visited: HashSet::new(),
            results: HashSet::new(),
            fetched: 0,
            failed: 0,
            state: FrontierState::Idle,
        }
    }

    /// Runs the traversal to completion
    ///
    /// # Traversal Loop
    ///
    /// While the queue is non-empty and fewer than `max_urls` results are
    /// accepted:
    /// 1. Dequeue the front entry
    /// 2. Discard it if deeper than `max_depth` or already visited
    /// 3. Mark it visited and fetch it
    /// 4. On failure, log and move on
    /// 5. On success, normalize and validate each link; in-scope links are
    ///    added to the results and queued one level deeper
    ///
    /// Calling this on a finished frontier returns the existing results
    /// without fetching anything.
    pub async fn run<F>(&mut self, fetcher: &F) -> &HashSet<String>
    where
        F: PageFetcher + ?Sized,
    {
        if self.state == FrontierState::Done {
            return &self.results;
        }

        self.state = FrontierState::Running;
        tracing::info!(
            "Starting traversal from {} (max depth {}, max urls {})",
            self.seed,
            self.config.max_depth,
            self.config.max_urls
        );

        while self.results.len() < self.config.max_urls {
            let entry = match self.queue.pop_front() {
                Some(e) => e,
                None => break,
            };

            if entry.depth > self.config.max_depth {
                tracing::trace!("Depth {} exceeds limit: {}", entry.depth, entry.url);
                continue;
            }

            if !self.visited.insert(entry.url.clone()) {
                tracing::trace!("Already visited: {}", entry.url);
                continue;
            }

            tracing::debug!("Crawling ({}): {}", entry.depth, entry.url);
            self.fetched += 1;

            let result = fetcher.fetch(&entry.url).await;
            if !result.success {
                self.failed += 1;
                tracing::warn!(
                    "Failed to crawl {}: {}",
                    entry.url,
                    result.error.as_deref().unwrap_or("unknown error")
                );
                continue;
            }

            self.accept_links(&result.links, entry.depth);
        }

        self.state = FrontierState::Done;
        tracing::info!(
            "Traversal from {} finished: {} urls found, {} pages fetched, {} still queued",
            self.seed,
            self.results.len(),
            self.fetched,
            self.queue.len()
        );

        &self.results
    }

    /// Records and queues the in-scope links of a fetched page
    fn accept_links(&mut self, links: &[String], depth: u32) {
        for link in links {
            if self.results.len() >= self.config.max_urls {
                break;
            }

            let normalized = normalize_url(link);
            if !is_valid_url(&normalized) || !self.in_scope(&normalized) {
                continue;
            }

            self.results.insert(normalized.clone());
            self.queue.push_back(FrontierEntry {
                url: normalized,
                depth: depth + 1,
            });
        }
    }

    /// Same-origin check against the seed's domain
    fn in_scope(&self, url: &str) -> bool {
        if !self.config.same_origin_only {
            return true;
        }

        match (&self.seed_domain, domain_of(url)) {
            (Some(seed), Some(domain)) => *seed == domain,
            _ => false,
        }
    }

    /// The normalized seed URL
    pub fn seed(&self) -> &str {
        &self.seed
    }

    pub fn state(&self) -> FrontierState {
        self.state
    }

    /// URLs dequeued and fetched so far
    pub fn visited(&self) -> &HashSet<String> {
        &self.visited
    }

    /// URLs accepted so far (the seed is not included)
    pub fn results(&self) -> &HashSet<String> {
        &self.results
    }

    /// Number of fetch calls issued
    pub fn fetched(&self) -> usize {
        self.fetched
    }

    /// Fetch calls that reported failure
    pub fn failed(&self) -> usize {
        self.failed
    }

    /// Entries still waiting in the queue
    pub fn queued(&self) -> usize {
        self.queue.len()
    }

    pub fn into_results(self) -> HashSet<String> {
        self.results
    }
}

/// Runs a breadth-first traversal and returns the discovered URLs
///
/// # Arguments
///
/// * `fetcher` - Page fetcher used for every visit
/// * `seed` - Starting URL (depth 0, not part of the result)
/// * `config` - Depth, size and scope bounds
pub async fn traverse<F>(fetcher: &F, seed: &str, config: &RunConfig) -> HashSet<String>
where
    F: PageFetcher + ?Sized,
{
    let mut frontier = Frontier::new(seed, config.clone());
    frontier.run(fetcher).await;
    frontier.into_results()
}
