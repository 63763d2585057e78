//! Crawler coordinator - mode orchestration
//!
//! This module wires the crawler's building blocks into the four crawl
//! modes:
//! - `links`: fetch one page and record its links
//! - `traverse`: breadth-first discovery from a seed, recording every URL
//! - `content`: fetch one page and record its content
//! - `site`: sitemap (or traversal) discovery followed by a parallel fetch
//!   of every discovered page

use crate::config::{validate, Config, RunConfig};
use crate::crawler::fetcher::{build_http_client, CrawlResult, HttpFetcher, PageFetcher};
use crate::crawler::frontier::Frontier;
use crate::crawler::runner::run_parallel;
use crate::output::{validate_run_key, JsonlSink, OutputSink};
use crate::robots::{is_disallowed, RobotsCache, RobotsPolicy};
use crate::sitemap::SitemapDiscoverer;
use crate::url::{domain_of, is_valid_url, normalize_url};
use crate::{CrawlerError, Result};
use reqwest::Client;
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use tokio::sync::Mutex;

/// What a crawl run does with its seed URL
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrawlMode {
    /// Record the links of a single page
    Links,
    /// Record every URL found by breadth-first traversal
    Traverse,
    /// Record the content of a single page
    Content,
    /// Discover the whole site and record the content of every page
    Site,
}

impl FromStr for CrawlMode {
    type Err = CrawlerError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "links" => Ok(Self::Links),
            "traverse" => Ok(Self::Traverse),
            "content" => Ok(Self::Content),
            "site" => Ok(Self::Site),
            _ => Err(CrawlerError::UnknownMode(s.to_string())),
        }
    }
}

impl fmt::Display for CrawlMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Links => "links",
            Self::Traverse => "traverse",
            Self::Content => "content",
            Self::Site => "site",
        };
        f.write_str(name)
    }
}

/// Fetch counts for a finished run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunReport {
    pub attempted: usize,
    pub succeeded: usize,
    pub failed: usize,
}

impl RunReport {
    /// Tallies a batch of fetch results
    pub fn from_results(results: &[CrawlResult]) -> Self {
        let succeeded = results.iter().filter(|r| r.success).count();
        Self {
            attempted: results.len(),
            succeeded,
            failed: results.len() - succeeded,
        }
    }
}

/// Main crawler coordinator structure
pub struct Coordinator {
    config: Arc<Config>,
    run_config: RunConfig,
    fetcher: Arc<dyn PageFetcher>,
    sink: Arc<dyn OutputSink>,
    robots: RobotsPolicy,
    robots_cache: Mutex<RobotsCache>,
    sitemaps: SitemapDiscoverer,
}

impl Coordinator {
    /// Creates a new coordinator instance
    ///
    /// # Arguments
    ///
    /// * `config` - The crawler configuration, validated here
    /// * `fetcher` - Page fetcher used for every page visit
    /// * `sink` - Destination for discovered links and content
    ///
    /// # Returns
    ///
    /// * `Ok(Coordinator)` - Successfully created coordinator
    /// * `Err(CrawlerError)` - Invalid configuration or HTTP client failure
    pub fn new(
        config: Config,
        fetcher: Arc<dyn PageFetcher>,
        sink: Arc<dyn OutputSink>,
    ) -> Result<Self> {
        validate(&config)?;
        let client = build_http_client(&config.user_agent, config.crawler.request_timeout())?;
        Ok(Self::with_client(config, client, fetcher, sink))
    }

    /// Creates a coordinator that fetches over HTTP and writes to the
    /// configured data directory
    ///
    /// Pages, robots.txt and sitemaps all go through one HTTP client.
    pub fn with_http_fetcher(config: Config) -> Result<Self> {
        validate(&config)?;
        let client = build_http_client(&config.user_agent, config.crawler.request_timeout())?;
        let fetcher = Arc::new(HttpFetcher::new(client.clone()));
        let sink = Arc::new(JsonlSink::new(&config.output.data_dir));
        Ok(Self::with_client(config, client, fetcher, sink))
    }

    /// Assembles a coordinator around an already validated config
    fn with_client(
        config: Config,
        client: Client,
        fetcher: Arc<dyn PageFetcher>,
        sink: Arc<dyn OutputSink>,
    ) -> Self {
        Self {
            run_config: config.crawler.run_config(),
            config: Arc::new(config),
            fetcher,
            sink,
            robots: RobotsPolicy::new(client.clone()),
            robots_cache: Mutex::new(RobotsCache::new()),
            sitemaps: SitemapDiscoverer::new(client),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn run_config(&self) -> &RunConfig {
        &self.run_config
    }

    /// Runs one crawl in the given mode
    ///
    /// For `site` mode the report counts the content fetches only, not the
    /// discovery fetches that preceded them.
    pub async fn run(&self, mode: CrawlMode, url: &str, run_key: &str) -> Result<RunReport> {
        validate_run_key(run_key)?;
        tracing::info!("Starting {} crawl of {} (run key: {})", mode, url, run_key);

        let report = match mode {
            CrawlMode::Links => {
                let result = self.collect_page_links(url, run_key).await?;
                RunReport::from_results(std::slice::from_ref(&result))
            }
            CrawlMode::Traverse => self.discover_site(url, run_key).await?,
            CrawlMode::Content => {
                let results = self.crawl_urls(vec![url.trim().to_string()], run_key).await?;
                RunReport::from_results(&results)
            }
            CrawlMode::Site => {
                let results = self.crawl_site(url, run_key).await?;
                RunReport::from_results(&results)
            }
        };

        tracing::info!(
            "Finished {} crawl of {}: {} attempted, {} succeeded, {} failed",
            mode,
            url,
            report.attempted,
            report.succeeded,
            report.failed
        );

        Ok(report)
    }

    /// Fetches one page and appends each distinct valid link it contains
    ///
    /// Links are normalized before validation. With `same-origin-only` set,
    /// only links on the page's own domain are written. A failed fetch is
    /// logged and returned; nothing is written for it.
    pub async fn collect_page_links(&self, url: &str, run_key: &str) -> Result<CrawlResult> {
        validate_run_key(run_key)?;

        let result = self.fetcher.fetch(url).await;
        if !result.success {
            tracing::warn!(
                "Failed to fetch {}: {}",
                url,
                result.error.as_deref().unwrap_or("unknown error")
            );
            return Ok(result);
        }

        let page_domain = domain_of(url);
        let mut written = HashSet::new();
        for link in &result.links {
            let normalized = normalize_url(link);
            if !is_valid_url(&normalized) || written.contains(&normalized) {
                continue;
            }
            if self.run_config.same_origin_only
                && (page_domain.is_none() || domain_of(&normalized) != page_domain)
            {
                tracing::trace!("Skipping off-site link: {}", normalized);
                continue;
            }
            self.sink.append_link(run_key, &normalized)?;
            written.insert(normalized);
        }

        tracing::info!("Recorded {} links from {}", written.len(), url);
        Ok(result)
    }

    /// Traverses the site breadth-first and appends every discovered URL
    pub async fn discover_site(&self, seed: &str, run_key: &str) -> Result<RunReport> {
        validate_run_key(run_key)?;

        let mut frontier = Frontier::new(seed, self.run_config.clone());
        frontier.run(self.fetcher.as_ref()).await;

        let mut urls: Vec<&String> = frontier.results().iter().collect();
        urls.sort();
        for url in urls {
            self.sink.append_link(run_key, url)?;
        }

        Ok(RunReport {
            attempted: frontier.fetched(),
            succeeded: frontier.fetched() - frontier.failed(),
            failed: frontier.failed(),
        })
    }

    /// Fetches every URL through the bounded parallel runner
    ///
    /// Content of each successful fetch is appended as soon as that fetch
    /// completes. A page whose content cannot be written is reported as a
    /// failed result.
    ///
    /// # Returns
    ///
    /// One result per input URL, in input order
    pub async fn crawl_urls(&self, urls: Vec<String>, run_key: &str) -> Result<Vec<CrawlResult>> {
        validate_run_key(run_key)?;

        tracing::info!(
            "Fetching {} pages ({} at a time)",
            urls.len(),
            self.run_config.concurrency_limit
        );

        let fetcher = Arc::clone(&self.fetcher);
        let sink = Arc::clone(&self.sink);
        let run_key: Arc<str> = Arc::from(run_key);

        let results = run_parallel(
            urls,
            self.run_config.politeness_delay,
            self.run_config.concurrency_limit,
            move |url| {
                let fetcher = Arc::clone(&fetcher);
                let sink = Arc::clone(&sink);
                let run_key = Arc::clone(&run_key);

                async move {
                    let result = fetcher.fetch(&url).await;
                    if !result.success {
                        tracing::warn!(
                            "Failed: {} - {}",
                            url,
                            result.error.as_deref().unwrap_or("unknown error")
                        );
                        return result;
                    }

                    let content = result.content.as_deref().unwrap_or_default();
                    if let Err(e) = sink.append_content(&run_key, content) {
                        tracing::warn!("Fetched {} but could not write it: {}", url, e);
                        return CrawlResult::failure(url, format!("Fetched but not written: {}", e));
                    }

                    tracing::debug!("Successfully crawled: {}", url);
                    result
                }
            },
        )
        .await;

        Ok(results)
    }

    /// Discovers a site's pages and fetches all of them
    ///
    /// # Site Flow
    ///
    /// 1. Expand the site's sitemap into page URLs, normalized and
    ///    validated like traversal results
    /// 2. If the sitemap yields nothing, traverse from the seed instead
    ///    (the normalized seed is included)
    /// 3. Drop robots-disallowed URLs when `respect-robots` is enabled
    /// 4. Fetch the sorted URL list with [`Coordinator::crawl_urls`]
    pub async fn crawl_site(&self, url: &str, run_key: &str) -> Result<Vec<CrawlResult>> {
        validate_run_key(run_key)?;

        let mut urls: HashSet<String> = self
            .sitemaps
            .crawl_sitemap(url)
            .await
            .into_iter()
            .map(|loc| normalize_url(&loc))
            .filter(|loc| is_valid_url(loc))
            .collect();

        if urls.is_empty() {
            tracing::info!("No sitemap URLs for {}, falling back to traversal", url);
            let mut frontier = Frontier::new(url, self.run_config.clone());
            frontier.run(self.fetcher.as_ref()).await;
            urls.insert(frontier.seed().to_string());
            urls.extend(frontier.into_results());
        }

        if self.config.crawler.respect_robots {
            urls = self.drop_disallowed(urls).await;
        }

        let mut urls: Vec<String> = urls.into_iter().collect();
        urls.sort();

        self.crawl_urls(urls, run_key).await
    }

    /// Removes URLs matched by their domain's robots.txt disallow rules
    ///
    /// Disallow sets are cached for the lifetime of the coordinator and
    /// refetched once they go stale.
    async fn drop_disallowed(&self, urls: HashSet<String>) -> HashSet<String> {
        let mut cache = self.robots_cache.lock().await;
        let mut kept = HashSet::with_capacity(urls.len());

        for url in urls {
            let domain = match domain_of(&url) {
                Some(d) => d,
                None => {
                    kept.insert(url);
                    continue;
                }
            };

            if is_disallowed(cache.disallowed(&self.robots, &domain).await, &url) {
                tracing::debug!("Disallowed by robots.txt: {}", url);
                continue;
            }
            kept.insert(url);
        }

        tracing::debug!("robots.txt cached for {} domains", cache.len());
        kept
    }
}
