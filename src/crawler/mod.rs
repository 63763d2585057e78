//! Crawler module for page fetching and traversal
//!
//! This module contains the core crawling logic, including:
//! - The page fetcher capability and its HTTP implementation
//! - HTML link and text extraction
//! - Breadth-first frontier traversal
//! - Bounded parallel fetching with a politeness delay
//! - Mode orchestration

mod coordinator;
mod fetcher;
mod frontier;
mod parser;
mod runner;

pub use coordinator::{Coordinator, CrawlMode, RunReport};
pub use fetcher::{build_http_client, fetch_bytes, CrawlResult, HttpFetcher, PageFetcher};
pub use frontier::{traverse, Frontier, FrontierEntry, FrontierState};
pub use parser::{parse_html, ParsedPage};
pub use runner::run_parallel;

use crate::config::Config;
use crate::Result;

/// Runs a complete crawl operation
///
/// This is the main entry point for starting a crawl. It will:
/// 1. Validate the configuration
/// 2. Build the HTTP client, fetcher and output sink
/// 3. Run the requested mode against `url`
///
/// # Arguments
///
/// * `config` - The crawler configuration
/// * `mode` - Which crawl to perform
/// * `url` - Seed URL
/// * `run_key` - Names the output files of this run
///
/// # Example
///
/// ```no_run
/// use site_trawler::config::Config;
/// use site_trawler::crawler::{crawl, CrawlMode};
///
/// # async fn example() -> site_trawler::Result<()> {
/// let report = crawl(Config::default(), CrawlMode::Site, "https://example.com", "docs").await?;
/// println!("{} pages written", report.succeeded);
/// # Ok(())
/// # }
/// ```
pub async fn crawl(config: Config, mode: CrawlMode, url: &str, run_key: &str) -> Result<RunReport> {
    let coordinator = Coordinator::with_http_fetcher(config)?;
    coordinator.run(mode, url, run_key).await
}
