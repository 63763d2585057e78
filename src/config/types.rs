use serde::Deserialize;
use std::time::Duration;

/// Main configuration structure for Site-Trawler
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub crawler: CrawlerConfig,
    #[serde(rename = "user-agent", default)]
    pub user_agent: UserAgentConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CrawlerConfig {
    /// Maximum link depth followed from the seed URL
    #[serde(rename = "max-depth")]
    pub max_depth: u32,

    /// Maximum number of URLs a traversal accepts
    #[serde(rename = "max-urls")]
    pub max_urls: usize,

    /// Only follow links that share scheme and host with the seed
    #[serde(rename = "same-origin-only")]
    pub same_origin_only: bool,

    /// Maximum number of page fetches in flight at once
    #[serde(rename = "concurrency-limit")]
    pub concurrency_limit: usize,

    /// Wait before each parallel fetch (milliseconds)
    #[serde(rename = "politeness-delay-ms")]
    pub politeness_delay_ms: u64,

    /// Timeout for every HTTP request (seconds)
    #[serde(rename = "request-timeout-secs")]
    pub request_timeout_secs: u64,

    /// Drop robots.txt-disallowed URLs before a site crawl
    #[serde(rename = "respect-robots")]
    pub respect_robots: bool,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            max_depth: 5,
            max_urls: 1000,
            same_origin_only: true,
            concurrency_limit: 10,
            politeness_delay_ms: 2000,
            request_timeout_secs: 10,
            respect_robots: false,
        }
    }
}

impl CrawlerConfig {
    /// Returns the HTTP request timeout as a Duration
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Builds the immutable per-run settings
    pub fn run_config(&self) -> RunConfig {
        RunConfig {
            max_depth: self.max_depth,
            max_urls: self.max_urls,
            same_origin_only: self.same_origin_only,
            concurrency_limit: self.concurrency_limit,
            politeness_delay: Duration::from_millis(self.politeness_delay_ms),
        }
    }
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
pub struct UserAgentConfig {
    /// Name of the crawler
    #[serde(rename = "crawler-name")]
    pub crawler_name: String,

    /// Version of the crawler
    #[serde(rename = "crawler-version")]
    pub crawler_version: String,

    /// URL with information about the crawler
    #[serde(rename = "contact-url")]
    pub contact_url: String,

    /// Email address for crawler-related contact
    #[serde(rename = "contact-email")]
    pub contact_email: String,
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            crawler_name: "SiteTrawler".to_string(),
            crawler_version: env!("CARGO_PKG_VERSION").to_string(),
            contact_url: "https://example.com/site-trawler".to_string(),
            contact_email: "crawler@example.com".to_string(),
        }
    }
}

impl UserAgentConfig {
    /// Format: CrawlerName/Version (+ContactURL; ContactEmail)
    pub fn header_value(&self) -> String {
        format!(
            "{}/{} (+{}; {})",
            self.crawler_name, self.crawler_version, self.contact_url, self.contact_email
        )
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Directory that receives one file per run key
    #[serde(rename = "data-dir")]
    pub data_dir: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            data_dir: "./data".to_string(),
        }
    }
}

/// Settings that stay fixed for the duration of one crawl run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub max_depth: u32,
    pub max_urls: usize,
    pub same_origin_only: bool,
    pub concurrency_limit: usize,
    pub politeness_delay: Duration,
}

impl Default for RunConfig {
    fn default() -> Self {
        CrawlerConfig::default().run_config()
    }
}
