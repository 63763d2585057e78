//! Site-Trawler: a polite site crawler core
//!
//! This crate discovers, deduplicates, and bounds traversal of URLs across a
//! site, honours concurrency and politeness limits, and appends fetched links
//! and content to a per-run output sink.

pub mod config;
pub mod crawler;
pub mod output;
pub mod robots;
pub mod sitemap;
pub mod url;

use thiserror::Error;

/// Main error type for Site-Trawler operations
#[derive(Debug, Error)]
pub enum CrawlerError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP error for {url}: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("Request timeout for {url}")]
    Timeout { url: String },

    #[error("HTTP {status} for {url}")]
    HttpStatus { url: String, status: u16 },

    #[error("Sitemap error for {url}: {message}")]
    Sitemap { url: String, message: String },

    #[error("Unknown crawl mode: {0}")]
    UnknownMode(String),

    #[error("Output error: {0}")]
    Output(#[from] output::OutputError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CrawlerError {
    /// Classifies a reqwest failure for the given URL
    pub fn from_request(url: &str, source: reqwest::Error) -> Self {
        if source.is_timeout() {
            Self::Timeout {
                url: url.to_string(),
            }
        } else if let Some(status) = source.status() {
            Self::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            }
        } else {
            Self::Http {
                url: url.to_string(),
                source,
            }
        }
    }
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Result type alias for Site-Trawler operations
pub type Result<T> = std::result::Result<T, CrawlerError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use crate::config::{Config, RunConfig};
pub use crate::crawler::{Coordinator, CrawlMode, CrawlResult, PageFetcher, RunReport};
pub use crate::url::{domain_of, is_valid_url, normalize_url, Domain};
