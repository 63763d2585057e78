//! Page fetching
//!
//! This module defines the page fetcher capability the crawler is built on,
//! the per-fetch [`CrawlResult`], and a plain HTTP implementation:
//! - Building HTTP clients with a polite user agent and bounded timeouts
//! - Downloading raw documents (robots.txt, sitemaps)
//! - Fetching HTML pages and extracting their links and text

use crate::config::UserAgentConfig;
use crate::crawler::parser::parse_html;
use crate::CrawlerError;
use async_trait::async_trait;
use reqwest::{redirect::Policy, Client};
use std::time::Duration;

/// Outcome of one fetch attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlResult {
    /// The URL that was requested
    pub url: String,

    /// Whether the page was fetched and extracted
    pub success: bool,

    /// Links found on the page, in document order
    pub links: Vec<String>,

    /// Extracted page content
    pub content: Option<String>,

    /// Failure description when `success` is false
    pub error: Option<String>,
}

impl CrawlResult {
    /// Builds a successful result
    pub fn success(url: impl Into<String>, links: Vec<String>, content: Option<String>) -> Self {
        Self {
            url: url.into(),
            success: true,
            links,
            content,
            error: None,
        }
    }

    /// Builds a failed result carrying an error message
    pub fn failure(url: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            success: false,
            links: Vec::new(),
            content: None,
            error: Some(error.into()),
        }
    }
}

/// Capability that turns a URL into a [`CrawlResult`]
///
/// Implementations (plain HTTP, headless browser, test doubles) are
/// injected into the crawler; failures are reported through the result,
/// never by panicking.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetches a page and extracts its links and content
    async fn fetch(&self, url: &str) -> CrawlResult;
}

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `config` - The user agent configuration
/// * `timeout` - Upper bound for each whole request
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
///
/// # Example
///
/// ```no_run
/// use site_trawler::config::UserAgentConfig;
/// use site_trawler::crawler::build_http_client;
/// use std::time::Duration;
///
/// let client = build_http_client(&UserAgentConfig::default(), Duration::from_secs(10)).unwrap();
/// ```
pub fn build_http_client(
    config: &UserAgentConfig,
    timeout: Duration,
) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.header_value())
        .timeout(timeout)
        .connect_timeout(timeout.min(Duration::from_secs(10)))
        .redirect(Policy::limited(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Downloads a document and returns its body
///
/// Non-success status codes are reported as errors.
pub async fn fetch_bytes(client: &Client, url: &str) -> Result<Vec<u8>, CrawlerError> {
    let response = client
        .get(url)
        .send()
        .await
        .and_then(|r| r.error_for_status())
        .map_err(|e| CrawlerError::from_request(url, e))?;

    let body = response
        .bytes()
        .await
        .map_err(|e| CrawlerError::from_request(url, e))?;

    Ok(body.to_vec())
}

/// Page fetcher backed by plain HTTP GET requests
///
/// Only `text/html` responses are extracted. JavaScript is not executed.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> CrawlResult {
        let response = match self.client.get(url).send().await {
            Ok(r) => r,
            Err(e) => {
                return CrawlResult::failure(url, CrawlerError::from_request(url, e).to_string())
            }
        };

        let status = response.status();
        if !status.is_success() {
            return CrawlResult::failure(url, format!("HTTP {}", status.as_u16()));
        }

        let final_url = response.url().clone();

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_string();

        if !content_type.contains("text/html") {
            return CrawlResult::failure(url, format!("Expected HTML, got {}", content_type));
        }

        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                return CrawlResult::failure(url, CrawlerError::from_request(url, e).to_string())
            }
        };

        let parsed = parse_html(&body, &final_url);
        let content = parsed.to_markdown();
        CrawlResult::success(url, parsed.links, Some(content))
    }
}
