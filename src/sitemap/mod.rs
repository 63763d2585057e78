//! Sitemap discovery module
//!
//! This module expands a site's `/sitemap.xml`, following nested sitemap
//! indexes, into a flat set of page URLs used as crawl seeds.

mod parser;

pub use parser::{is_nested_sitemap, parse_sitemap, SITEMAP_NAMESPACE};

use crate::crawler::fetch_bytes;
use crate::url::domain_of;
use crate::CrawlerError;
use reqwest::Client;
use std::collections::HashSet;

/// Recursively expands sitemap indexes into page URLs
#[derive(Debug, Clone)]
pub struct SitemapDiscoverer {
    client: Client,
}

impl SitemapDiscoverer {
    /// Creates a discoverer that issues requests through `client`
    ///
    /// The client's timeout bounds every sitemap request.
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Discovers every page URL reachable from the root URL's sitemap
    ///
    /// # Discovery Flow
    ///
    /// 1. Push `{domain}/sitemap.xml` onto a work stack
    /// 2. Pop a sitemap URL; skip it if already visited, else mark it visited
    /// 3. Fetch and parse it, collecting `<loc>` values
    /// 4. Push `.xml` locs as nested sitemaps, add everything else to the result
    /// 5. Repeat until the stack is empty
    ///
    /// The visited set guarantees termination on cyclic indexes. A sitemap
    /// that fails to download or parse is logged and contributes nothing;
    /// the remaining sitemaps are still expanded.
    ///
    /// # Arguments
    ///
    /// * `root_url` - Any URL on the site; only its domain is used
    ///
    /// # Returns
    ///
    /// The set of page URLs listed by the site's sitemaps
    pub async fn crawl_sitemap(&self, root_url: &str) -> HashSet<String> {
        let mut pages = HashSet::new();

        let domain = match domain_of(root_url) {
            Some(d) => d,
            None => {
                tracing::warn!("Cannot derive a domain from {}, skipping sitemap", root_url);
                return pages;
            }
        };

        let mut visited: HashSet<String> = HashSet::new();
        let mut stack = vec![domain.sitemap_url()];

        while let Some(sitemap_url) = stack.pop() {
            if !visited.insert(sitemap_url.clone()) {
                tracing::trace!("Sitemap already expanded: {}", sitemap_url);
                continue;
            }

            let locs = match self.fetch_sitemap(&sitemap_url).await {
                Ok(locs) => locs,
                Err(e) => {
                    tracing::warn!("Error fetching sitemap: {}", e);
                    continue;
                }
            };

            tracing::debug!("Parsed {}: {} entries", sitemap_url, locs.len());

            for loc in locs {
                if is_nested_sitemap(&loc) {
                    stack.push(loc);
                } else {
                    pages.insert(loc);
                }
            }
        }

        tracing::info!(
            "Sitemap discovery for {} found {} URLs across {} sitemaps",
            domain,
            pages.len(),
            visited.len()
        );

        pages
    }

    /// Downloads and parses a single sitemap document
    async fn fetch_sitemap(&self, sitemap_url: &str) -> Result<Vec<String>, CrawlerError> {
        let body = fetch_bytes(&self.client, sitemap_url).await?;
        parse_sitemap(&body).map_err(|message| CrawlerError::Sitemap {
            url: sitemap_url.to_string(),
            message,
        })
    }
}
