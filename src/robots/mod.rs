//! Robots.txt handling module
//!
//! This module fetches robots.txt files and turns their `Disallow:` rules
//! into sets of URL prefixes. It is an advisory filter: nothing here is
//! applied automatically during traversal, callers decide whether to drop
//! matching URLs.

mod cache;
mod parser;

pub use cache::{CachedRobots, RobotsCache};
pub use parser::{is_disallowed, parse_disallowed};

use crate::crawler::fetch_bytes;
use crate::url::Domain;
use reqwest::Client;
use std::collections::HashSet;

/// Fetches robots.txt files and extracts their disallow rules
#[derive(Debug, Clone)]
pub struct RobotsPolicy {
    client: Client,
}

impl RobotsPolicy {
    /// Creates a policy that issues requests through `client`
    ///
    /// The client's timeout bounds every robots.txt request.
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Fetches `{domain}/robots.txt` and returns its disallowed prefixes
    ///
    /// Network failures, timeouts, and non-success responses are logged and
    /// produce an empty set. This never fails the caller.
    ///
    /// # Arguments
    ///
    /// * `domain` - The domain whose robots.txt should be read
    ///
    /// # Returns
    ///
    /// The set of `{domain}{path}` prefixes, see [`parse_disallowed`]
    pub async fn fetch_disallowed(&self, domain: &Domain) -> HashSet<String> {
        let robots_url = domain.robots_url();
        tracing::debug!("Fetching robots.txt: {}", robots_url);

        match fetch_bytes(&self.client, &robots_url).await {
            Ok(body) => {
                let disallowed = parse_disallowed(domain, &String::from_utf8_lossy(&body));
                tracing::debug!(
                    "robots.txt for {} disallows {} prefixes",
                    domain,
                    disallowed.len()
                );
                disallowed
            }
            Err(e) => {
                tracing::warn!("Error fetching robots.txt for {}: {}", domain, e);
                HashSet::new()
            }
        }
    }
}
