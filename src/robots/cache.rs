//! robots.txt cache
//!
//! A site crawl can touch several domains (a sitemap may list subdomains),
//! so disallow sets are memoized by [`Domain`]. A coordinator keeps one
//! cache across all of its runs; entries older than 24 hours are refetched.

use crate::robots::RobotsPolicy;
use crate::url::Domain;
use chrono::{DateTime, Duration, Utc};
use std::collections::{HashMap, HashSet};

/// Cached disallow set for a domain
#[derive(Debug, Clone)]
pub struct CachedRobots {
    /// The disallowed URL prefixes
    pub disallowed: HashSet<String>,

    /// When the robots.txt was fetched
    pub fetched_at: DateTime<Utc>,
}

impl CachedRobots {
    /// Creates a new entry stamped with the current time
    pub fn new(disallowed: HashSet<String>) -> Self {
        Self {
            disallowed,
            fetched_at: Utc::now(),
        }
    }

    /// Checks if the entry is older than 24 hours
    pub fn is_stale(&self) -> bool {
        Utc::now() - self.fetched_at > Duration::hours(24)
    }
}

/// Domain-keyed robots cache
#[derive(Debug, Default)]
pub struct RobotsCache {
    entries: HashMap<Domain, CachedRobots>,
}

impl RobotsCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the disallow set for a domain, fetching it when missing or stale
    pub async fn disallowed(
        &mut self,
        policy: &RobotsPolicy,
        domain: &Domain,
    ) -> &HashSet<String> {
        let needs_fetch = self
            .entries
            .get(domain)
            .map_or(true, |entry| entry.is_stale());

        if needs_fetch {
            let disallowed = policy.fetch_disallowed(domain).await;
            self.entries
                .insert(domain.clone(), CachedRobots::new(disallowed));
        } else {
            tracing::trace!("Using cached robots.txt for {}", domain);
        }

        &self.entries[domain].disallowed
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
