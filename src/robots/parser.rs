//! Robots.txt disallow extraction
//!
//! Only `Disallow:` lines are read. `Allow:`, `Sitemap:`, `Crawl-delay:` and
//! user-agent groups are ignored, so every disallow rule in the file applies.

use crate::url::Domain;
use std::collections::HashSet;

/// Extracts the disallowed URL prefixes from a robots.txt body
///
/// # Parsing Rules
///
/// 1. Drop everything after the first `#` on a line, then trim
/// 2. Keep lines starting with `disallow:` (any case)
/// 3. Take the text after the first `:` and trim it
/// 4. Skip empty paths (`Disallow:` with no value allows everything)
/// 5. Emit `{domain}{path}` with trailing slashes removed
///
/// # Examples
///
/// ```
/// use site_trawler::robots::parse_disallowed;
/// use site_trawler::url::domain_of;
///
/// let domain = domain_of("https://x.com").unwrap();
/// let body = "User-agent: *\nDisallow: /private\n# comment\nDisallow: /tmp/";
/// let disallowed = parse_disallowed(&domain, body);
///
/// assert!(disallowed.contains("https://x.com/private"));
/// assert!(disallowed.contains("https://x.com/tmp"));
/// assert_eq!(disallowed.len(), 2);
/// ```
pub fn parse_disallowed(domain: &Domain, body: &str) -> HashSet<String> {
    let mut disallowed = HashSet::new();

    for raw_line in body.lines() {
        let line = raw_line.split('#').next().unwrap_or_default().trim();

        if !line.to_ascii_lowercase().starts_with("disallow:") {
            continue;
        }

        let path = match line.split_once(':') {
            Some((_, value)) => value.trim(),
            None => continue,
        };

        if path.is_empty() {
            continue;
        }

        let prefix = format!("{}{}", domain, path);
        disallowed.insert(prefix.trim_end_matches('/').to_string());
    }

    disallowed
}

/// Checks whether a URL falls under any disallowed prefix
pub fn is_disallowed(disallowed: &HashSet<String>, url: &str) -> bool {
    disallowed.iter().any(|prefix| url.starts_with(prefix.as_str()))
}
