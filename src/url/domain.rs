use std::fmt;
use url::Url;

/// The scheme and authority of a URL, e.g. `https://example.com:8443`
///
/// Used for same-origin scoping and as the key of the robots cache.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Domain(String);

impl Domain {
    /// Returns the domain as `scheme://host[:port]`
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Location of the domain's robots.txt
    pub fn robots_url(&self) -> String {
        format!("{}/robots.txt", self.0)
    }

    /// Location of the domain's root sitemap
    pub fn sitemap_url(&self) -> String {
        format!("{}/sitemap.xml", self.0)
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Extracts the domain (scheme + host + explicit port) from a URL
///
/// The host is lowercased by the parser. Default ports are dropped, so
/// `http://example.com:80/` and `http://example.com/` share a domain.
///
/// # Returns
///
/// * `Some(Domain)` - The URL's domain
/// * `None` - If the URL does not parse or has no host
///
/// # Examples
///
/// ```
/// use site_trawler::url::domain_of;
///
/// let domain = domain_of("https://EXAMPLE.com/path?q=1").unwrap();
/// assert_eq!(domain.as_str(), "https://example.com");
///
/// assert!(domain_of("not a url").is_none());
/// ```
pub fn domain_of(url: &str) -> Option<Domain> {
    let parsed = Url::parse(url).ok()?;
    let host = parsed.host_str().filter(|h| !h.is_empty())?;

    let domain = match parsed.port() {
        Some(port) => format!("{}://{}:{}", parsed.scheme(), host, port),
        None => format!("{}://{}", parsed.scheme(), host),
    };

    Some(Domain(domain))
}
