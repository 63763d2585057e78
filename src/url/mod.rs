//! URL handling module for Site-Trawler
//!
//! This module provides URL normalization, validation, and domain extraction.
//! Everything here is a pure function over strings.

mod domain;
mod normalize;

use url::Url;

// Re-export main functions
pub use domain::{domain_of, Domain};
pub use normalize::normalize_url;

/// Path extensions that never point at a crawlable page
pub const EXCLUDED_EXTENSIONS: &[&str] = &[
    ".jpg", ".jpeg", ".png", ".gif", ".pdf", ".docx", ".xlsx", ".zip", ".rar", ".exe", ".svg",
    ".css", ".js",
];

/// Checks whether a URL is worth spending fetch budget on
///
/// A URL is valid when:
/// 1. It parses and its scheme is `http` or `https`
/// 2. It has a non-empty host
/// 3. Its lowercased path does not end with an [`EXCLUDED_EXTENSIONS`] entry
///
/// Trailing slashes are ignored for the extension check so that validity
/// does not change when [`normalize_url`] strips them.
///
/// # Examples
///
/// ```
/// use site_trawler::url::is_valid_url;
///
/// assert!(is_valid_url("https://example.com/about"));
/// assert!(!is_valid_url("https://example.com/logo.PNG"));
/// assert!(!is_valid_url("ftp://example.com/file"));
/// ```
pub fn is_valid_url(url: &str) -> bool {
    let parsed = match Url::parse(url) {
        Ok(u) => u,
        Err(_) => return false,
    };

    if parsed.scheme() != "http" && parsed.scheme() != "https" {
        return false;
    }

    match parsed.host_str() {
        Some(host) if !host.is_empty() => {}
        _ => return false,
    }

    let path = parsed.path().trim_end_matches('/').to_lowercase();
    !EXCLUDED_EXTENSIONS.iter().any(|ext| path.ends_with(ext))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_http_and_https() {
        assert!(is_valid_url("http://example.com/page"));
        assert!(is_valid_url("https://example.com/page"));
        assert!(is_valid_url("https://example.com"));
    }

    #[test]
    fn test_rejects_other_schemes() {
        assert!(!is_valid_url("ftp://example.com/page"));
        assert!(!is_valid_url("mailto:someone@example.com"));
        assert!(!is_valid_url("javascript:void(0)"));
    }

    #[test]
    fn test_rejects_unparseable() {
        assert!(!is_valid_url("not a url"));
        assert!(!is_valid_url(""));
        assert!(!is_valid_url("/relative/path"));
    }

    #[test]
    fn test_rejects_excluded_extensions() {
        for ext in EXCLUDED_EXTENSIONS {
            let url = format!("https://example.com/resource{}", ext);
            assert!(!is_valid_url(&url), "{} should be excluded", url);
        }
    }

    #[test]
    fn test_extension_check_is_case_insensitive() {
        assert!(!is_valid_url("https://example.com/Photo.JPG"));
        assert!(!is_valid_url("https://example.com/report.Pdf"));
    }

    #[test]
    fn test_extension_only_checked_on_path() {
        // The query is not part of the path
        assert!(is_valid_url("https://example.com/view?file=a.pdf"));
        // A host that looks like an extension is fine
        assert!(is_valid_url("https://cdn.js/page"));
    }

    #[test]
    fn test_trailing_slash_does_not_hide_extension() {
        assert!(!is_valid_url("https://example.com/image.png/"));
    }

    #[test]
    fn test_validity_stable_under_normalization() {
        let samples = [
            "https://example.com/a/?x=1#frag",
            "http://Example.com/docs/",
            "https://example.com/image.png/",
            "https://example.com/view?file=a.pdf",
            "https://example.com/a/../b/",
            "https://example.com",
        ];

        for raw in samples {
            if is_valid_url(raw) {
                assert!(
                    is_valid_url(&normalize_url(raw)),
                    "validity lost for {}",
                    raw
                );
            }
        }
    }
}
