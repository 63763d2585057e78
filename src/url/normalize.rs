use url::Url;

/// Normalizes a URL into its frontier form
///
/// # Normalization Steps
///
/// 1. Parse the URL (lowercases the host, resolves dot segments,
///    drops default ports)
/// 2. Remove the query string
/// 3. Remove the fragment
/// 4. Remove every trailing slash, including the root slash
///
/// This never fails. Input the `url` crate cannot parse is stripped of its
/// fragment, query and trailing slashes textually; [`crate::url::is_valid_url`]
/// rejects it later.
///
/// Normalizing twice yields the same string as normalizing once.
///
/// # Examples
///
/// ```
/// use site_trawler::url::normalize_url;
///
/// assert_eq!(normalize_url("https://example.com/a/?x=1#frag"), "https://example.com/a");
/// assert_eq!(normalize_url("https://EXAMPLE.com/"), "https://example.com");
/// ```
pub fn normalize_url(raw: &str) -> String {
    match Url::parse(raw) {
        Ok(mut url) => {
            url.set_query(None);
            url.set_fragment(None);
            url.as_str().trim_end_matches('/').to_string()
        }
        Err(e) => {
            tracing::trace!("Falling back to textual normalization for {}: {}", raw, e);
            strip_textually(raw)
        }
    }
}

/// Best-effort normalization for strings that are not parseable URLs
fn strip_textually(raw: &str) -> String {
    let trimmed = raw.trim();
    let without_fragment = trimmed.split('#').next().unwrap_or_default();
    let without_query = without_fragment.split('?').next().unwrap_or_default();
    without_query.trim_end_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remove_trailing_slash() {
        assert_eq!(
            normalize_url("https://example.com/page/"),
            "https://example.com/page"
        );
    }

    #[test]
    fn test_remove_root_slash() {
        assert_eq!(normalize_url("https://example.com/"), "https://example.com");
        assert_eq!(normalize_url("https://example.com"), "https://example.com");
    }

    #[test]
    fn test_remove_repeated_trailing_slashes() {
        assert_eq!(
            normalize_url("https://example.com/page///"),
            "https://example.com/page"
        );
    }

    #[test]
    fn test_remove_fragment() {
        assert_eq!(
            normalize_url("https://example.com/page#section"),
            "https://example.com/page"
        );
    }

    #[test]
    fn test_remove_query() {
        assert_eq!(
            normalize_url("https://example.com/page?b=2&a=1"),
            "https://example.com/page"
        );
    }

    #[test]
    fn test_query_fragment_and_slash_collapse_to_one_entry() {
        let variants = [
            "https://example.com/a",
            "https://example.com/a/",
            "https://example.com/a?x=1",
            "https://example.com/a#frag",
            "https://example.com/a/?x=1#frag",
        ];

        for variant in variants {
            assert_eq!(normalize_url(variant), "https://example.com/a");
        }
    }

    #[test]
    fn test_normalize_path_with_dots() {
        assert_eq!(
            normalize_url("https://example.com/a/../b/./c"),
            "https://example.com/b/c"
        );
    }

    #[test]
    fn test_lowercase_host_keeps_path_case() {
        assert_eq!(
            normalize_url("https://EXAMPLE.COM/Page"),
            "https://example.com/Page"
        );
    }

    #[test]
    fn test_keeps_scheme_and_port() {
        assert_eq!(
            normalize_url("http://example.com:8080/page/"),
            "http://example.com:8080/page"
        );
    }

    #[test]
    fn test_malformed_input_is_best_effort() {
        assert_eq!(normalize_url("not a url/?q=1#top"), "not a url");
        assert_eq!(normalize_url("/relative/path/"), "/relative/path");
        assert_eq!(normalize_url(""), "");
    }

    #[test]
    fn test_idempotent() {
        let samples = [
            "https://example.com/a?x=1#frag",
            "https://example.com/",
            "https://EXAMPLE.com/A/B/",
            "http://example.com:80/x/../y/",
            "https://example.com/path%20with%20spaces/",
            "https://example.com/a b/",
            "file:///tmp/",
            "mailto:someone@example.com",
            "http://",
            "not a url/?q=1#top",
            "  https://example.com/padded/  ",
            "",
        ];

        for raw in samples {
            let once = normalize_url(raw);
            let twice = normalize_url(&once);
            assert_eq!(once, twice, "normalization not idempotent for {:?}", raw);
        }
    }
}
