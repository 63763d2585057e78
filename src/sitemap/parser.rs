//! Sitemap XML parser
//!
//! Reads `<urlset>` and `<sitemapindex>` documents from the
//! `http://www.sitemaps.org/schemas/sitemap/0.9` schema and returns every
//! `<loc>` value in document order.

use ::sitemap::reader::{SiteMapEntity, SiteMapReader};
use std::io::Cursor;

/// Sitemap protocol namespace
pub const SITEMAP_NAMESPACE: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

/// Extracts all `<loc>` values from a sitemap document
///
/// Entries of both `<url>` and `<sitemap>` elements are returned; callers
/// tell nested indexes apart by their `.xml` suffix. Loc values that are
/// not absolute URLs are skipped.
///
/// # Returns
///
/// * `Ok(Vec<String>)` - The loc values
/// * `Err(String)` - The document is not well-formed XML
pub fn parse_sitemap(xml: &[u8]) -> Result<Vec<String>, String> {
    let reader = SiteMapReader::new(Cursor::new(xml));
    let mut locs = Vec::new();

    for entity in reader {
        match entity {
            SiteMapEntity::Url(entry) => {
                if let Some(url) = entry.loc.get_url() {
                    locs.push(url.to_string());
                }
            }
            SiteMapEntity::SiteMap(entry) => {
                if let Some(url) = entry.loc.get_url() {
                    locs.push(url.to_string());
                }
            }
            // The reader keeps yielding the same error, so stop at the first
            SiteMapEntity::Err(e) => return Err(format!("{:?}", e)),
            #[allow(unreachable_patterns)]
            _ => {}
        }
    }

    Ok(locs)
}

/// Checks whether a loc value points at another sitemap
pub fn is_nested_sitemap(loc: &str) -> bool {
    loc.ends_with(".xml")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_urlset() {
        let xml = r#"<?xml version="1.0" encoding="UTF-8"?>
<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
  <url><loc>https://example.com/a</loc><lastmod>2024-01-01</lastmod></url>
  <url><loc>https://example.com/b</loc></url>
</urlset>"#;

        let locs = parse_sitemap(xml.as_bytes()).unwrap();
        assert_eq!(locs, vec!["https://example.com/a", "https://example.com/b"]);
    }

    #[test]
    fn test_parse_sitemap_index() {
        let xml = r#"<?xml version="1.0" encoding="UTF-8"?>
<sitemapindex xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
  <sitemap><loc>https://example.com/sitemap-posts.xml</loc></sitemap>
  <sitemap><loc>https://example.com/sitemap-pages.xml</loc></sitemap>
</sitemapindex>"#;

        let locs = parse_sitemap(xml.as_bytes()).unwrap();
        assert_eq!(locs.len(), 2);
        assert!(locs.iter().all(|loc| is_nested_sitemap(loc)));
    }

    #[test]
    fn test_loc_whitespace_trimmed() {
        let xml = r#"<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
  <url><loc>
      https://example.com/padded
  </loc></url>
</urlset>"#;

        let locs = parse_sitemap(xml.as_bytes()).unwrap();
        assert_eq!(locs, vec!["https://example.com/padded"]);
    }

    #[test]
    fn test_empty_urlset() {
        let xml = r#"<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9"></urlset>"#;
        assert!(parse_sitemap(xml.as_bytes()).unwrap().is_empty());
    }

    #[test]
    fn test_mismatched_tags_rejected() {
        let xml = r#"<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
  <url><loc>https://example.com/a</loc></wrong>
</urlset>"#;
        assert!(parse_sitemap(xml.as_bytes()).is_err());
    }

    #[test]
    fn test_is_nested_sitemap() {
        assert!(is_nested_sitemap("https://example.com/sitemap-1.xml"));
        assert!(!is_nested_sitemap("https://example.com/page"));
        assert!(!is_nested_sitemap("https://example.com/sitemap.xml.gz"));
    }
}
