//! HTML extraction for the HTTP fetcher
//!
//! Pulls three things out of a page:
//! - The `<title>`
//! - Outgoing links from `<a href>` tags, resolved against the page URL
//! - Readable body text, skipping scripts and styles

use scraper::{Html, Selector};
use url::Url;

/// Elements whose text is never page content
const NON_CONTENT_ELEMENTS: &[&str] = &["script", "style", "noscript", "template"];

/// Extracted information from an HTML page
#[derive(Debug, Clone, Default)]
pub struct ParsedPage {
    /// The page title (from <title> tag)
    pub title: Option<String>,

    /// Absolute http(s) links in document order
    pub links: Vec<String>,

    /// Body text blocks with whitespace collapsed
    pub text: Vec<String>,
}

impl ParsedPage {
    /// Renders the page as a small markdown document
    pub fn to_markdown(&self) -> String {
        let mut md = String::new();

        if let Some(title) = &self.title {
            md.push_str(&format!("# {}\n\n", title));
        }

        md.push_str(&self.text.join("\n\n"));
        md.push('\n');
        md
    }
}

/// Parses HTML content and extracts links, title and text
///
/// # Link Extraction Rules
///
/// **Include:** `<a href="...">` anywhere in the document
///
/// **Exclude:**
/// - `<a href="..." download>`
/// - `javascript:`, `mailto:`, `tel:` links and data URIs
/// - Fragment-only links
/// - Anything that is not http(s) after resolution
///
/// Parsing is lenient; malformed markup yields whatever the parser recovers.
///
/// # Example
///
/// ```
/// use site_trawler::crawler::parse_html;
/// use url::Url;
///
/// let html = r#"<html><head><title>Test</title></head><body><a href="/page">Link</a></body></html>"#;
/// let base_url = Url::parse("https://example.com/").unwrap();
/// let parsed = parse_html(html, &base_url);
/// assert_eq!(parsed.title, Some("Test".to_string()));
/// assert_eq!(parsed.links, vec!["https://example.com/page"]);
/// ```
pub fn parse_html(html: &str, base_url: &Url) -> ParsedPage {
    let document = Html::parse_document(html);

    ParsedPage {
        title: extract_title(&document),
        links: extract_links(&document, base_url),
        text: extract_text(&document),
    }
}

/// Extracts the page title from the HTML document
fn extract_title(document: &Html) -> Option<String> {
    let title_selector = Selector::parse("title").ok()?;

    document
        .select(&title_selector)
        .next()
        .map(|element| element.text().collect::<String>().trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Extracts all followable links from the HTML document
fn extract_links(document: &Html, base_url: &Url) -> Vec<String> {
    let a_selector = match Selector::parse("a[href]") {
        Ok(s) => s,
        Err(_) => return Vec::new(),
    };

    document
        .select(&a_selector)
        .filter(|element| element.value().attr("download").is_none())
        .filter_map(|element| element.value().attr("href"))
        .filter_map(|href| resolve_link(href, base_url))
        .collect()
}

/// Collects visible text nodes under `<body>`
fn extract_text(document: &Html) -> Vec<String> {
    let body_selector = match Selector::parse("body") {
        Ok(s) => s,
        Err(_) => return Vec::new(),
    };

    let body = match document.select(&body_selector).next() {
        Some(b) => b,
        None => return Vec::new(),
    };

    body.descendants()
        .filter_map(|node| {
            let text = node.value().as_text()?;

            let hidden = node
                .parent()
                .and_then(|parent| parent.value().as_element().map(|e| e.name().to_string()))
                .map_or(false, |name| NON_CONTENT_ELEMENTS.contains(&name.as_str()));
            if hidden {
                return None;
            }

            let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
            (!collapsed.is_empty()).then_some(collapsed)
        })
        .collect()
}

/// Resolves an href to an absolute http(s) URL
fn resolve_link(href: &str, base_url: &Url) -> Option<String> {
    let href = href.trim();

    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    let lowered = href.to_ascii_lowercase();
    if ["javascript:", "mailto:", "tel:", "data:"]
        .iter()
        .any(|scheme| lowered.starts_with(scheme))
    {
        return None;
    }

    let absolute_url = base_url.join(href).ok()?;
    matches!(absolute_url.scheme(), "http" | "https").then(|| absolute_url.to_string())
}
