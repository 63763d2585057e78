//! Integration tests for sitemap discovery
//!
//! These tests use wiremock to serve sitemap indexes and URL sets and
//! check the recursive expansion end-to-end.

use site_trawler::config::UserAgentConfig;
use site_trawler::crawler::build_http_client;
use site_trawler::sitemap::SitemapDiscoverer;
use std::collections::HashSet;
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn discoverer() -> SitemapDiscoverer {
    let client = build_http_client(&UserAgentConfig::default(), Duration::from_secs(5))
        .expect("Failed to build HTTP client");
    SitemapDiscoverer::new(client)
}

fn sitemap_index(locs: &[String]) -> String {
    let entries: String = locs
        .iter()
        .map(|loc| format!("  <sitemap><loc>{}</loc></sitemap>\n", loc))
        .collect();
    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
         <sitemapindex xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n{}</sitemapindex>",
        entries
    )
}

fn url_set(locs: &[String]) -> String {
    let entries: String = locs
        .iter()
        .map(|loc| format!("  <url><loc>{}</loc></url>\n", loc))
        .collect();
    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
         <urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n{}</urlset>",
        entries
    )
}

async fn serve(server: &MockServer, route: &str, body: String) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(body)
                .insert_header("content-type", "application/xml"),
        )
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_nested_sitemap_index() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    serve(
        &mock_server,
        "/sitemap.xml",
        sitemap_index(&[
            format!("{}/sitemap-posts.xml", base_url),
            format!("{}/sitemap-pages.xml", base_url),
        ]),
    )
    .await;
    serve(
        &mock_server,
        "/sitemap-posts.xml",
        url_set(&[
            format!("{}/posts/1", base_url),
            format!("{}/posts/2", base_url),
        ]),
    )
    .await;
    serve(
        &mock_server,
        "/sitemap-pages.xml",
        url_set(&[format!("{}/about", base_url)]),
    )
    .await;

    let pages = discoverer()
        .crawl_sitemap(&format!("{}/any/page", base_url))
        .await;

    let expected: HashSet<String> = [
        format!("{}/posts/1", base_url),
        format!("{}/posts/2", base_url),
        format!("{}/about", base_url),
    ]
    .into_iter()
    .collect();
    assert_eq!(pages, expected);
}

#[tokio::test]
async fn test_self_referencing_index_terminates() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/sitemap.xml"))
        .respond_with(ResponseTemplate::new(200).set_body_string(sitemap_index(&[
            format!("{}/sitemap.xml", base_url),
            format!("{}/sitemap-a.xml", base_url),
        ])))
        .expect(1)
        .mount(&mock_server)
        .await;

    // sitemap-a points back at the root index
    serve(
        &mock_server,
        "/sitemap-a.xml",
        format!(
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
             <sitemapindex xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n\
             <sitemap><loc>{}/sitemap.xml</loc></sitemap>\n\
             </sitemapindex>",
            base_url
        ),
    )
    .await;

    let pages = discoverer().crawl_sitemap(&base_url).await;

    assert!(pages.is_empty());
}

#[tokio::test]
async fn test_broken_child_sitemap_is_skipped() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    serve(
        &mock_server,
        "/sitemap.xml",
        sitemap_index(&[
            format!("{}/sitemap-broken.xml", base_url),
            format!("{}/sitemap-missing.xml", base_url),
            format!("{}/sitemap-good.xml", base_url),
        ]),
    )
    .await;
    serve(
        &mock_server,
        "/sitemap-broken.xml",
        "<urlset><url><loc>unterminated".to_string(),
    )
    .await;
    serve(
        &mock_server,
        "/sitemap-good.xml",
        url_set(&[format!("{}/kept", base_url)]),
    )
    .await;

    let pages = discoverer().crawl_sitemap(&base_url).await;

    assert!(pages.contains(&format!("{}/kept", base_url)));
    assert!(pages.iter().all(|p| !p.contains("unterminated")));
}

#[tokio::test]
async fn test_missing_sitemap_is_empty() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/sitemap.xml"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let pages = discoverer().crawl_sitemap(&mock_server.uri()).await;

    assert!(pages.is_empty());
}

#[tokio::test]
async fn test_unparseable_root_is_empty() {
    let pages = discoverer().crawl_sitemap("not a url").await;
    assert!(pages.is_empty());
}
