//! Integration tests for robots.txt fetching
//!
//! These tests use wiremock to serve robots.txt files and check that
//! failures degrade to an empty disallow set.

use site_trawler::config::UserAgentConfig;
use site_trawler::crawler::build_http_client;
use site_trawler::domain_of;
use site_trawler::robots::{is_disallowed, RobotsCache, RobotsPolicy};
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn policy(timeout: Duration) -> RobotsPolicy {
    let client = build_http_client(&UserAgentConfig::default(), timeout)
        .expect("Failed to build HTTP client");
    RobotsPolicy::new(client)
}

#[tokio::test]
async fn test_fetch_disallowed_rules() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/robots.txt"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            "User-agent: *\nDisallow: /private\nDisallow: /tmp/ # scratch\nAllow: /public\nDisallow:\n",
        ))
        .mount(&mock_server)
        .await;

    let domain = domain_of(&base_url).expect("Mock server URL has a domain");
    let disallowed = policy(Duration::from_secs(5)).fetch_disallowed(&domain).await;

    assert_eq!(disallowed.len(), 2);
    assert!(disallowed.contains(&format!("{}/private", base_url)));
    assert!(disallowed.contains(&format!("{}/tmp", base_url)));

    assert!(is_disallowed(&disallowed, &format!("{}/private/page", base_url)));
    assert!(!is_disallowed(&disallowed, &format!("{}/public", base_url)));
}

#[tokio::test]
async fn test_missing_robots_is_empty() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/robots.txt"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let domain = domain_of(&mock_server.uri()).unwrap();
    let disallowed = policy(Duration::from_secs(5)).fetch_disallowed(&domain).await;

    assert!(disallowed.is_empty());
}

#[tokio::test]
async fn test_server_error_is_empty() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/robots.txt"))
        .respond_with(ResponseTemplate::new(503).set_body_string("Disallow: /"))
        .mount(&mock_server)
        .await;

    let domain = domain_of(&mock_server.uri()).unwrap();
    let disallowed = policy(Duration::from_secs(5)).fetch_disallowed(&domain).await;

    assert!(disallowed.is_empty());
}

#[tokio::test]
async fn test_timeout_is_empty() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/robots.txt"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("Disallow: /")
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&mock_server)
        .await;

    let domain = domain_of(&mock_server.uri()).unwrap();
    let disallowed = policy(Duration::from_millis(300))
        .fetch_disallowed(&domain)
        .await;

    assert!(disallowed.is_empty());
}

#[tokio::test]
async fn test_cache_fetches_once_per_domain() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/robots.txt"))
        .respond_with(ResponseTemplate::new(200).set_body_string("Disallow: /admin"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let policy = policy(Duration::from_secs(5));
    let domain = domain_of(&mock_server.uri()).unwrap();
    let mut cache = RobotsCache::new();

    let first = cache.disallowed(&policy, &domain).await.clone();
    let second = cache.disallowed(&policy, &domain).await.clone();

    assert_eq!(first, second);
    assert_eq!(first.len(), 1);
    assert_eq!(cache.len(), 1);
}
