//! Crawl tests against a mock wiki
//!
//! Pages and their links are served by wiremock; the crawl engine talks to it
//! through the real `MediaWikiClient`.

use crate::common::*;
use wikicli::commands::crawl::{run_crawl, CrawlSettings};
use wikicli::{FileSink, Strategy};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Serves a three-page wiki: Home links to Alpha and Beta, Alpha links back to Home
async fn small_wiki() -> MockServer {
    let server = MockServer::start().await;

    mount_page(&server, "Home", "Home page").await;
    mount_page(&server, "Alpha", "Alpha page").await;
    mount_page(&server, "Beta", "Beta page").await;

    mount_links(&server, "Home", &["Alpha", "Beta"]).await;
    mount_links(&server, "Alpha", &["Home"]).await;
    mount_links(&server, "Beta", &[]).await;

    server
}

#[tokio::test]
async fn test_full_crawl_writes_files() {
    let server = small_wiki().await;
    let temp = tempfile::tempdir().unwrap();
    let sink = FileSink::new(temp.path().join("pages")).unwrap();

    let stats = run_crawl(
        anonymous_client(&server),
        sink,
        "Home",
        CrawlSettings {
            depth: 1,
            limit: 10,
            strategy: Strategy::BreadthFirst,
        },
    )
    .await
    .unwrap();

    assert_eq!(stats.pages_processed, 3);
    assert_eq!(stats.pages_discovered, 3);

    let dir = temp.path().join("pages");
    assert_eq!(
        std::fs::read_to_string(dir.join("Home.txt")).unwrap(),
        "Home page"
    );
    assert_eq!(
        std::fs::read_to_string(dir.join("Alpha.txt")).unwrap(),
        "Alpha page"
    );
    assert_eq!(
        std::fs::read_to_string(dir.join("Beta.txt")).unwrap(),
        "Beta page"
    );
}

#[tokio::test]
async fn test_depth_zero_fetches_no_links() {
    let server = MockServer::start().await;
    mount_page(&server, "Home", "Home page").await;
    Mock::given(method("GET"))
        .and(path(API_PATH))
        .and(query_param("prop", "links"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let temp = tempfile::tempdir().unwrap();
    let stats = run_crawl(
        anonymous_client(&server),
        FileSink::new(temp.path()).unwrap(),
        "Home",
        CrawlSettings {
            depth: 0,
            limit: 10,
            strategy: Strategy::DepthFirst,
        },
    )
    .await
    .unwrap();

    assert_eq!(stats.pages_processed, 1);
    assert_eq!(stats.pages_discovered, 1);
}

#[tokio::test]
async fn test_missing_linked_page_is_skipped() {
    let server = MockServer::start().await;
    mount_page(&server, "Home", "Home page").await;
    mount_missing(&server, "Red Link").await;
    mount_links(&server, "Home", &["Red Link"]).await;

    let temp = tempfile::tempdir().unwrap();
    let stats = run_crawl(
        anonymous_client(&server),
        FileSink::new(temp.path()).unwrap(),
        "Home",
        CrawlSettings {
            depth: 2,
            limit: 10,
            strategy: Strategy::BreadthFirst,
        },
    )
    .await
    .unwrap();

    assert_eq!(stats.pages_processed, 1);
    assert_eq!(stats.pages_discovered, 2);
    assert_eq!(stats.pages_missing, 1);
    assert!(!temp.path().join("Red_Link.txt").exists());
}

#[tokio::test]
async fn test_limit_stops_crawl() {
    let server = small_wiki().await;
    let temp = tempfile::tempdir().unwrap();

    let stats = run_crawl(
        anonymous_client(&server),
        FileSink::new(temp.path()).unwrap(),
        "Home",
        CrawlSettings {
            depth: 5,
            limit: 2,
            strategy: Strategy::BreadthFirst,
        },
    )
    .await
    .unwrap();

    assert_eq!(stats.pages_processed, 2);
    assert!(stats.reached_limit(2));
    assert!(temp.path().join("Home.txt").exists());
    assert!(temp.path().join("Alpha.txt").exists());
    assert!(!temp.path().join("Beta.txt").exists());
}
