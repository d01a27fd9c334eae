//! Integration tests for the crawler
//!
//! These tests use wiremock to create mock HTTP servers and test the full
//! crawl cycle end-to-end, plus an in-memory site graph for crawls too large
//! to serve over HTTP quickly.

use site_scribe::config::{Config, CrawlerConfig, HttpConfig, OutputConfig};
use site_scribe::crawler::{crawl, CrawlReport, Crawler, HttpFetcher, PageFetcher};
use site_scribe::events::{CrawlEvent, JsonLinesSink};
use site_scribe::output::CrawlOutcome;
use site_scribe::state::PageState;
use site_scribe::ScribeError;
use std::collections::HashSet;
use url::Url;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration with no politeness delay
fn create_test_config(max_pages: u32) -> Config {
    Config {
        crawler: CrawlerConfig {
            max_pages,
            delay_ms: 0, // No delay for testing
        },
        http: HttpConfig {
            timeout_secs: 5,
            ..HttpConfig::default()
        },
        output: OutputConfig::default(),
    }
}

/// Mounts an HTML page at `route`
async fn mount_page(server: &MockServer, route: &str, body: String) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(body)
                .insert_header("content-type", "text/html"),
        )
        .mount(server)
        .await;
}

/// URLs of every progress event that refers to a page, in report order
fn reported_urls(events: &[CrawlEvent]) -> Vec<String> {
    events
        .iter()
        .filter_map(|event| match event {
            CrawlEvent::Progress {
                page: Some(page), ..
            } => Some(page.url.clone()),
            _ => None,
        })
        .collect()
}

fn http_crawler(max_pages: u32) -> Crawler<HttpFetcher> {
    Crawler::from_config(&create_test_config(max_pages)).expect("Failed to build crawler")
}

async fn run_http(server: &MockServer, max_pages: u32) -> (CrawlReport, Vec<CrawlEvent>) {
    let seed = Url::parse(&format!("{}/", server.uri())).expect("Failed to parse base URL");
    let mut events = Vec::new();
    let report = http_crawler(max_pages)
        .run(seed, &mut events)
        .await
        .expect("Crawl failed");
    (report, events)
}

#[tokio::test]
async fn test_end_to_end_single_domain() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(
        &mock_server,
        "/",
        r#"<html><head><title>Home</title></head><body>
            <h1>Welcome home</h1>
            <a href="/a">Page A</a>
            <a href="https://external.test/x">Elsewhere</a>
        </body></html>"#
            .to_string(),
    )
    .await;
    mount_page(
        &mock_server,
        "/a",
        r#"<html><head><title>A</title></head><body><p>Content A</p></body></html>"#.to_string(),
    )
    .await;

    let seed = format!("{}/", base_url);
    let mut events = Vec::new();
    crawl(&seed, &create_test_config(1500), &mut events).await;

    assert_eq!(
        reported_urls(&events),
        vec![seed.clone(), format!("{}/a", base_url)]
    );

    let outcome = match events.last() {
        Some(CrawlEvent::Complete { data }) => data.clone(),
        other => panic!("expected Complete, got {:?}", other),
    };

    assert_eq!(outcome.sitemap_xml.matches("<loc>").count(), 2);
    assert!(outcome.sitemap_xml.contains(&format!("<loc>{}</loc>", seed)));
    assert!(outcome
        .sitemap_xml
        .contains(&format!("<loc>{}/a</loc>", base_url)));
    assert!(!outcome.sitemap_xml.contains("external.test"));

    assert!(outcome.full_text.contains("TITLE: Home\n"));
    assert!(outcome.full_text.contains("TITLE: A\n"));
    assert!(outcome.full_text.contains("Welcome home\nPage A\nElsewhere"));
    assert!(outcome.full_text.contains("Content A"));
}

#[tokio::test]
async fn test_bfs_fetch_order() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(
        &mock_server,
        "/",
        r#"<a href="/a">A</a><a href="/b">B</a><a href="/c">C</a>"#.to_string(),
    )
    .await;
    for route in ["/a", "/b", "/c"] {
        mount_page(&mock_server, route, r#"<a href="/">Home</a>"#.to_string()).await;
    }

    let (report, _) = run_http(&mock_server, 1500).await;

    let order: Vec<String> = report.results.iter().map(|p| p.url.to_string()).collect();
    assert_eq!(
        order,
        vec![
            format!("{}/", base_url),
            format!("{}/a", base_url),
            format!("{}/b", base_url),
            format!("{}/c", base_url),
        ]
    );
}

#[tokio::test]
async fn test_dedup_fragments_and_repeats() {
    let mock_server = MockServer::start().await;

    mount_page(
        &mock_server,
        "/",
        r##"
            <a href="/a">A</a>
            <a href="/a#intro">A again</a>
            <a href="/a">A third time</a>
            <a href="#top">Top</a>
            <a href="/b">B</a>
        "##
        .to_string(),
    )
    .await;
    mount_page(&mock_server, "/a", r#"<a href="/b#x">B</a>"#.to_string()).await;
    mount_page(&mock_server, "/b", r#"<a href="/a">A</a>"#.to_string()).await;

    let (report, events) = run_http(&mock_server, 1500).await;

    let urls = reported_urls(&events);
    let unique: HashSet<&String> = urls.iter().collect();
    assert_eq!(urls.len(), 3);
    assert_eq!(unique.len(), urls.len());
    assert_eq!(report.visited, report.pages_scraped as usize);

    let requests = mock_server.received_requests().await.expect("recording enabled");
    assert_eq!(requests.len(), 3);
}

#[tokio::test]
async fn test_failure_isolation() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(
        &mock_server,
        "/",
        r#"<a href="/b">B</a><a href="/c">C</a>"#.to_string(),
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/b"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;
    mount_page(&mock_server, "/c", "<title>C</title>".to_string()).await;

    let (report, events) = run_http(&mock_server, 1500).await;

    let urls: Vec<String> = report.results.iter().map(|p| p.url.to_string()).collect();
    assert_eq!(urls, vec![format!("{}/", base_url), format!("{}/c", base_url)]);
    assert_eq!(report.pages_scraped, 3);
    assert_eq!(report.pages_failed, 1);

    let failed: Vec<&CrawlEvent> = events
        .iter()
        .filter(|e| {
            matches!(e, CrawlEvent::Progress { page: Some(page), .. } if page.state == PageState::Failed)
        })
        .collect();
    assert_eq!(failed.len(), 1);

    let outcome = CrawlOutcome::from_results(&report.results);
    assert!(!outcome.sitemap_xml.contains(&format!("{}/b<", base_url)));
    assert!(!outcome.full_text.contains(&format!("URL: {}/b\n", base_url)));
}

#[tokio::test]
async fn test_non_document_links_not_fetched() {
    let mock_server = MockServer::start().await;

    mount_page(
        &mock_server,
        "/",
        r#"
            <a href="/logo.png">Logo</a>
            <a href="/style.css">Style</a>
            <a href="/manual.PDF">Manual</a>
            <a href="/fonts/x.woff2">Font</a>
            <a href="/doc">Doc</a>
        "#
        .to_string(),
    )
    .await;
    mount_page(&mock_server, "/doc", "doc".to_string()).await;

    let (report, _) = run_http(&mock_server, 1500).await;

    assert_eq!(report.results.len(), 2);
    let requests = mock_server.received_requests().await.expect("recording enabled");
    let paths: Vec<&str> = requests.iter().map(|r| r.url.path()).collect();
    assert_eq!(paths, vec!["/", "/doc"]);
}

#[tokio::test]
async fn test_redirected_page_is_scraped() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(&mock_server, "/", r#"<a href="/old">Old</a>"#.to_string()).await;
    Mock::given(method("GET"))
        .and(path("/old"))
        .respond_with(ResponseTemplate::new(301).insert_header("location", "/new"))
        .mount(&mock_server)
        .await;
    mount_page(&mock_server, "/new", "<title>New</title>".to_string()).await;

    let (report, _) = run_http(&mock_server, 1500).await;

    // Results keep the URL that was dequeued
    assert_eq!(report.results.len(), 2);
    assert_eq!(report.results[1].url.as_str(), format!("{}/old", base_url));
    assert_eq!(report.results[1].title.as_deref(), Some("New"));
}

#[tokio::test]
async fn test_cap_over_http() {
    let mock_server = MockServer::start().await;

    mount_page(
        &mock_server,
        "/",
        r#"<a href="/1">1</a><a href="/2">2</a><a href="/3">3</a>"#.to_string(),
    )
    .await;
    for route in ["/1", "/2", "/3"] {
        mount_page(&mock_server, route, "leaf".to_string()).await;
    }

    let (report, events) = run_http(&mock_server, 2).await;

    assert!(report.cap_reached);
    assert_eq!(report.pages_scraped, 2);
    assert_eq!(events.last(), Some(&CrawlEvent::cap_reached(2)));
}

/// Synthetic binary-tree site: `/p{i}` links to `/p{2i+1}` and `/p{2i+2}`
struct TreeSite {
    size: usize,
}

impl PageFetcher for TreeSite {
    async fn fetch(&self, url: &Url) -> Result<String, ScribeError> {
        let index: usize = url
            .path()
            .trim_start_matches("/p")
            .parse()
            .ok()
            .filter(|i| *i < self.size)
            .ok_or_else(|| ScribeError::Status {
                url: url.to_string(),
                status: 404,
            })?;

        Ok(format!(
            r#"<html><head><title>Page {i}</title></head><body>
            <a href="/p{l}">left</a><a href="/p{r}">right</a>
            <a href="https://elsewhere.test/p{l}">off-site</a>
            </body></html>"#,
            i = index,
            l = 2 * index + 1,
            r = 2 * index + 2
        ))
    }
}

#[tokio::test]
async fn test_cap_enforced_at_default_limit() {
    let crawler = Crawler::new(
        CrawlerConfig {
            delay_ms: 0,
            ..CrawlerConfig::default()
        },
        TreeSite { size: 4000 },
    );
    let seed = Url::parse("https://tree.test/p0").unwrap();
    let mut events = Vec::new();

    let report = crawler.run(seed, &mut events).await.unwrap();

    assert_eq!(report.pages_scraped, 1500);
    assert_eq!(report.results.len(), 1500);
    assert!(report.cap_reached);
    assert_eq!(
        events.last(),
        Some(&CrawlEvent::cap_reached(1500))
    );

    let urls = reported_urls(&events);
    assert_eq!(urls.len(), 1500);
    assert!(urls.iter().all(|u| u.starts_with("https://tree.test/")));

    // Breadth-first over a binary tree visits indices in order
    let expected: Vec<String> = (0..1500).map(|i| format!("https://tree.test/p{}", i)).collect();
    assert_eq!(urls, expected);
}

#[tokio::test]
async fn test_small_site_no_cap_warning() {
    let crawler = Crawler::new(
        CrawlerConfig {
            max_pages: 100,
            delay_ms: 0,
        },
        TreeSite { size: 7 },
    );
    let seed = Url::parse("https://tree.test/p0").unwrap();
    let mut events = Vec::new();

    let report = crawler.run(seed, &mut events).await.unwrap();

    // 7 pages exist; their 8 leaf links fail with 404
    assert_eq!(report.results.len(), 7);
    assert_eq!(report.pages_failed, 8);
    assert!(!report.cap_reached);
    assert!(events
        .iter()
        .all(|e| !matches!(e, CrawlEvent::Progress { page: None, .. })));
}

#[tokio::test]
async fn test_disconnected_consumer_stops_crawl() {
    let crawler = Crawler::new(
        CrawlerConfig {
            max_pages: 100,
            delay_ms: 0,
        },
        TreeSite { size: 100 },
    );
    let (mut tx, rx) = tokio::sync::mpsc::unbounded_channel::<CrawlEvent>();
    drop(rx);

    let report = crawler
        .run(Url::parse("https://tree.test/p0").unwrap(), &mut tx)
        .await
        .unwrap();

    assert!(report.cancelled);
    assert_eq!(report.pages_scraped, 1);
}

#[tokio::test]
async fn test_aggregation_is_deterministic() {
    let crawler = Crawler::new(
        CrawlerConfig {
            max_pages: 31,
            delay_ms: 0,
        },
        TreeSite { size: 31 },
    );
    let seed = Url::parse("https://tree.test/p0").unwrap();
    let report = crawler.run(seed, &mut Vec::<CrawlEvent>::new()).await.unwrap();

    let first = CrawlOutcome::from_results(&report.results);
    let second = CrawlOutcome::from_results(&report.results);
    assert_eq!(first.full_text, second.full_text);
    assert_eq!(first.sitemap_xml, second.sitemap_xml);
}

#[tokio::test]
async fn test_json_lines_stream_ends_with_terminal_event() {
    let mock_server = MockServer::start().await;
    mount_page(&mock_server, "/", "<title>Only</title>".to_string()).await;

    let mut sink = JsonLinesSink::new(Vec::new());
    crawl(
        &format!("{}/", mock_server.uri()),
        &create_test_config(10),
        &mut sink,
    )
    .await;

    let output = String::from_utf8(sink.into_inner()).unwrap();
    let lines: Vec<serde_json::Value> = output
        .lines()
        .map(|l| serde_json::from_str(l).expect("valid JSON line"))
        .collect();

    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0]["type"], "progress");
    assert_eq!(lines[1]["type"], "complete");
    assert!(lines[1]["data"]["sitemap"]
        .as_str()
        .unwrap()
        .starts_with("<?xml"));
    assert!(lines[1]["data"]["content"]
        .as_str()
        .unwrap()
        .contains("TITLE: Only"));
}
