//! Integration tests for the crawler
//!
//! These tests use wiremock to serve a small documentation site and run the
//! full crawl cycle end-to-end against it.

use doc_scraper::config::Config;
use doc_scraper::crawler::Coordinator;
use doc_scraper::output::{CrawlStatus, FileFailureLog, Section};
use doc_scraper::ScrapeError;
use std::path::Path;
use std::time::{Duration, Instant};
use tempfile::TempDir;
use tokio_util::sync::CancellationToken;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, Request, Respond, ResponseTemplate};

/// Creates a test configuration writing everything under `dir`
fn create_test_config(dir: &Path) -> Config {
    let mut config = Config::default();
    config.crawler.delay_secs = 0.0;
    config.crawler.request_timeout_secs = 5;
    config.output.output_dir = dir.join("out").to_string_lossy().into_owned();
    config.output.error_log = dir.join("errors.log").to_string_lossy().into_owned();
    config
}

/// A documentation page with its title in the header and a `<main>` body
fn doc_page(title: &str, body: &str) -> String {
    format!(
        r#"<html><head><title>{title} | Docs</title></head><body>
        <header><h1>{title}</h1></header>
        <nav><a href="/api">API</a></nav>
        <main><h2>Overview</h2><p>{body}</p></main>
        </body></html>"#
    )
}

/// Index page: sidebar links plus noise the extractor must ignore
fn index_page() -> String {
    r##"<html><head><title>Docs</title></head><body>
        <header><h1>Welcome</h1></header>
        <nav>
            <a href="/guide/setup">Setup</a>
            <a href="/guide/intro?ref=nav#top">Introduction</a>
            <a href="#content">Skip to content</a>
            <a href="mailto:docs@example.com">Contact</a>
            <a href="/downloads/manual.pdf">Manual</a>
            <a href="https://github.com/example/docs">GitHub</a>
        </nav>
        <aside><ul><li><a href="/api">API</a></li></ul></aside>
        <main><p>Start here.</p></main>
    </body></html>"##
        .to_string()
}

fn html(body: String) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .set_body_string(body)
        .insert_header("content-type", "text/html")
}

/// Mounts the index page and the three sidebar pages
async fn mount_site(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html(index_page()))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api"))
        .respond_with(html(doc_page("API Reference", "Endpoints.")))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/guide/intro"))
        .respond_with(html(doc_page("Introduction", "What this is.")))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/guide/setup"))
        .respond_with(html(doc_page("Setup", "How to install.")))
        .mount(server)
        .await;
}

/// Titles of the page blocks in a Markdown document, in order
fn block_titles(markdown: &str) -> Vec<String> {
    markdown
        .lines()
        .filter_map(|line| line.strip_prefix("# "))
        .map(str::to_string)
        .collect()
}

fn separator_count(markdown: &str) -> usize {
    markdown.lines().filter(|line| *line == "---").count()
}

fn error_log_lines(dir: &Path) -> Vec<String> {
    std::fs::read_to_string(dir.join("errors.log"))
        .unwrap_or_default()
        .lines()
        .map(str::to_string)
        .collect()
}

/// Cancels the crawl when the page is requested, then serves it normally
struct CancelOnRequest {
    cancel: CancellationToken,
    response: ResponseTemplate,
}

impl Respond for CancelOnRequest {
    fn respond(&self, _request: &Request) -> ResponseTemplate {
        self.cancel.cancel();
        self.response.clone()
    }
}

#[tokio::test]
async fn test_full_crawl_single_site() {
    let mock_server = MockServer::start().await;
    mount_site(&mock_server).await;

    let dir = TempDir::new().unwrap();
    let config = create_test_config(dir.path());
    let log = FileFailureLog::open(&dir.path().join("errors.log")).unwrap();

    let coordinator = Coordinator::new(config, &log, CancellationToken::new()).unwrap();
    let report = coordinator.run(&mock_server.uri()).await.expect("Crawl failed");

    // 3 sidebar links + the base URL
    assert_eq!(report.status, CrawlStatus::Completed);
    assert_eq!(report.pages_total, 4);
    assert_eq!(report.pages_processed, 4);
    assert_eq!(report.pages_converted, 4);
    assert_eq!(report.pages_empty, 0);

    let file_name = report.markdown_path.file_name().unwrap().to_string_lossy().into_owned();
    assert!(file_name.starts_with("docs_127.0.0.1_"), "{}", file_name);
    assert!(file_name.ends_with(".md"));

    // Base URL first, then the sidebar links in sorted order
    let markdown = std::fs::read_to_string(&report.markdown_path).unwrap();
    assert_eq!(
        block_titles(&markdown),
        vec!["Welcome", "API Reference", "Introduction", "Setup"]
    );
    assert_eq!(separator_count(&markdown), 4);
    assert!(markdown.ends_with("\n---\n"));
    assert!(markdown.contains("## Overview"));
    assert!(markdown.contains("How to install."));

    // The partial file mirrors the full file
    let partial = std::fs::read_to_string(&report.partial_path).unwrap();
    assert_eq!(partial, markdown);
    assert_eq!(report.partial_path.file_name().unwrap(), "docs_partial.md");

    let json_path = report.json_path.expect("JSON path missing");
    let sections: Vec<Section> =
        serde_json::from_str(&std::fs::read_to_string(&json_path).unwrap()).unwrap();
    let titles: Vec<&str> = sections.iter().map(|s| s.title.as_str()).collect();
    assert_eq!(titles, vec!["Welcome", "API Reference", "Introduction", "Setup"]);
    assert_eq!(report.sections, 4);
    assert_eq!(sections[3].content.last().map(String::as_str), Some("---"));

    assert!(error_log_lines(dir.path()).is_empty());
}

#[tokio::test]
async fn test_failed_pages_are_logged_and_skipped() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html(index_page()))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api"))
        .respond_with(html(doc_page("API Reference", "Endpoints.")))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/guide/intro"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    // No <main>, <article> or doc container
    Mock::given(method("GET"))
        .and(path("/guide/setup"))
        .respond_with(html(
            "<html><body><h1>Setup</h1><div>loose text</div></body></html>".to_string(),
        ))
        .mount(&mock_server)
        .await;

    let dir = TempDir::new().unwrap();
    let config = create_test_config(dir.path());
    let log = FileFailureLog::open(&dir.path().join("errors.log")).unwrap();

    let coordinator = Coordinator::new(config, &log, CancellationToken::new()).unwrap();
    let report = coordinator.run(&mock_server.uri()).await.expect("Crawl failed");

    assert_eq!(report.status, CrawlStatus::Completed);
    assert_eq!(report.pages_processed, 4);
    assert_eq!(report.pages_converted, 2);
    assert_eq!(report.pages_empty, 2);

    let markdown = std::fs::read_to_string(&report.markdown_path).unwrap();
    assert_eq!(block_titles(&markdown), vec!["Welcome", "API Reference"]);
    assert_eq!(separator_count(&markdown), 2);

    let base = mock_server.uri();
    let lines = error_log_lines(dir.path());
    assert_eq!(lines.len(), 2);
    assert!(lines[0].contains(&format!("Failed to fetch {}/guide/intro: HTTP 500", base)));
    assert!(lines[1].contains(&format!("No readable content found on {}/guide/setup", base)));
}

#[tokio::test]
async fn test_index_failure_is_fatal() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&mock_server)
        .await;

    let dir = TempDir::new().unwrap();
    let config = create_test_config(dir.path());
    let log = FileFailureLog::open(&dir.path().join("errors.log")).unwrap();

    let coordinator = Coordinator::new(config, &log, CancellationToken::new()).unwrap();
    let result = coordinator.run(&mock_server.uri()).await;

    assert!(matches!(
        result.unwrap_err(),
        ScrapeError::HttpStatus { status: 404, .. }
    ));

    // Nothing written besides the (empty) output directory
    let entries = std::fs::read_dir(dir.path().join("out")).unwrap().count();
    assert_eq!(entries, 0);
    assert!(error_log_lines(dir.path()).is_empty());
}

#[tokio::test]
async fn test_interrupt_keeps_partial_output_and_skips_json() {
    let mock_server = MockServer::start().await;
    let cancel = CancellationToken::new();

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html(index_page()))
        .mount(&mock_server)
        .await;

    // Cancellation arrives while the second page is in flight
    Mock::given(method("GET"))
        .and(path("/api"))
        .respond_with(CancelOnRequest {
            cancel: cancel.clone(),
            response: html(doc_page("API Reference", "Endpoints.")),
        })
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/guide/intro"))
        .respond_with(html(doc_page("Introduction", "What this is.")))
        .expect(0)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/guide/setup"))
        .respond_with(html(doc_page("Setup", "How to install.")))
        .expect(0)
        .mount(&mock_server)
        .await;

    let dir = TempDir::new().unwrap();
    let mut config = create_test_config(dir.path());
    config.crawler.delay_secs = 1.0;
    let log = FileFailureLog::open(&dir.path().join("errors.log")).unwrap();

    let started = Instant::now();
    let coordinator = Coordinator::new(config, &log, cancel).unwrap();
    let report = coordinator.run(&mock_server.uri()).await.expect("Crawl failed");

    // Full pause after the first page, the second pause is cut short
    let elapsed = started.elapsed();
    assert!(elapsed >= Duration::from_secs(1));
    assert!(elapsed < Duration::from_millis(1900), "{:?}", elapsed);

    assert_eq!(report.status, CrawlStatus::Interrupted);
    assert_eq!(report.pages_total, 4);
    assert_eq!(report.pages_processed, 2);
    assert!(report.json_path.is_none());

    let partial = std::fs::read_to_string(&report.partial_path).unwrap();
    assert_eq!(block_titles(&partial), vec!["Welcome", "API Reference"]);
    assert_eq!(separator_count(&partial), 2);

    let full = std::fs::read_to_string(&report.markdown_path).unwrap();
    assert_eq!(full, partial);

    let json_files = std::fs::read_dir(dir.path().join("out"))
        .unwrap()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.path().extension().map_or(false, |ext| ext == "json"))
        .count();
    assert_eq!(json_files, 0);
}

#[tokio::test]
async fn test_interrupt_during_discovery_keeps_previous_output() {
    let mock_server = MockServer::start().await;
    let cancel = CancellationToken::new();

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(CancelOnRequest {
            cancel: cancel.clone(),
            response: html(index_page()),
        })
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api"))
        .respond_with(html(doc_page("API Reference", "Endpoints.")))
        .expect(0)
        .mount(&mock_server)
        .await;

    let dir = TempDir::new().unwrap();
    let config = create_test_config(dir.path());
    let out_dir = dir.path().join("out");
    std::fs::create_dir_all(&out_dir).unwrap();
    let previous = "# Earlier run\n\nStill here.\n\n---\n";
    std::fs::write(out_dir.join("docs_partial.md"), previous).unwrap();
    let log = FileFailureLog::open(&dir.path().join("errors.log")).unwrap();

    let coordinator = Coordinator::new(config, &log, cancel).unwrap();
    let report = coordinator.run(&mock_server.uri()).await.expect("Crawl failed");

    assert_eq!(report.status, CrawlStatus::Interrupted);
    assert_eq!(report.pages_total, 0);
    assert_eq!(report.pages_processed, 0);
    assert!(report.json_path.is_none());

    assert_eq!(std::fs::read_to_string(&report.partial_path).unwrap(), previous);
    assert!(!report.markdown_path.exists());
    assert_eq!(std::fs::read_dir(&out_dir).unwrap().count(), 1);
}

#[tokio::test]
async fn test_base_url_already_listed_not_duplicated() {
    let mock_server = MockServer::start().await;
    let base = format!("{}/docs", mock_server.uri());

    Mock::given(method("GET"))
        .and(path("/docs"))
        .respond_with(html(
            r#"<html><body><h1>Docs Home</h1>
               <nav><a href="/docs">Home</a><a href="/docs/next">Next</a></nav>
               <main><p>Home page.</p></main></body></html>"#
                .to_string(),
        ))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/docs/next"))
        .respond_with(html(doc_page("Next", "Second page.")))
        .mount(&mock_server)
        .await;

    let dir = TempDir::new().unwrap();
    let config = create_test_config(dir.path());
    let log = FileFailureLog::open(&dir.path().join("errors.log")).unwrap();

    // Trailing slash stripped before comparing with the sidebar links
    let coordinator = Coordinator::new(config, &log, CancellationToken::new()).unwrap();
    let report = coordinator.run(&format!("{}/", base)).await.expect("Crawl failed");

    assert_eq!(report.pages_total, 2);
    let markdown = std::fs::read_to_string(&report.markdown_path).unwrap();
    assert_eq!(block_titles(&markdown), vec!["Docs Home", "Next"]);
}

#[tokio::test]
async fn test_user_agent_and_delay() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(header("user-agent", "IntegrationBot/1.0"))
        .and(path("/"))
        .respond_with(html(
            r#"<html><body><h1>Home</h1><nav><a href="/one">One</a></nav><main>x</main></body></html>"#
                .to_string(),
        ))
        .expect(2)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(header("user-agent", "IntegrationBot/1.0"))
        .and(path("/one"))
        .respond_with(html(doc_page("One", "First.")))
        .expect(1)
        .mount(&mock_server)
        .await;

    let dir = TempDir::new().unwrap();
    let mut config = create_test_config(dir.path());
    config.crawler.delay_secs = 0.2;
    config.user_agent.header = "IntegrationBot/1.0".to_string();
    let log = FileFailureLog::open(&dir.path().join("errors.log")).unwrap();

    let started = Instant::now();
    let coordinator = Coordinator::new(config, &log, CancellationToken::new()).unwrap();
    let report = coordinator.run(&mock_server.uri()).await.expect("Crawl failed");

    // One pause after each of the two pages
    assert!(started.elapsed() >= Duration::from_millis(400));
    assert_eq!(report.pages_converted, 2);
}
