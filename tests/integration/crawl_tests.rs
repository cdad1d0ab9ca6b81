//! Integration tests for the crawler
//!
//! These tests use wiremock to serve a paginated listing and its detail pages,
//! and run the full crawl cycle end-to-end into a CSV file.

use acts_harvester::config::Config;
use acts_harvester::crawler::run_crawl;
use acts_harvester::{CrawlError, DiscoveryError};
use std::path::Path;
use tempfile::TempDir;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration pointing at the mock server
fn create_test_config(base_url: &str, csv_path: &Path) -> Config {
    let mut config = Config::default();
    config.site.base_url = format!("{}/", base_url);
    config.site.listing_path = "na/".to_string();
    config.http.max_retries = 0;
    config.http.retry_delay_ms = 10;
    config.output.csv_path = csv_path.to_string_lossy().into_owned();
    config
}

fn item_html(idx: usize) -> String {
    format!(
        r#"<div class="cross-result"><div class="title-source"><div class="title"><a href="/acts/{idx}">Act {idx}</a></div></div></div>"#
    )
}

fn listing_html(items: std::ops::Range<usize>, counter: &str) -> String {
    let items: String = items.map(item_html).collect();
    format!(
        r#"<html><body>
        <div class="results"><div class="results_counter">{counter}</div></div>
        <div id="content"><div><div><div><div class="cross-results">{items}</div></div></div></div></div>
        <button id="la_load" data-cross-ajax-url="/na/more?Page=1&amp;Date.Time=Any">Show more</button>
        </body></html>"#
    )
}

fn html(body: String) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .set_body_string(body)
        .insert_header("content-type", "text/html")
}

/// Mounts a listing of `total` items, `page_size` per page
///
/// Detail pages listed in `missing` are not mounted and answer 404.
async fn mount_listing(server: &MockServer, total: usize, page_size: usize, missing: &[usize]) {
    Mock::given(method("GET"))
        .and(path("/na/"))
        .respond_with(html(listing_html(
            0..page_size.min(total),
            &format!("{} documents found", total),
        )))
        .mount(server)
        .await;

    let pages = (total + page_size - 1) / page_size;
    for page in 0..pages {
        let items = page * page_size..((page + 1) * page_size).min(total);
        Mock::given(method("GET"))
            .and(path("/na/more"))
            .and(query_param("Page", page.to_string()))
            .and(query_param("Date.Time", "Any"))
            .respond_with(html(listing_html(items, "")))
            .mount(server)
            .await;
    }

    for idx in (0..total).filter(|idx| !missing.contains(idx)) {
        Mock::given(method("GET"))
            .and(path(format!("/acts/{}", idx)))
            .respond_with(html(format!(
                r#"<html><body><div id="content"><h1>Act {idx}</h1><p>Body of act {idx}</p></div></body></html>"#
            )))
            .mount(server)
            .await;
    }
}

fn read_rows(path: &Path) -> Vec<(String, String)> {
    csv::ReaderBuilder::new()
        .has_headers(false)
        .from_path(path)
        .expect("Failed to open CSV")
        .records()
        .map(|record| {
            let record = record.expect("Failed to read record");
            (record[0].to_string(), record[1].to_string())
        })
        .collect()
}

#[tokio::test]
async fn test_full_crawl_to_csv() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();
    mount_listing(&mock_server, 7, 3, &[]).await;

    let dir = TempDir::new().unwrap();
    let csv_path = dir.path().join("acts.csv");
    let config = create_test_config(&base_url, &csv_path);

    let summary = run_crawl(config, 0, true).await.expect("Crawl failed");
    assert_eq!(summary.documents_written, 7);
    assert_eq!(summary.documents_without_text, 0);
    assert!(summary.is_complete());

    let rows = read_rows(&csv_path);
    assert_eq!(rows.len(), 7);
    for (idx, (url, text)) in rows.iter().enumerate() {
        assert_eq!(url, &format!("{}/acts/{}", base_url, idx));
        assert_eq!(text, &format!("Act {idx}\nBody of act {idx}"));
    }
}

#[tokio::test]
async fn test_resumed_run_writes_the_suffix() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();
    mount_listing(&mock_server, 7, 3, &[]).await;

    let dir = TempDir::new().unwrap();
    let full_path = dir.path().join("full.csv");
    let resumed_path = dir.path().join("resumed.csv");

    run_crawl(create_test_config(&base_url, &full_path), 0, true)
        .await
        .expect("Full crawl failed");

    // Resume in the middle of the second page
    let summary = run_crawl(create_test_config(&base_url, &resumed_path), 4, true)
        .await
        .expect("Resumed crawl failed");
    assert_eq!(summary.planned_items, 3);
    assert_eq!(summary.next_start_idx(), 7);

    let full = read_rows(&full_path);
    let resumed = read_rows(&resumed_path);
    assert_eq!(resumed, full[4..].to_vec());
}

#[tokio::test]
async fn test_resume_appends_to_existing_csv() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();
    mount_listing(&mock_server, 5, 2, &[]).await;

    let dir = TempDir::new().unwrap();
    let csv_path = dir.path().join("acts.csv");
    std::fs::write(
        &csv_path,
        format!("{}/acts/0,Act 0\n{}/acts/1,Act 1\n", base_url, base_url),
    )
    .unwrap();

    run_crawl(create_test_config(&base_url, &csv_path), 2, true)
        .await
        .expect("Crawl failed");

    let urls: Vec<String> = read_rows(&csv_path).into_iter().map(|(url, _)| url).collect();
    let expected: Vec<String> = (0..5).map(|i| format!("{}/acts/{}", base_url, i)).collect();
    assert_eq!(urls, expected);
}

#[tokio::test]
async fn test_failed_detail_page_is_recorded_without_text() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();
    mount_listing(&mock_server, 4, 2, &[2]).await;

    let dir = TempDir::new().unwrap();
    let csv_path = dir.path().join("acts.csv");

    let summary = run_crawl(create_test_config(&base_url, &csv_path), 0, true)
        .await
        .expect("Crawl failed");
    assert_eq!(summary.documents_written, 4);
    assert_eq!(summary.documents_without_text, 1);

    let rows = read_rows(&csv_path);
    assert_eq!(rows.len(), 4);
    assert_eq!(rows[2], (format!("{}/acts/2", base_url), String::new()));
    assert_eq!(rows[3].1, "Act 3\nBody of act 3");
}

#[tokio::test]
async fn test_unparsable_counter_aborts_before_paging() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/na/"))
        .respond_with(html(listing_html(0..3, "many documents")))
        .mount(&mock_server)
        .await;

    // No paged listing request may be made
    Mock::given(method("GET"))
        .and(path("/na/more"))
        .respond_with(html(listing_html(0..3, "")))
        .expect(0)
        .mount(&mock_server)
        .await;

    let dir = TempDir::new().unwrap();
    let csv_path = dir.path().join("acts.csv");

    let result = run_crawl(create_test_config(&base_url, &csv_path), 0, true).await;
    assert!(matches!(
        result,
        Err(CrawlError::Discovery(DiscoveryError::UnparsableCounter(_)))
    ));
    assert!(read_rows(&csv_path).is_empty());
}

#[tokio::test]
async fn test_resume_past_end_is_rejected() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();
    mount_listing(&mock_server, 5, 2, &[]).await;

    let dir = TempDir::new().unwrap();
    let csv_path = dir.path().join("acts.csv");

    let result = run_crawl(create_test_config(&base_url, &csv_path), 6, true).await;
    assert!(matches!(
        result,
        Err(CrawlError::Discovery(DiscoveryError::ResumePastEnd {
            start_from_idx: 6,
            site_total: 5
        }))
    ));
}
