//! Integration tests for the crawler
//!
//! These tests use wiremock to stand in for the gallery site and run the
//! full crawl: profile page, feed pages, series pages and image downloads.

use photo_ripple::config::{Config, DownloadConfig, HttpConfig, SiteConfig};
use photo_ripple::crawler::{Coordinator, NEXT_PAGE_PATH};
use photo_ripple::state::CrawlState;
use photo_ripple::RippleError;
use serde_json::json;
use std::path::Path;
use tempfile::TempDir;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const USER: &str = "jane";
const USER_ID: &str = "4821";

/// Creates a test configuration pointing at the mock server
fn create_test_config(base_url: &str, output_dir: &Path) -> Config {
    Config {
        site: SiteConfig {
            base_url: base_url.to_string(),
        },
        http: HttpConfig::default(),
        download: DownloadConfig {
            workers: 4,
            output_dir: output_dir.to_string_lossy().into_owned(),
        },
    }
}

/// A direct photo entry whose image is served at `/img/<id>.jpg`
fn photo_entry(base_url: &str, id: &str, title: &str) -> String {
    format!(
        r#"<a class="item" photo-id="{id}" href="{base}/photo_{id}/" href-large="{base}/img/{id}.jpg"><img title="{title}"></a>"#,
        id = id,
        base = base_url,
        title = title
    )
}

/// A series entry whose page is served at `/photo_<id>/`
fn series_entry(base_url: &str, id: &str, title: &str) -> String {
    format!(
        r#"<a class="item series" photo-id="{id}" href="{base}/photo_{id}/" href-large="{base}/img/{id}.jpg"><img title="{title}"></a>"#,
        id = id,
        base = base_url,
        title = title
    )
}

fn profile_page(base_url: &str, entries: &[String]) -> String {
    format!(
        r#"<html><head><title>{user}</title></head><body>
        <a href="{base}/rss/user_{uid}.xml">RSS</a>
        <div class="containerMain"><div class="parentPhotoBlock">{entries}</div></div>
        </body></html>"#,
        user = USER,
        base = base_url,
        uid = USER_ID,
        entries = entries.join("\n")
    )
}

fn series_page(srcs: &[String]) -> String {
    let photos: Vec<_> = srcs.iter().map(|src| json!({ "src": src })).collect();
    format!(
        "<html><body><div class=\"containerMain\"><script>\nvar photoData = {};\n</script></div></body></html>",
        json!({ "series": photos })
    )
}

async fn mount_profile(server: &MockServer, entries: &[String]) {
    Mock::given(method("GET"))
        .and(path(format!("/{}", USER)))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(profile_page(&server.uri(), entries)),
        )
        .mount(server)
        .await;
}

async fn mount_next_page(server: &MockServer, last_id: &str, data: &str, expected_calls: u64) {
    Mock::given(method("GET"))
        .and(path(NEXT_PAGE_PATH))
        .and(query_param("type", "getNextPageData"))
        .and(query_param("page", "photoUser"))
        .and(query_param("lastId", last_id))
        .and(query_param("user_id", USER_ID))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": data })))
        .expect(expected_calls)
        .mount(server)
        .await;
}

async fn mount_image(server: &MockServer, image_path: &str, body: &[u8], expected_calls: u64) {
    Mock::given(method("GET"))
        .and(path(image_path))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(body.to_vec()))
        .expect(expected_calls)
        .mount(server)
        .await;
}

fn files_in(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .expect("Failed to read output dir")
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

#[tokio::test]
async fn test_single_page_then_end_of_feed() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_profile(
        &server,
        &[
            photo_entry(&base, "99", "Jane - Harbour"),
            photo_entry(&base, "100", "Jane - Old town"),
        ],
    )
    .await;
    mount_next_page(&server, "100", "", 1).await;
    mount_image(&server, "/img/99.jpg", b"harbour", 1).await;
    mount_image(&server, "/img/100.jpg", b"town", 1).await;

    let output = TempDir::new().unwrap();
    let coordinator = Coordinator::new(create_test_config(&base, output.path())).unwrap();
    let report = coordinator.run(USER).await.expect("Crawl failed");

    assert_eq!(report.final_state, CrawlState::Done);
    assert_eq!(report.user_id, USER_ID);
    assert_eq!(report.pages, 1);
    assert_eq!(report.items_queued, 2);
    assert_eq!(report.downloads.downloaded, 2);
    assert_eq!(report.downloads.failed, 0);

    assert_eq!(
        files_in(output.path()),
        vec!["100 Old town.jpg".to_string(), "99 Harbour.jpg".to_string()]
    );
    assert_eq!(
        std::fs::read(output.path().join("99 Harbour.jpg")).unwrap(),
        b"harbour"
    );
}

#[tokio::test]
async fn test_profile_not_found_fails_without_work() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("/{}", USER)))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(NEXT_PAGE_PATH))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let output = TempDir::new().unwrap();
    let coordinator = Coordinator::new(create_test_config(&server.uri(), output.path())).unwrap();
    let result = coordinator.run(USER).await;

    match result {
        Err(RippleError::ProfileUnavailable { reason, .. }) => assert_eq!(reason, "404"),
        other => panic!("Expected ProfileUnavailable, got {:?}", other.map(|r| r.final_state)),
    }
    assert!(files_in(output.path()).is_empty());
}

#[tokio::test]
async fn test_profile_without_feed_link_fails() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("/{}", USER)))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"<html><body><a class="item" photo-id="1" href-large="x"></a></body></html>"#,
        ))
        .mount(&server)
        .await;

    let output = TempDir::new().unwrap();
    let coordinator = Coordinator::new(create_test_config(&server.uri(), output.path())).unwrap();
    let result = coordinator.run(USER).await;

    assert!(matches!(result, Err(RippleError::MissingUserId { .. })));
}

#[tokio::test]
async fn test_failed_series_does_not_abort_crawl() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_profile(
        &server,
        &[
            photo_entry(&base, "10", "Jane - Before"),
            series_entry(&base, "11", "Jane - Broken series"),
            photo_entry(&base, "12", "Jane - After"),
        ],
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/photo_11/"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;
    mount_next_page(&server, "12", "", 1).await;
    mount_image(&server, "/img/10.jpg", b"before", 1).await;
    mount_image(&server, "/img/12.jpg", b"after", 1).await;

    let output = TempDir::new().unwrap();
    let coordinator = Coordinator::new(create_test_config(&base, output.path())).unwrap();
    let report = coordinator.run(USER).await.expect("Crawl failed");

    assert_eq!(report.final_state, CrawlState::Done);
    assert_eq!(report.items_queued, 2);
    assert_eq!(
        files_in(output.path()),
        vec!["10 Before.jpg".to_string(), "12 After.jpg".to_string()]
    );
}

#[tokio::test]
async fn test_multi_page_walk_with_series() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_profile(&server, &[photo_entry(&base, "300", "Jane - First")]).await;

    let second_page = [
        series_entry(&base, "200", "Jane - Walk"),
        photo_entry(&base, "150", "Jane - ...."),
    ]
    .join("\n");
    mount_next_page(&server, "300", &second_page, 1).await;
    mount_next_page(&server, "150", "", 1).await;

    Mock::given(method("GET"))
        .and(path("/photo_200/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(series_page(&[
            format!("{}/img/s1.jpg", base),
            format!("{}/img/s2.jpg", base),
        ])))
        .expect(1)
        .mount(&server)
        .await;
    for image in ["/img/300.jpg", "/img/150.jpg", "/img/s1.jpg", "/img/s2.jpg"] {
        mount_image(&server, image, b"jpeg", 1).await;
    }

    let output = TempDir::new().unwrap();
    let coordinator = Coordinator::new(create_test_config(&base, output.path())).unwrap();
    let report = coordinator.run(USER).await.expect("Crawl failed");

    assert_eq!(report.final_state, CrawlState::Done);
    assert_eq!(report.pages, 2);
    assert_eq!(report.items_queued, 4);
    assert_eq!(
        files_in(output.path()),
        vec![
            "150.jpg".to_string(),
            "200 Walk (01).jpg".to_string(),
            "200 Walk (02).jpg".to_string(),
            "300 First.jpg".to_string(),
        ]
    );
}

#[tokio::test]
async fn test_next_page_failure_still_downloads_seeded_photos() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_profile(&server, &[photo_entry(&base, "7", "Jane - Only")]).await;
    Mock::given(method("GET"))
        .and(path(NEXT_PAGE_PATH))
        .respond_with(ResponseTemplate::new(502))
        .expect(1)
        .mount(&server)
        .await;
    mount_image(&server, "/img/7.jpg", b"only", 1).await;

    let output = TempDir::new().unwrap();
    let coordinator = Coordinator::new(create_test_config(&base, output.path())).unwrap();
    let report = coordinator.run(USER).await.expect("Crawl failed");

    assert_eq!(report.final_state, CrawlState::Aborted);
    assert_eq!(report.downloads.downloaded, 1);
    assert!(output.path().join("7 Only.jpg").exists());
}

#[tokio::test]
async fn test_empty_profile_drains_without_paging() {
    let server = MockServer::start().await;

    mount_profile(&server, &[]).await;
    Mock::given(method("GET"))
        .and(path(NEXT_PAGE_PATH))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let output = TempDir::new().unwrap();
    let coordinator = Coordinator::new(create_test_config(&server.uri(), output.path())).unwrap();
    let report = tokio::time::timeout(std::time::Duration::from_secs(10), coordinator.run(USER))
        .await
        .expect("Crawl should not hang")
        .expect("Crawl failed");

    assert_eq!(report.final_state, CrawlState::Done);
    assert_eq!(report.items_queued, 0);
    assert_eq!(report.downloads.total(), 0);
}

#[tokio::test]
async fn test_second_run_downloads_nothing() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_profile(
        &server,
        &[
            photo_entry(&base, "1", "Jane - One"),
            photo_entry(&base, "2", "Jane - Two"),
        ],
    )
    .await;
    mount_next_page(&server, "2", "", 2).await;
    // Each image is fetched once across both runs
    mount_image(&server, "/img/1.jpg", b"one", 1).await;
    mount_image(&server, "/img/2.jpg", b"two", 1).await;

    let output = TempDir::new().unwrap();
    let config = create_test_config(&base, output.path());

    let first = Coordinator::new(config.clone())
        .unwrap()
        .run(USER)
        .await
        .expect("First crawl failed");
    assert_eq!(first.downloads.downloaded, 2);

    let second = Coordinator::new(config)
        .unwrap()
        .with_quiet(true)
        .run(USER)
        .await
        .expect("Second crawl failed");
    assert_eq!(second.downloads.downloaded, 0);
    assert_eq!(second.downloads.skipped, 2);
    assert_eq!(second.downloads.bytes, 0);
}

#[tokio::test]
async fn test_dry_run_writes_nothing() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_profile(&server, &[photo_entry(&base, "5", "Jane - Plan")]).await;
    mount_next_page(&server, "5", "", 1).await;
    mount_image(&server, "/img/5.jpg", b"plan", 0).await;

    let output = TempDir::new().unwrap();
    let coordinator = Coordinator::new(create_test_config(&base, output.path()))
        .unwrap()
        .with_dry_run(true);
    let report = coordinator.run(USER).await.expect("Crawl failed");

    assert_eq!(report.downloads.planned, 1);
    assert!(files_in(output.path()).is_empty());
}
