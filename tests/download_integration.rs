//! Integration tests for streaming PDF downloads.

#![allow(clippy::unwrap_used)]

mod support;

use std::time::{Duration, Instant};

use chrono::{TimeZone, Utc};
use paper_extractor_core::{
    DownloadError, DownloadSummary, FolderKind, HttpClient, NoopObserver, PaperDownloader,
    PaperRecord, folder_name,
};
use support::socket_guard::start_mock_server_or_skip;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn hosted_paper(server: &MockServer, id: &str, title: &str) -> PaperRecord {
    let published = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
    PaperRecord {
        id: id.to_string(),
        title: title.to_string(),
        authors: vec!["Ada Lovelace".to_string()],
        summary: String::new(),
        published,
        updated: published,
        pdf_url: format!("{}/pdf/{id}", server.uri()),
        abs_url: format!("http://arxiv.org/abs/{id}"),
        categories: vec!["cs.LG".to_string()],
        primary_category: None,
        doi: None,
        comment: None,
    }
}

fn downloader(delay: Duration) -> PaperDownloader {
    PaperDownloader::new(HttpClient::new().unwrap(), delay)
}

#[tokio::test]
async fn test_batch_lands_in_topic_folder() {
    let Some(mock_server) = start_mock_server_or_skip().await else {
        return;
    };
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![b'%'; 2048]))
        .expect(2)
        .mount(&mock_server)
        .await;

    let temp_dir = TempDir::new().unwrap();
    let folder = temp_dir
        .path()
        .join(folder_name(FolderKind::Topic, "Machine Learning"));
    let papers = [
        hosted_paper(&mock_server, "2403.00001v1", "Deep Nets: A Survey!"),
        hosted_paper(&mock_server, "2403.00002v2", "Gradient Descent"),
    ];

    let outcomes = downloader(Duration::ZERO)
        .download_all(&papers, &folder, &NoopObserver)
        .await;
    let summary = DownloadSummary::from_outcomes(&outcomes);

    assert_eq!(summary.succeeded, 2);
    assert_eq!(summary.failed, 0);
    assert_eq!(summary.total_bytes, 4096);
    assert!(folder.ends_with("machine_learning"));
    assert!(folder.join("deep_nets_a_survey_2403.00001v1.pdf").is_file());
    assert!(folder.join("gradient_descent_2403.00002v2.pdf").is_file());
}

#[tokio::test]
async fn test_existing_file_is_overwritten() {
    let Some(mock_server) = start_mock_server_or_skip().await else {
        return;
    };
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"%PDF new".to_vec()))
        .mount(&mock_server)
        .await;

    let temp_dir = TempDir::new().unwrap();
    let paper = hosted_paper(&mock_server, "2403.00003", "Rewrite");
    let dest = temp_dir.path().join("rewrite_2403.00003.pdf");
    std::fs::write(&dest, b"stale contents that are longer").unwrap();

    let outcome = downloader(Duration::ZERO)
        .download(&paper, temp_dir.path(), None, &NoopObserver)
        .await;

    assert!(outcome.is_success(), "{:?}", outcome.error());
    assert_eq!(std::fs::read(&dest).unwrap(), b"%PDF new");
}

#[tokio::test]
async fn test_failed_download_leaves_no_partial_file() {
    let Some(mock_server) = start_mock_server_or_skip().await else {
        return;
    };
    Mock::given(method("GET"))
        .and(path("/pdf/2403.00004"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let temp_dir = TempDir::new().unwrap();
    let paper = hosted_paper(&mock_server, "2403.00004", "Missing");

    let outcome = downloader(Duration::ZERO)
        .download(&paper, temp_dir.path(), None, &NoopObserver)
        .await;

    assert!(matches!(
        outcome.error(),
        Some(DownloadError::HttpStatus { status: 404, .. })
    ));
    let leftovers: Vec<_> = std::fs::read_dir(temp_dir.path()).unwrap().collect();
    assert!(leftovers.is_empty(), "unexpected files: {leftovers:?}");
}

#[tokio::test]
async fn test_empty_body_is_a_failure() {
    let Some(mock_server) = start_mock_server_or_skip().await else {
        return;
    };
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&mock_server)
        .await;

    let temp_dir = TempDir::new().unwrap();
    let paper = hosted_paper(&mock_server, "2403.00005", "Hollow");

    let outcome = downloader(Duration::ZERO)
        .download(&paper, temp_dir.path(), None, &NoopObserver)
        .await;

    assert!(matches!(outcome.error(), Some(DownloadError::EmptyBody { .. })));
    assert!(!outcome.path.exists());
}

#[tokio::test]
async fn test_downloads_are_paced() {
    let Some(mock_server) = start_mock_server_or_skip().await else {
        return;
    };
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"%PDF".to_vec()))
        .mount(&mock_server)
        .await;

    let temp_dir = TempDir::new().unwrap();
    let papers = [
        hosted_paper(&mock_server, "2403.00006", "First"),
        hosted_paper(&mock_server, "2403.00007", "Second"),
    ];
    let delay = Duration::from_millis(200);

    let started = Instant::now();
    let outcomes = downloader(delay)
        .download_all(&papers, temp_dir.path(), &NoopObserver)
        .await;

    assert!(outcomes.iter().all(|o| o.is_success()));
    assert!(started.elapsed() >= delay, "elapsed {:?}", started.elapsed());
}
