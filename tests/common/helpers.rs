#![allow(dead_code)]

use async_trait::async_trait;
use harvester::crawler::CrawlerBuilder;
use harvester::navigator::{PageNavigator, RenderedPage};
use harvester::progress::{ProgressSink, ProgressTracker, ProgressUpdate};
use harvester::{create_http_client, Error, HttpClientConfig};
use reqwest::Url;
use reqwest_middleware::ClientWithMiddleware;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// Common test constants
pub const LISTING_URL: &str = "http://listing.test/peraturan";

/// Creates a temporary directory for testing purposes
pub fn create_temp_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temporary directory")
}

/// Creates a temporary file with the given content
pub fn create_temp_file(dir: &Path, filename: &str, content: &[u8]) -> PathBuf {
    let file_path = dir.join(filename);
    fs::write(&file_path, content).expect("Failed to write temporary file");
    file_path
}

/// Creates test file content of specified size
pub fn create_test_content(size: usize) -> Vec<u8> {
    (0..size).map(|i| (i % 256) as u8).collect()
}

/// Asserts that a file has the expected size
pub fn assert_file_size(path: &Path, expected_size: u64) {
    let metadata = fs::metadata(path).expect("Failed to get file metadata");
    assert_eq!(
        metadata.len(),
        expected_size,
        "File size mismatch at path: {:?}",
        path
    );
}

/// Names of the entries in `dir`, sorted.
pub fn dir_entries(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .expect("Failed to read directory")
        .map(|e| e.expect("bad entry").file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

/// A client without retries.
pub fn test_client() -> ClientWithMiddleware {
    create_http_client(HttpClientConfig::default()).expect("Failed to build client")
}

/// Listing markup with one `<li><a>` per href.
pub fn listing_html(hrefs: &[String]) -> String {
    let items: String = hrefs
        .iter()
        .map(|h| format!("<li><a href=\"{}\">{}</a></li>", h, h))
        .collect();
    format!("<html><body><ul>{}</ul></body></html>", items)
}

/// Absolute document URLs on `server` for the given filenames.
pub fn doc_hrefs(server: &MockServer, names: &[&str]) -> Vec<String> {
    names
        .iter()
        .map(|n| format!("{}/docs/{}", server.uri(), n))
        .collect()
}

/// Serves `/docs/<name>` with `body`, expecting exactly `times` requests.
pub async fn mount_document(server: &MockServer, name: &str, body: Vec<u8>, times: u64) {
    Mock::given(method("GET"))
        .and(path(format!("/docs/{}", name)))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(body))
        .expect(times)
        .mount(server)
        .await;
}

/// Serves `/docs/<name>` with `body` after `delay`.
pub async fn mount_slow_document(server: &MockServer, name: &str, body: Vec<u8>, delay: Duration) {
    Mock::given(method("GET"))
        .and(path(format!("/docs/{}", name)))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(body).set_delay(delay))
        .mount(server)
        .await;
}

/// Navigator serving canned listing pages keyed by page number.
///
/// Pages with no entry render as an empty listing. Loading `fail_on` returns
/// a navigation error.
#[derive(Default)]
pub struct FakeNavigator {
    pages: HashMap<u32, String>,
    fail_on: Option<u32>,
    requested: Mutex<Vec<u32>>,
    closed: AtomicBool,
}

impl FakeNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(mut self, number: u32, hrefs: Vec<String>) -> Self {
        self.pages.insert(number, listing_html(&hrefs));
        self
    }

    pub fn raw_page(mut self, number: u32, html: &str) -> Self {
        self.pages.insert(number, html.to_string());
        self
    }

    pub fn fail_on(mut self, number: u32) -> Self {
        self.fail_on = Some(number);
        self
    }

    pub fn requested(&self) -> Vec<u32> {
        self.requested.lock().expect("poisoned").clone()
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PageNavigator for FakeNavigator {
    async fn load(&self, url: &Url) -> harvester::Result<RenderedPage> {
        let number = url
            .query_pairs()
            .find(|(k, _)| k == "page")
            .and_then(|(_, v)| v.parse::<u32>().ok())
            .unwrap_or(1);
        self.requested.lock().expect("poisoned").push(number);

        if self.fail_on == Some(number) {
            return Err(Error::Navigation {
                url: url.to_string(),
                message: "503 Service Unavailable".to_string(),
            });
        }

        let html = self
            .pages
            .get(&number)
            .cloned()
            .unwrap_or_else(|| listing_html(&[]));
        Ok(RenderedPage {
            url: url.clone(),
            html,
        })
    }

    async fn close(&self) -> harvester::Result<()> {
        self.closed.store(true, Ordering::SeqCst);
        Ok(())
    }
}

/// Sink counting the notifications it receives.
#[derive(Default)]
pub struct RecordingSink {
    pub labels: Mutex<Vec<String>>,
    pub batches: AtomicUsize,
    pub batch_jobs: AtomicUsize,
    pub finished: AtomicUsize,
    pub failed: AtomicUsize,
    pub finished_crawl: AtomicBool,
}

struct RecordingTracker;

impl ProgressTracker for RecordingTracker {
    fn update(&self, _update: &ProgressUpdate) {}
    fn stop(&self, _success: bool) {}
}

impl ProgressSink for RecordingSink {
    fn create_tracker(&self, label: &str, _total: Option<u64>) -> Box<dyn ProgressTracker> {
        self.labels.lock().expect("poisoned").push(label.to_string());
        Box::new(RecordingTracker)
    }

    fn batch_started(&self, jobs: usize) {
        self.batches.fetch_add(1, Ordering::SeqCst);
        self.batch_jobs.fetch_add(jobs, Ordering::SeqCst);
    }

    fn transfer_finished(&self, success: bool) {
        self.finished.fetch_add(1, Ordering::SeqCst);
        if !success {
            self.failed.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn finish(&self) {
        self.finished_crawl.store(true, Ordering::SeqCst);
    }
}

/// Builder with hidden progress, no page delay and `dir` as destination.
pub fn test_crawler_builder(dir: &Path, navigator: Arc<FakeNavigator>) -> CrawlerBuilder {
    CrawlerBuilder::hidden()
        .directory(dir.to_path_buf())
        .page_delay(Duration::ZERO)
        .navigator(navigator)
}
