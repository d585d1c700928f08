//! Configuration structures and defaults for the crawler.
//!
//! [`CrawlConfig`] gathers everything a crawl session needs that would
//! otherwise be a global constant: destination, concurrency ceiling, listing
//! markup, pacing and HTTP settings. It is normally assembled with a
//! [`CrawlerBuilder`](super::CrawlerBuilder).

use crate::progress::StyleOptions;
use crate::scheduler::TransferCallback;

use reqwest::header::HeaderMap;
use reqwest::Url;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

/// Configuration structure for the crawler
#[derive(Clone)]
pub struct CrawlConfig {
    /// Directory where to store the downloaded files.
    pub directory: PathBuf,
    /// Number of maximum concurrent transfers.
    pub concurrent_downloads: usize,
    /// Name of the page number query parameter.
    pub page_param: String,
    /// Extension of the documents to collect, without the dot.
    pub extension: String,
    /// CSS selector overriding the extension-based one.
    pub selector: Option<String>,
    /// Base URL document hrefs are resolved against. Defaults to the page URL.
    pub base_url: Option<Url>,
    /// Pause between two listing pages.
    pub page_delay: Duration,
    /// Consecutive empty pages that end the crawl.
    pub empty_page_limit: u32,
    /// Stop after visiting this many pages.
    pub max_pages: Option<u32>,
    /// Fail transfers that take longer than this.
    pub transfer_timeout: Option<Duration>,
    /// Number of retries for transient HTTP failures.
    pub retries: u32,
    /// Custom HTTP headers.
    pub headers: Option<HeaderMap>,
    /// Optional proxy configuration.
    pub proxy: Option<reqwest::Proxy>,
    /// Progress style options.
    pub style_options: StyleOptions,
    /// Callback for when each transfer completes.
    pub on_complete: Option<Arc<TransferCallback>>,
}

impl std::fmt::Debug for CrawlConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CrawlConfig")
            .field("directory", &self.directory)
            .field("concurrent_downloads", &self.concurrent_downloads)
            .field("page_param", &self.page_param)
            .field("extension", &self.extension)
            .field("selector", &self.selector)
            .field("base_url", &self.base_url)
            .field("page_delay", &self.page_delay)
            .field("empty_page_limit", &self.empty_page_limit)
            .field("max_pages", &self.max_pages)
            .field("transfer_timeout", &self.transfer_timeout)
            .field("retries", &self.retries)
            .field("headers", &self.headers)
            .field("proxy", &self.proxy)
            .field("style_options", &self.style_options)
            .field("on_complete", &self.on_complete.is_some())
            .finish()
    }
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("output"),
            concurrent_downloads: 5,
            page_param: "page".to_string(),
            extension: "pdf".to_string(),
            selector: None,
            base_url: None,
            page_delay: Duration::from_secs(1),
            empty_page_limit: 2,
            max_pages: None,
            transfer_timeout: None,
            retries: 0,
            headers: None,
            proxy: None,
            style_options: StyleOptions::default(),
            on_complete: None,
        }
    }
}
