//! Builder pattern implementation for creating [`Crawler`] instances.
//!
//! # Examples
//!
//! ```rust
//! use harvester::crawler::CrawlerBuilder;
//! use std::path::PathBuf;
//! use std::time::Duration;
//!
//! # fn example() -> Result<(), harvester::Error> {
//! let crawler = CrawlerBuilder::new()
//!     .directory(PathBuf::from("output/peraturan"))
//!     .concurrent_downloads(5)
//!     .page_delay(Duration::from_millis(500))
//!     .build()?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Hidden Progress Bars
//!
//! ```rust
//! use harvester::crawler::CrawlerBuilder;
//!
//! let crawler = CrawlerBuilder::hidden().build();
//! assert!(crawler.is_ok());
//! ```

use super::{config::CrawlConfig, crawler::Crawler};
use crate::error::Result;
use crate::http::{create_http_client, HttpClientConfig};
use crate::link::LinkExtractor;
use crate::navigator::{HttpNavigator, PageNavigator};
use crate::progress::{ProgressDisplay, ProgressSink, StyleOptions};
use crate::transfer::Summary;

use reqwest::header::{HeaderMap, HeaderValue, IntoHeaderName};
use reqwest::Url;
use std::{path::PathBuf, sync::Arc, time::Duration};

/// A builder used to create a [`Crawler`].
///
/// ```rust
/// # fn main() -> Result<(), harvester::Error> {
/// use harvester::crawler::CrawlerBuilder;
///
/// let c = CrawlerBuilder::new().concurrent_downloads(2).directory("downloads".into()).build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Default)]
pub struct CrawlerBuilder {
    config: CrawlConfig,
    navigator: Option<Arc<dyn PageNavigator>>,
    sink: Option<Arc<dyn ProgressSink>>,
}

impl CrawlerBuilder {
    /// Creates a builder with the default options.
    pub fn new() -> Self {
        CrawlerBuilder::default()
    }

    /// Convenience function to hide the progress bars.
    pub fn hidden() -> Self {
        let mut builder = CrawlerBuilder::default();
        builder.config.style_options = StyleOptions::hidden();
        builder
    }

    /// Sets the directory where to store the downloads.
    pub fn directory(mut self, directory: PathBuf) -> Self {
        self.config.directory = directory;
        self
    }

    /// Set the number of concurrent transfers.
    pub fn concurrent_downloads(mut self, concurrent_downloads: usize) -> Self {
        self.config.concurrent_downloads = concurrent_downloads;
        self
    }

    /// Set the name of the page number query parameter.
    pub fn page_param(mut self, page_param: &str) -> Self {
        self.config.page_param = page_param.to_string();
        self
    }

    /// Collect links ending with `.<extension>` inside list items.
    pub fn extension(mut self, extension: &str) -> Self {
        self.config.extension = extension.to_string();
        self
    }

    /// Use a custom CSS selector for document links.
    pub fn selector(mut self, selector: &str) -> Self {
        self.config.selector = Some(selector.to_string());
        self
    }

    /// Resolve document hrefs against `base_url` instead of the page URL.
    pub fn base_url(mut self, base_url: Url) -> Self {
        self.config.base_url = Some(base_url);
        self
    }

    /// Set the pause between two listing pages.
    pub fn page_delay(mut self, page_delay: Duration) -> Self {
        self.config.page_delay = page_delay;
        self
    }

    /// Set how many empty pages in a row end the crawl.
    pub fn empty_page_limit(mut self, limit: u32) -> Self {
        self.config.empty_page_limit = limit;
        self
    }

    /// Stop after visiting `max_pages` pages.
    pub fn max_pages(mut self, max_pages: u32) -> Self {
        self.config.max_pages = Some(max_pages);
        self
    }

    /// Fail individual transfers that take longer than `timeout`.
    pub fn transfer_timeout(mut self, timeout: Duration) -> Self {
        self.config.transfer_timeout = Some(timeout);
        self
    }

    /// Set the number of retries for transient HTTP failures.
    pub fn retries(mut self, retries: u32) -> Self {
        self.config.retries = retries;
        self
    }

    /// Route requests through `proxy`.
    pub fn proxy(mut self, proxy: reqwest::Proxy) -> Self {
        self.config.proxy = Some(proxy);
        self
    }

    /// Set the progress style options.
    pub fn style_options(mut self, style_options: StyleOptions) -> Self {
        self.config.style_options = style_options;
        self
    }

    /// Set callback for when each transfer completes.
    ///
    /// The callback will be called immediately when each transfer finishes,
    /// regardless of whether other transfers are still in progress.
    ///
    /// ```rust
    /// use harvester::crawler::CrawlerBuilder;
    /// use harvester::transfer::Status;
    ///
    /// let crawler = CrawlerBuilder::new()
    ///     .on_complete(|summary| match summary.status() {
    ///         Status::Success => println!("[Success] {}", summary.link().filename),
    ///         Status::Fail(error) => println!("[Failed] {} - {}", summary.link().filename, error),
    ///     })
    ///     .build();
    /// ```
    pub fn on_complete<F>(mut self, callback: F) -> Self
    where
        F: Fn(&Summary) + Send + Sync + 'static,
    {
        self.config.on_complete = Some(Arc::new(Box::new(callback)));
        self
    }

    /// Helper method to get or create a new HeaderMap.
    fn new_header(&self) -> HeaderMap {
        match self.config.headers {
            Some(ref h) => h.to_owned(),
            _ => HeaderMap::new(),
        }
    }

    /// Add the http headers.
    ///
    /// You can call `.headers()` multiple times and all `HeaderMap` will be merged into a single one.
    pub fn headers(mut self, headers: HeaderMap) -> Self {
        let mut new = self.new_header();
        new.extend(headers);

        self.config.headers = Some(new);
        self
    }

    /// Add the http header
    ///
    /// ```
    /// use reqwest::header::{self, HeaderValue};
    /// use harvester::crawler::CrawlerBuilder;
    ///
    /// let ua = HeaderValue::from_static("listing-harvester/0.1");
    /// let builder = CrawlerBuilder::new().header(header::USER_AGENT, ua);
    /// ```
    pub fn header<K: IntoHeaderName>(mut self, name: K, value: HeaderValue) -> Self {
        let mut new = self.new_header();

        new.insert(name, value);

        self.config.headers = Some(new);
        self
    }

    /// Load listing pages with `navigator` instead of plain HTTP.
    pub fn navigator(mut self, navigator: Arc<dyn PageNavigator>) -> Self {
        self.navigator = Some(navigator);
        self
    }

    /// Report progress to `sink` instead of terminal progress bars.
    pub fn progress_sink(mut self, sink: Arc<dyn ProgressSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    /// Create the [`Crawler`] with the specified options.
    ///
    /// Fails when the link selector does not parse or the HTTP client cannot
    /// be built.
    pub fn build(self) -> Result<Crawler> {
        let extractor = match self.config.selector {
            Some(ref css) => LinkExtractor::with_selector(css)?,
            None => LinkExtractor::for_extension(&self.config.extension)?,
        };

        let client = create_http_client(HttpClientConfig {
            retries: self.config.retries,
            proxy: self.config.proxy.clone(),
            headers: self.config.headers.clone(),
        })?;

        let navigator = self
            .navigator
            .unwrap_or_else(|| Arc::new(HttpNavigator::new(client.clone())));
        let sink = self.sink.unwrap_or_else(|| {
            Arc::new(ProgressDisplay::new(self.config.style_options.clone()))
        });

        Ok(Crawler::new(self.config, navigator, extractor, client, sink))
    }
}
