//! Pagination driver.
//!
//! A crawl walks `page=N, N+1, …` from the page named in the start URL. Each
//! page's links are split into those already on disk, which are skipped, and
//! new ones, which go to the [`DownloadScheduler`]. The crawl ends when a page
//! lists nothing but filenames from the page just before it (listings that
//! repeat their last page forever), when enough empty pages come in a row, or
//! when the optional page limit is hit.
//!
//! Navigation and extraction errors end the crawl and are returned; transfer
//! errors never do.
//!
//! ```rust,no_run
//! use harvester::crawler::CrawlerBuilder;
//!
//! # async fn example() -> Result<(), harvester::Error> {
//! let crawler = CrawlerBuilder::new().build()?;
//! let report = crawler.crawl("https://peraturan.go.id/peraturan?page=3").await?;
//! println!("processed {} documents", report.processed());
//! # Ok(())
//! # }
//! ```

use super::config::CrawlConfig;
use super::page::{initial_page, page_url, PageState};
use super::report::{CrawlReport, StopReason};
use crate::error::{Error, Result};
use crate::index::ExistingFileIndex;
use crate::link::LinkExtractor;
use crate::navigator::PageNavigator;
use crate::progress::ProgressSink;
use crate::scheduler::DownloadScheduler;
use crate::transfer::FileTransfer;
use crate::utils::ensure_dir;

use reqwest::Url;
use reqwest_middleware::ClientWithMiddleware;
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;
use tracing::{info, warn};

/// Crawls a paginated listing and downloads the documents it links to.
///
/// A crawler can be created via its builder:
///
/// ```rust
/// # fn main() -> Result<(), harvester::Error> {
/// use harvester::crawler::CrawlerBuilder;
///
/// let c = CrawlerBuilder::new().build()?;
/// # Ok(())
/// # }
/// ```
pub struct Crawler {
    config: CrawlConfig,
    navigator: Arc<dyn PageNavigator>,
    extractor: LinkExtractor,
    client: ClientWithMiddleware,
    sink: Arc<dyn ProgressSink>,
}

impl fmt::Debug for Crawler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Crawler")
            .field("config", &self.config)
            .field("selector", &self.extractor.selector())
            .finish()
    }
}

/// Mutable state of one crawl invocation.
struct CrawlSession {
    page: u32,
    previous: HashSet<String>,
    consecutive_empty: u32,
    report: CrawlReport,
}

impl CrawlSession {
    fn new(start_page: u32) -> Self {
        Self {
            page: start_page,
            previous: HashSet::new(),
            consecutive_empty: 0,
            report: CrawlReport {
                start_page,
                pages_visited: 0,
                processed: 0,
                downloaded: 0,
                skipped: 0,
                failed: 0,
                stop_reason: StopReason::PageLimit(start_page),
            },
        }
    }
}

impl Crawler {
    /// Creates a new Crawler with the given configuration and collaborators.
    pub(crate) fn new(
        config: CrawlConfig,
        navigator: Arc<dyn PageNavigator>,
        extractor: LinkExtractor,
        client: ClientWithMiddleware,
        sink: Arc<dyn ProgressSink>,
    ) -> Self {
        Self {
            config,
            navigator,
            extractor,
            client,
            sink,
        }
    }

    /// Gets the crawl configuration.
    pub fn config(&self) -> &CrawlConfig {
        &self.config
    }

    /// Crawls from `start_url` until a stopping condition is met.
    ///
    /// The navigator is closed whether the crawl succeeds or fails.
    pub async fn crawl(&self, start_url: &str) -> Result<CrawlReport> {
        let result = match Url::parse(start_url) {
            Ok(start) => self.run(&start).await,
            Err(e) => Err(Error::InvalidUrl(format!(
                "The url \"{}\" cannot be parsed: {}",
                start_url, e
            ))),
        };

        self.shutdown().await;

        match result {
            Ok(ref report) => info!(
                "Finished crawling: {}. Processed {} documents, downloaded {}, skipped {}, failed {}",
                report.stop_reason,
                report.processed,
                report.downloaded,
                report.skipped,
                report.failed
            ),
            Err(ref e) => warn!(error = %e.report(), "crawl aborted"),
        }

        result
    }

    /// Closes the navigator and finishes progress reporting.
    ///
    /// [`crawl`](Self::crawl) does this itself; call it directly when a crawl
    /// future is dropped before completing, e.g. on interrupt.
    pub async fn shutdown(&self) {
        if let Err(e) = self.navigator.close().await {
            warn!(error = %e.report(), "failed to close navigator");
        }
        self.sink.finish();
    }

    async fn run(&self, start: &Url) -> Result<CrawlReport> {
        let directory = &self.config.directory;
        ensure_dir(directory).await?;
        let index = ExistingFileIndex::load(directory).await?;

        let transfer = FileTransfer::new(self.client.clone(), directory.clone())
            .with_timeout(self.config.transfer_timeout);
        let scheduler = DownloadScheduler::new(
            transfer,
            self.config.concurrent_downloads,
            index,
            Arc::clone(&self.sink),
        )
        .on_complete(self.config.on_complete.clone());

        let mut session = CrawlSession::new(initial_page(start, &self.config.page_param));
        info!(
            "Starting crawl at page {} ({} files already present)",
            session.page,
            scheduler.index().len()
        );

        loop {
            if let Some(reason) = self.step(start, &scheduler, &mut session).await? {
                session.report.stop_reason = reason;
                return Ok(session.report);
            }
            session.page += 1;

            if !self.config.page_delay.is_zero() {
                tokio::time::sleep(self.config.page_delay).await;
            }
        }
    }

    /// Processes the session's current page. Returns a reason when the crawl
    /// should stop after it.
    async fn step(
        &self,
        start: &Url,
        scheduler: &DownloadScheduler,
        session: &mut CrawlSession,
    ) -> Result<Option<StopReason>> {
        let page = session.page;
        let url = page_url(start, &self.config.page_param, page);
        info!("Processing page {}", page);

        let rendered = self.navigator.load(&url).await?;
        let base = self.config.base_url.as_ref().unwrap_or(&rendered.url);
        let state = PageState::new(page, self.extractor.extract(&rendered.html, base));
        session.report.pages_visited += 1;
        info!("Found {} links on page {}", state.links.len(), page);

        if state.repeats(&session.previous) {
            info!(
                "All files on page {} were also on the previous page, reached the end of unique content",
                page
            );
            return Ok(Some(StopReason::RepeatedPage(page)));
        }

        if state.is_empty() {
            session.consecutive_empty += 1;
            if session.consecutive_empty >= self.config.empty_page_limit.max(1) {
                return Ok(Some(StopReason::EmptyPages(page)));
            }
        } else {
            session.consecutive_empty = 0;
            self.dispatch(&state, scheduler, &mut session.report).await;
        }

        session.previous = state.filenames;

        match self.config.max_pages {
            Some(max) if session.report.pages_visited >= max => {
                Ok(Some(StopReason::PageLimit(page)))
            }
            _ => Ok(None),
        }
    }

    async fn dispatch(
        &self,
        state: &PageState,
        scheduler: &DownloadScheduler,
        report: &mut CrawlReport,
    ) {
        let (existing, new) = scheduler.index().partition(state.links.clone());
        for link in &existing {
            info!("File already exists: {}", link.filename);
        }
        report.skipped += existing.len();

        if !new.is_empty() {
            info!(
                "Downloading {} new files from page {}",
                new.len(),
                state.page_number
            );
            let summaries = scheduler.schedule_all(new).await;
            let succeeded = summaries.iter().filter(|s| s.is_success()).count();
            report.downloaded += succeeded;
            report.failed += summaries.len() - succeeded;
        }

        report.processed += state.links.len();
        info!("Processed {} total documents so far", report.processed);
    }
}
