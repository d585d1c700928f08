//! Harvester crawls paginated document listings and downloads every linked
//! file it does not already have, a bounded number at a time.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use std::path::PathBuf;
//! use harvester::{crawler::CrawlerBuilder, Error};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Error> {
//! let crawler = CrawlerBuilder::new()
//!     .directory(PathBuf::from("output/peraturanId"))
//!     .concurrent_downloads(5)
//!     .build()?;
//! let report = crawler.crawl("https://peraturan.go.id/peraturan?page=1").await?;
//! println!("{}: {} documents", report.stop_reason, report.processed());
//! # Ok(())
//! # }
//! ```
//!
//! # Module Organization
//!
//! - [`crawler`] - The pagination driver, `CrawlerBuilder` and `CrawlConfig`
//! - [`error`] - Centralized error handling with the `Error` enum
//! - [`http`] - HTTP client construction
//! - [`index`] - The set of filenames already present on disk
//! - [`link`] - Document links and their extraction from listing markup
//! - [`navigator`] - Loading listing pages
//! - [`progress`] - Progress reporting traits and the terminal display
//! - [`scheduler`] - Bounded concurrent dispatch of transfers
//! - [`transfer`] - Streaming one document to disk
//! - [`utils`] - Shared utility functions

pub mod crawler;
pub mod error;
pub mod http;
pub mod index;
pub mod link;
pub mod navigator;
pub mod progress;
pub mod scheduler;
pub mod transfer;
pub mod utils;

pub use crawler::{CrawlConfig, CrawlReport, Crawler, CrawlerBuilder, StopReason};
pub use error::{Error, Result};
pub use http::{create_http_client, HttpClientConfig};
pub use index::ExistingFileIndex;
pub use link::{Link, LinkExtractor};
pub use navigator::{HttpNavigator, PageNavigator, RenderedPage};
pub use progress::{ProgressBarOpts, ProgressSink, ProgressTracker, StyleOptions};
pub use scheduler::DownloadScheduler;
pub use transfer::{FileTransfer, Status, Summary, TransferJob};
