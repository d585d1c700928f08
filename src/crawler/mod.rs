//! Crawler module containing the pagination driver, its builder and configuration.
//!
//! - `crawler` - [`Crawler`], walking listing pages and dispatching new documents
//! - `builder` - [`CrawlerBuilder`] for assembling a crawler
//! - `config` - [`CrawlConfig`] with its defaults
//! - `page` - Page URL construction and the per-page [`PageState`]
//! - `report` - [`CrawlReport`] and [`StopReason`]
//!
//! # Examples
//!
//! ```rust,no_run
//! use harvester::crawler::CrawlerBuilder;
//! use std::path::PathBuf;
//!
//! # async fn example() -> Result<(), harvester::Error> {
//! let crawler = CrawlerBuilder::new()
//!     .directory(PathBuf::from("output/peraturanId"))
//!     .concurrent_downloads(5)
//!     .build()?;
//! let report = crawler.crawl("https://peraturan.go.id/peraturan").await?;
//! # Ok(())
//! # }
//! ```

pub mod builder;
pub mod config;
pub mod crawler;
pub mod page;
pub mod report;

pub use builder::CrawlerBuilder;
pub use config::CrawlConfig;
pub use crawler::Crawler;
pub use page::{initial_page, page_url, PageState};
pub use report::{CrawlReport, StopReason};
