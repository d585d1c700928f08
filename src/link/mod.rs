//! Link module containing discovered document links and their extraction.
//!
//! - [`link`] - The [`Link`] value and filename derivation
//! - [`extract`] - [`LinkExtractor`], turning listing page HTML into links
//!
//! # Examples
//!
//! ```rust
//! use harvester::link::LinkExtractor;
//! use reqwest::Url;
//!
//! let html = r#"<ul><li><a href="/files/a.pdf">A</a></li></ul>"#;
//! let base = Url::parse("https://example.com/list?page=1")?;
//! let links = LinkExtractor::for_extension("pdf")?.extract(html, &base);
//! assert_eq!(links[0].filename, "a.pdf");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod extract;
pub mod link;

pub use extract::LinkExtractor;
pub use link::{filename_from_url, Link};
