//! Crawl outcome reporting.

use std::fmt;

/// Why a crawl ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// The page listed only filenames already seen on the page before it.
    RepeatedPage(u32),
    /// The configured number of consecutive empty pages was reached, ending at this page.
    EmptyPages(u32),
    /// The configured page limit was reached at this page.
    PageLimit(u32),
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StopReason::RepeatedPage(n) => write!(f, "page {} repeats the previous page", n),
            StopReason::EmptyPages(n) => write!(f, "no links found up to page {}", n),
            StopReason::PageLimit(n) => write!(f, "page limit reached at page {}", n),
        }
    }
}

/// Totals of a finished crawl.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlReport {
    /// First page requested.
    pub start_page: u32,
    /// Pages requested, including the one that ended the crawl.
    pub pages_visited: u32,
    /// Documents listed on all pages that were processed.
    pub processed: usize,
    /// Documents transferred during this run.
    pub downloaded: usize,
    /// Documents skipped because they were already on disk.
    pub skipped: usize,
    /// Documents whose transfer failed.
    pub failed: usize,
    /// Why the crawl ended.
    pub stop_reason: StopReason,
}

impl CrawlReport {
    /// Total documents processed.
    pub fn processed(&self) -> usize {
        self.processed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stop_reason_display() {
        assert_eq!(
            StopReason::RepeatedPage(6).to_string(),
            "page 6 repeats the previous page"
        );
        assert_eq!(
            StopReason::PageLimit(3).to_string(),
            "page limit reached at page 3"
        );
    }
}
