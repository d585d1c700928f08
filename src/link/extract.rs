//! Link extraction from rendered listing pages.
//!
//! The default selector matches anchors inside list items whose href ends with
//! the target extension, e.g. `li a[href$=".pdf"]`. Links are returned in
//! document order with duplicate filenames collapsed to their first
//! occurrence, so every filename on a page is owned by exactly one link.

use crate::error::{Error, Result};
use crate::link::Link;

use reqwest::Url;
use scraper::{Html, Selector};
use std::collections::HashSet;
use tracing::{debug, warn};

/// Extracts document links from listing page HTML.
#[derive(Debug, Clone)]
pub struct LinkExtractor {
    selector: Selector,
    source: String,
}

impl LinkExtractor {
    /// Matches `li a[href$=".<extension>"]`.
    pub fn for_extension(extension: &str) -> Result<Self> {
        let extension = extension.trim_start_matches('.');
        Self::with_selector(&format!("li a[href$=\".{}\"]", extension))
    }

    /// Uses a custom CSS selector. Matched elements must carry an `href`.
    pub fn with_selector(css: &str) -> Result<Self> {
        let selector = Selector::parse(css)
            .map_err(|e| Error::Extraction(format!("Invalid selector \"{}\": {}", css, e)))?;
        Ok(Self {
            selector,
            source: css.to_string(),
        })
    }

    /// The CSS selector this extractor was built from.
    pub fn selector(&self) -> &str {
        &self.source
    }

    /// Returns the ordered, filename-unique links found in `html`.
    ///
    /// Hrefs are resolved against `base`. Hrefs that do not yield a filename
    /// are logged and skipped.
    pub fn extract(&self, html: &str, base: &Url) -> Vec<Link> {
        let document = Html::parse_document(html);
        let mut seen = HashSet::new();
        let mut links = Vec::new();

        for element in document.select(&self.selector) {
            let Some(href) = element.value().attr("href") else {
                continue;
            };
            let href = href.trim();
            match Link::resolve(href, base) {
                Ok(link) => {
                    if seen.insert(link.filename.clone()) {
                        links.push(link);
                    } else {
                        debug!("Duplicate link to {} on {}", link.filename, base);
                    }
                }
                Err(e) => warn!(href, error = %e, "skipping link"),
            }
        }

        links
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LISTING: &str = r#"
        <html><body>
          <nav><a href="/files/nav.pdf">not in a list item</a></nav>
          <ul>
            <li><a href="/files/uu-1-2024.pdf">UU 1/2024</a></li>
            <li><a href="/files/detail/uu-1-2024">detail page</a></li>
            <li><a href="https://cdn.example/pp-7-2023.pdf">PP 7/2023</a></li>
            <li><a href="/mirror/uu-1-2024.pdf">UU 1/2024 (mirror)</a></li>
            <li><a href="/files/perpres.doc">word file</a></li>
          </ul>
        </body></html>"#;

    fn base() -> Url {
        Url::parse("https://peraturan.example/peraturan?page=1").unwrap()
    }

    #[test]
    fn test_extracts_pdf_links_inside_list_items() {
        let extractor = LinkExtractor::for_extension("pdf").unwrap();
        let links = extractor.extract(LISTING, &base());

        let names: Vec<_> = links.iter().map(|l| l.filename.as_str()).collect();
        assert_eq!(names, vec!["uu-1-2024.pdf", "pp-7-2023.pdf"]);
        assert_eq!(
            links[0].url.as_str(),
            "https://peraturan.example/files/uu-1-2024.pdf"
        );
    }

    #[test]
    fn test_extension_with_leading_dot() {
        let extractor = LinkExtractor::for_extension(".doc").unwrap();
        assert_eq!(extractor.selector(), "li a[href$=\".doc\"]");
        let links = extractor.extract(LISTING, &base());
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].filename, "perpres.doc");
    }

    #[test]
    fn test_custom_selector() {
        let extractor = LinkExtractor::with_selector("nav a[href]").unwrap();
        let links = extractor.extract(LISTING, &base());
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].filename, "nav.pdf");
    }

    #[test]
    fn test_invalid_selector() {
        let err = LinkExtractor::with_selector("li a[href$=").unwrap_err();
        assert!(matches!(err, Error::Extraction(_)));
    }

    #[test]
    fn test_empty_page_yields_no_links() {
        let links = LinkExtractor::for_extension("pdf")
            .unwrap()
            .extract("<html><body></body></html>", &base());
        assert!(links.is_empty());
    }
}
