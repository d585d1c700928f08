//! Discovered document links.
//!
//! A [`Link`] pairs the href found on a listing page with the absolute URL it
//! resolves to and the local filename derived from its last path segment.
//!
//! ```rust
//! use harvester::link::Link;
//! use reqwest::Url;
//!
//! let base = Url::parse("https://peraturan.example/list?page=2")?;
//! let link = Link::resolve("/files/uu-1-2024.pdf", &base)?;
//! assert_eq!(link.filename, "uu-1-2024.pdf");
//! assert_eq!(link.url.as_str(), "https://peraturan.example/files/uu-1-2024.pdf");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use crate::error::Error;

use reqwest::Url;
use std::convert::TryFrom;

/// Represents a downloadable document discovered on a listing page.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Link {
    /// The href exactly as it appeared in the page.
    pub href: String,
    /// Absolute URL of the document.
    pub url: Url,
    /// File name used to save the document on disk.
    pub filename: String,
}

impl Link {
    /// Creates a new [`Link`] with an explicit filename.
    pub fn new(href: &str, url: &Url, filename: &str) -> Self {
        Self {
            href: String::from(href),
            url: url.clone(),
            filename: String::from(filename),
        }
    }

    /// Resolves `href` against `base` and derives the filename.
    ///
    /// Both path-only hrefs and absolute URLs are accepted.
    pub fn resolve(href: &str, base: &Url) -> Result<Self, Error> {
        let url = base.join(href).map_err(|e| {
            Error::InvalidUrl(format!("The href \"{}\" cannot be resolved: {}", href, e))
        })?;
        let filename = filename_from_url(&url)?;
        Ok(Self {
            href: String::from(href),
            url,
            filename,
        })
    }
}

/// Derives a filename from the last path segment of `url`.
///
/// The segment is percent-decoded as a path, so `&`, `=` and `+` are kept
/// literally. Names that could not be written as a single entry of the
/// destination directory are rejected.
pub fn filename_from_url(url: &Url) -> Result<String, Error> {
    let segment = url
        .path_segments()
        .ok_or_else(|| {
            Error::InvalidLink(format!("The url \"{}\" does not contain a valid path", url))
        })?
        .next_back()
        .unwrap_or_default();

    let filename = urlencoding::decode(segment).map_err(|e| {
        Error::InvalidLink(format!("The url \"{}\" has a non UTF-8 filename: {}", url, e))
    })?;

    if filename.is_empty() || filename == "." || filename == ".." {
        return Err(Error::InvalidLink(format!(
            "The url \"{}\" does not contain a filename",
            url
        )));
    }
    if filename.contains(['/', '\\', '\0']) {
        return Err(Error::InvalidLink(format!(
            "The filename {:?} from \"{}\" is not a single path segment",
            filename, url
        )));
    }
    Ok(filename.into_owned())
}

impl TryFrom<&Url> for Link {
    type Error = Error;

    fn try_from(value: &Url) -> Result<Self, Self::Error> {
        let filename = filename_from_url(value)?;
        Ok(Link {
            href: value.to_string(),
            url: value.clone(),
            filename,
        })
    }
}

impl TryFrom<&str> for Link {
    type Error = Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Url::parse(value)
            .map_err(|e| {
                Error::InvalidUrl(format!("The url \"{}\" cannot be parsed: {}", value, e))
            })
            .and_then(|u| Link::try_from(&u))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("https://peraturan.example/peraturan?page=4").unwrap()
    }

    #[test]
    fn test_resolve_path_href() {
        let link = Link::resolve("/files/pp-12-2023.pdf", &base()).unwrap();
        assert_eq!(link.href, "/files/pp-12-2023.pdf");
        assert_eq!(
            link.url.as_str(),
            "https://peraturan.example/files/pp-12-2023.pdf"
        );
        assert_eq!(link.filename, "pp-12-2023.pdf");
    }

    #[test]
    fn test_resolve_absolute_href() {
        let link = Link::resolve("https://cdn.example/a/b/perpres.pdf", &base()).unwrap();
        assert_eq!(link.url.host_str(), Some("cdn.example"));
        assert_eq!(link.filename, "perpres.pdf");
    }

    #[test]
    fn test_same_href_same_filename() {
        let a = Link::resolve("/x/doc.pdf", &base()).unwrap();
        let b = Link::resolve("/x/doc.pdf", &base()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_percent_encoded_filename_is_decoded() {
        let link = Link::resolve("/files/UU%20No%201.pdf", &base()).unwrap();
        assert_eq!(link.filename, "UU No 1.pdf");
    }

    #[test]
    fn test_form_delimiters_are_kept() {
        let link = Link::resolve("/files/x&y=z+1.pdf", &base()).unwrap();
        assert_eq!(link.filename, "x&y=z+1.pdf");
        let plain = Link::resolve("/files/xyz.pdf", &base()).unwrap();
        assert_ne!(link.filename, plain.filename);
    }

    #[test]
    fn test_encoded_separators_are_rejected() {
        for href in [
            "/files/a%2Fb.pdf",
            "/files/..%2F..%2Fevil.pdf",
            "/files/a%5Cb.pdf",
            "/files/a%00b.pdf",
            "/files/%2E%2E",
        ] {
            let err = Link::resolve(href, &base()).unwrap_err();
            assert!(matches!(err, Error::InvalidLink(_)), "{} was accepted", href);
        }
    }

    #[test]
    fn test_trailing_slash_has_no_filename() {
        let err = Link::resolve("/files/", &base()).unwrap_err();
        assert!(matches!(err, Error::InvalidLink(_)));
    }

    #[test]
    fn test_try_from_str() {
        let link = Link::try_from("https://example.com/docs/file.pdf").unwrap();
        assert_eq!(link.filename, "file.pdf");
        assert!(matches!(
            Link::try_from("not a url"),
            Err(Error::InvalidUrl(_))
        ));
    }
}
