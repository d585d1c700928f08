//! Error handling for the harvester.
//!
//! Errors fall in two groups. Navigation and extraction errors are fatal to a
//! crawl and are propagated out of [`Crawler::crawl`](crate::crawler::Crawler::crawl).
//! Transfer errors (network, write, length mismatch, timeout) stay local to a
//! single job: the scheduler logs them and records a failed
//! [`Summary`](crate::transfer::Summary) instead of returning them.

use std::io;
use std::time::Duration;
use thiserror::Error;

/// Errors that can happen while crawling a listing or transferring a file.
#[derive(Error, Debug)]
pub enum Error {
    /// Error from an underlying system.
    #[error("Internal error: {0}")]
    Internal(String),

    /// The start URL or a resolved link URL could not be parsed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// A discovered href does not yield a usable filename.
    #[error("Invalid link: {0}")]
    InvalidLink(String),

    /// A listing page failed to load.
    ///
    /// Fatal to the crawl.
    #[error("Failed to load {url}: {message}")]
    Navigation { url: String, message: String },

    /// The structure of a listing page (or the link selector) was unusable.
    ///
    /// Treated like a navigation error.
    #[error("Extraction error: {0}")]
    Extraction(String),

    /// I/O Error.
    #[error("I/O error")]
    IOError {
        #[from]
        source: io::Error,
    },

    /// Error from the Reqwest library.
    #[error("Reqwest Error")]
    Reqwest {
        #[from]
        source: reqwest::Error,
    },

    /// Error from the HTTP middleware stack (retry, tracing).
    #[error("HTTP middleware error")]
    Middleware {
        #[from]
        source: reqwest_middleware::Error,
    },

    /// The number of bytes received differs from the declared content length.
    #[error("Expected {expected} bytes but received {actual}")]
    LengthMismatch { expected: u64, actual: u64 },

    /// A transfer exceeded its time allowance.
    #[error("Transfer timed out after {0:?}")]
    Timeout(Duration),
}

impl Error {
    /// Returns `true` for errors that must abort a crawl.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Error::Navigation { .. } | Error::Extraction(_) | Error::InvalidUrl(_)
        )
    }

    /// Renders the error followed by its chain of sources.
    pub fn report(&self) -> String {
        let mut out = self.to_string();
        let mut source = std::error::Error::source(self);
        while let Some(cause) = source {
            out.push_str(": ");
            out.push_str(&cause.to_string());
            source = cause.source();
        }
        out
    }
}

/// Result type alias for harvester operations.
pub type Result<T> = std::result::Result<T, Error>;
