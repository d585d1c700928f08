//! Transfer summary functionality.
//!
//! A [`Summary`] is what remains of a [`TransferJob`](super::TransferJob)
//! once it reaches a terminal state.
//!
//! ```rust
//! use harvester::link::Link;
//! use harvester::transfer::{Status, Summary};
//! use std::time::Duration;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let link = Link::try_from("https://example.com/files/a.pdf")?;
//! let summary = Summary::new(link, 1024, Duration::from_secs(1), Status::Success);
//! assert!(summary.is_success());
//! # Ok(())
//! # }
//! ```

use super::job::{JobState, TransferJob};
use crate::link::Link;

use std::time::Duration;

/// Transfer status enumeration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    /// Transfer failed with error message
    Fail(String),
    /// Transfer completed successfully
    Success,
}

/// Represents a finished transfer.
#[derive(Debug, Clone)]
pub struct Summary {
    /// Transferred link.
    link: Link,
    /// Bytes received.
    size: u64,
    /// Time spent transferring.
    elapsed: Duration,
    /// Status.
    status: Status,
}

impl Summary {
    /// Create a new [`Summary`].
    pub fn new(link: Link, size: u64, elapsed: Duration, status: Status) -> Self {
        Self {
            link,
            size,
            elapsed,
            status,
        }
    }

    /// Get the summary's size.
    pub fn size(&self) -> u64 {
        self.size
    }

    /// Get the time the transfer took.
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Get a reference to the summary's link.
    pub fn link(&self) -> &Link {
        &self.link
    }

    /// Get a reference to the summary's status.
    pub fn status(&self) -> &Status {
        &self.status
    }

    pub fn is_success(&self) -> bool {
        self.status == Status::Success
    }
}

impl From<TransferJob> for Summary {
    /// A job that never reached a terminal state counts as failed.
    fn from(job: TransferJob) -> Self {
        debug_assert!(job.state().is_terminal(), "summary of an unfinished job");
        let status = match job.state() {
            JobState::Completed => Status::Success,
            JobState::Failed(msg) => Status::Fail(msg.clone()),
            JobState::Queued | JobState::Active => {
                Status::Fail("transfer did not finish".to_string())
            }
        };
        Summary::new(job.link().clone(), job.downloaded_bytes(), job.elapsed(), status)
    }
}
