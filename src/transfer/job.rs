//! In-flight transfer bookkeeping.

use crate::link::Link;
use crate::progress::{average_rate, ProgressUpdate};

use std::time::{Duration, Instant};

/// Lifecycle of a [`TransferJob`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobState {
    /// Created but not yet started.
    Queued,
    /// Occupying a slot in the pool.
    Active,
    /// Content persisted under its final filename.
    Completed,
    /// Terminated with an error message.
    Failed(String),
}

impl JobState {
    /// `true` for `Completed` and `Failed`.
    pub fn is_terminal(&self) -> bool {
        matches!(self, JobState::Completed | JobState::Failed(_))
    }
}

/// Mutable record of one download.
#[derive(Debug, Clone)]
pub struct TransferJob {
    link: Link,
    total_bytes: Option<u64>,
    downloaded_bytes: u64,
    started_at: Instant,
    state: JobState,
}

impl TransferJob {
    /// Creates a queued job for `link`.
    pub fn new(link: Link) -> Self {
        Self {
            link,
            total_bytes: None,
            downloaded_bytes: 0,
            started_at: Instant::now(),
            state: JobState::Queued,
        }
    }

    /// Marks the job active and restarts its clock.
    pub fn start(&mut self) {
        self.started_at = Instant::now();
        self.state = JobState::Active;
    }

    /// Records the declared total once response headers are known.
    pub fn set_total(&mut self, total: Option<u64>) {
        self.total_bytes = total;
    }

    /// Adds `len` received bytes and returns the resulting progress.
    pub fn record_chunk(&mut self, len: u64) -> ProgressUpdate {
        self.downloaded_bytes += len;
        ProgressUpdate::new(
            self.downloaded_bytes,
            self.total_bytes,
            self.elapsed().as_secs_f64(),
        )
    }

    pub fn complete(&mut self) {
        self.state = JobState::Completed;
    }

    pub fn fail(&mut self, msg: impl std::fmt::Display) {
        self.state = JobState::Failed(msg.to_string());
    }

    pub fn link(&self) -> &Link {
        &self.link
    }

    pub fn total_bytes(&self) -> Option<u64> {
        self.total_bytes
    }

    pub fn downloaded_bytes(&self) -> u64 {
        self.downloaded_bytes
    }

    pub fn state(&self) -> &JobState {
        &self.state
    }

    /// Wall time since the job became active.
    pub fn elapsed(&self) -> Duration {
        self.started_at.elapsed()
    }

    /// Cumulative average rate in bytes per second.
    pub fn rate(&self) -> f64 {
        average_rate(self.downloaded_bytes, self.elapsed().as_secs_f64())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn job() -> TransferJob {
        TransferJob::new(Link::try_from("https://example.com/files/a.pdf").unwrap())
    }

    #[test]
    fn test_lifecycle() {
        let mut job = job();
        assert_eq!(job.state(), &JobState::Queued);
        job.start();
        assert_eq!(job.state(), &JobState::Active);
        assert!(!job.state().is_terminal());
        job.complete();
        assert!(job.state().is_terminal());
    }

    #[test]
    fn test_record_chunk_accumulates() {
        let mut job = job();
        job.start();
        job.set_total(Some(300));
        job.record_chunk(100);
        let update = job.record_chunk(50);
        assert_eq!(update.downloaded, 150);
        assert_eq!(update.total, Some(300));
        assert_eq!(job.downloaded_bytes(), 150);
        assert!(update.bytes_per_sec >= 0.0);
    }

    #[test]
    fn test_fail_keeps_message() {
        let mut job = job();
        job.fail("connection reset");
        assert_eq!(job.state(), &JobState::Failed("connection reset".into()));
    }
}
