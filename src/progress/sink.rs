//! The progress reporting capability used by transfers and the scheduler.
//!
//! A [`ProgressSink`] hands out one [`ProgressTracker`] per transfer. The
//! transfer pushes a [`ProgressUpdate`] after every received chunk and stops
//! the tracker once it reaches a terminal state.

use std::fmt;

/// Snapshot of one transfer's progress.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProgressUpdate {
    /// Bytes received so far.
    pub downloaded: u64,
    /// Declared total size, if the server provided one.
    pub total: Option<u64>,
    /// Cumulative average rate in bytes per second.
    pub bytes_per_sec: f64,
}

impl ProgressUpdate {
    /// Builds an update, computing the average rate from `elapsed_secs`.
    pub fn new(downloaded: u64, total: Option<u64>, elapsed_secs: f64) -> Self {
        Self {
            downloaded,
            total,
            bytes_per_sec: average_rate(downloaded, elapsed_secs),
        }
    }
}

/// Bytes divided by seconds; zero before any time has elapsed.
pub fn average_rate(bytes: u64, elapsed_secs: f64) -> f64 {
    if elapsed_secs > 0.0 {
        bytes as f64 / elapsed_secs
    } else {
        0.0
    }
}

/// Receives progress for a single transfer.
pub trait ProgressTracker: Send + Sync {
    /// Reports the transfer's current progress.
    fn update(&self, update: &ProgressUpdate);

    /// Ends tracking; `success` is `false` when the transfer failed.
    fn stop(&self, success: bool);
}

/// Creates trackers and is told when batches of transfers start and end.
pub trait ProgressSink: Send + Sync {
    /// Creates a tracker labelled `label` expecting `total` bytes.
    fn create_tracker(&self, label: &str, total: Option<u64>) -> Box<dyn ProgressTracker>;

    /// A batch of `jobs` transfers is about to be scheduled.
    fn batch_started(&self, _jobs: usize) {}

    /// A transfer reached a terminal state, whether or not it got as far as
    /// creating a tracker.
    fn transfer_finished(&self, _success: bool) {}

    /// Every transfer of the current batch reached a terminal state.
    fn batch_finished(&self) {}

    /// The crawl is over; no further trackers will be created.
    fn finish(&self) {}
}

/// A sink that discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopSink;

struct NoopTracker;

impl ProgressTracker for NoopTracker {
    fn update(&self, _update: &ProgressUpdate) {}
    fn stop(&self, _success: bool) {}
}

impl ProgressSink for NoopSink {
    fn create_tracker(&self, _label: &str, _total: Option<u64>) -> Box<dyn ProgressTracker> {
        Box::new(NoopTracker)
    }
}

impl fmt::Debug for dyn ProgressSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ProgressSink")
    }
}
