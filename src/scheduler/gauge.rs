//! Active transfer accounting.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Counts transfers currently holding a pool slot and the highest count seen.
#[derive(Debug, Clone, Default)]
pub struct ActivityGauge {
    inner: Arc<Counters>,
}

#[derive(Debug, Default)]
struct Counters {
    active: AtomicUsize,
    peak: AtomicUsize,
}

impl ActivityGauge {
    pub fn new() -> Self {
        Self::default()
    }

    /// Occupies a slot until the returned guard is dropped.
    pub fn enter(&self) -> ActiveSlot {
        let now = self.inner.active.fetch_add(1, Ordering::SeqCst) + 1;
        self.inner.peak.fetch_max(now, Ordering::SeqCst);
        ActiveSlot {
            inner: Arc::clone(&self.inner),
        }
    }

    /// Transfers active right now.
    pub fn active(&self) -> usize {
        self.inner.active.load(Ordering::SeqCst)
    }

    /// Highest number of simultaneously active transfers so far.
    pub fn peak(&self) -> usize {
        self.inner.peak.load(Ordering::SeqCst)
    }
}

/// A held pool slot.
#[derive(Debug)]
pub struct ActiveSlot {
    inner: Arc<Counters>,
}

impl Drop for ActiveSlot {
    fn drop(&mut self) {
        self.inner.active.fetch_sub(1, Ordering::SeqCst);
    }
}
