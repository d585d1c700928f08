//! Bounded fan-out of transfers.
//!
//! [`DownloadScheduler::schedule_all`] turns every link into a job future and
//! drives them through `buffer_unordered`, which starts futures in the order
//! supplied and never keeps more than the concurrency ceiling in flight. All
//! jobs are polled from the calling task, so deciding to start a job and
//! counting it as active happen in the same step and cannot race.
//!
//! A failed job is logged and reported in its [`Summary`]; it is not retried
//! and its filename is not added to the index, so the next crawl run picks it
//! up again.

use super::gauge::ActivityGauge;
use crate::index::ExistingFileIndex;
use crate::link::Link;
use crate::progress::ProgressSink;
use crate::transfer::{FileTransfer, Summary, TransferJob};

use futures::stream::{self, StreamExt};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Callback type for transfer completion events
pub type TransferCallback = Box<dyn Fn(&Summary) + Send + Sync>;

/// Runs batches of transfers with a fixed concurrency ceiling.
#[derive(Clone)]
pub struct DownloadScheduler {
    transfer: FileTransfer,
    concurrency: usize,
    index: ExistingFileIndex,
    sink: Arc<dyn ProgressSink>,
    gauge: ActivityGauge,
    on_complete: Option<Arc<TransferCallback>>,
}

impl fmt::Debug for DownloadScheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DownloadScheduler")
            .field("transfer", &self.transfer)
            .field("concurrency", &self.concurrency)
            .field("index", &self.index.len())
            .field("gauge", &self.gauge)
            .field("on_complete", &self.on_complete.is_some())
            .finish()
    }
}

impl DownloadScheduler {
    /// Creates a scheduler running at most `concurrency` transfers at once.
    ///
    /// A ceiling of zero is raised to one.
    pub fn new(
        transfer: FileTransfer,
        concurrency: usize,
        index: ExistingFileIndex,
        sink: Arc<dyn ProgressSink>,
    ) -> Self {
        Self {
            transfer,
            concurrency: concurrency.max(1),
            index,
            sink,
            gauge: ActivityGauge::new(),
            on_complete: None,
        }
    }

    /// Calls `callback` as soon as each transfer ends.
    pub fn on_complete(mut self, callback: Option<Arc<TransferCallback>>) -> Self {
        self.on_complete = callback;
        self
    }

    /// Gets the concurrency ceiling.
    pub fn concurrency(&self) -> usize {
        self.concurrency
    }

    /// Gets the active transfer gauge.
    pub fn gauge(&self) -> &ActivityGauge {
        &self.gauge
    }

    /// Gets the index completed filenames are added to.
    pub fn index(&self) -> &ExistingFileIndex {
        &self.index
    }

    /// Transfers every link and returns once all of them are terminal.
    ///
    /// Summaries come back in completion order.
    pub async fn schedule_all(&self, links: Vec<Link>) -> Vec<Summary> {
        if links.is_empty() {
            return Vec::new();
        }

        info!(
            "Scheduling {} transfers, {} at a time",
            links.len(),
            self.concurrency
        );
        self.sink.batch_started(links.len());

        let summaries = stream::iter(links)
            .map(|link| self.run_job(link))
            .buffer_unordered(self.concurrency)
            .collect::<Vec<_>>()
            .await;

        self.sink.batch_finished();
        summaries
    }

    async fn run_job(&self, link: Link) -> Summary {
        let mut job = TransferJob::new(link);
        let slot = self.gauge.enter();
        job.start();
        debug!(
            filename = %job.link().filename,
            active = self.gauge.active(),
            "transfer started"
        );

        let success = match self.transfer.run(&mut job, self.sink.as_ref()).await {
            Ok(path) => {
                self.index.insert(&job.link().filename);
                job.complete();
                info!(
                    "Downloaded {} ({} bytes, {:.2} MB/s) to {:?}",
                    job.link().filename,
                    job.downloaded_bytes(),
                    job.rate() / (1024.0 * 1024.0),
                    path
                );
                true
            }
            Err(e) => {
                let report = e.report();
                warn!(
                    filename = %job.link().filename,
                    url = %job.link().url,
                    error = %report,
                    "transfer failed"
                );
                job.fail(report);
                false
            }
        };
        drop(slot);

        self.sink.transfer_finished(success);
        let summary = Summary::from(job);

        // Call the callback as soon as the job ends.
        if let Some(ref callback) = self.on_complete {
            callback(&summary);
        }

        summary
    }
}
