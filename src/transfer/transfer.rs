//! Single-file retrieval.
//!
//! A transfer GETs the link's URL and streams the body into a hidden
//! temporary file next to its destination, reporting progress after every
//! chunk. Only a complete body whose size matches the declared length is
//! renamed to its final filename; on any failure the temporary file is
//! removed, so the destination never holds a partial document.

use super::job::TransferJob;
use crate::error::{Error, Result};
use crate::progress::{ProgressSink, ProgressTracker};
use crate::utils::{declared_length, temp_path};

use futures::StreamExt;
use reqwest::Response;
use reqwest_middleware::ClientWithMiddleware;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::{fs, io::AsyncWriteExt};
use tracing::debug;

/// Retrieves documents into a destination directory.
#[derive(Debug, Clone)]
pub struct FileTransfer {
    client: ClientWithMiddleware,
    directory: PathBuf,
    timeout: Option<Duration>,
}

impl FileTransfer {
    pub fn new(client: ClientWithMiddleware, directory: PathBuf) -> Self {
        Self {
            client,
            directory,
            timeout: None,
        }
    }

    /// Fails transfers that take longer than `timeout` end to end.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Runs `job` to completion and returns the final path of the document.
    ///
    /// The job must already be active. Its state is left untouched; the
    /// caller decides what a success or failure means.
    pub async fn run(&self, job: &mut TransferJob, sink: &dyn ProgressSink) -> Result<PathBuf> {
        let part = temp_path(&self.directory, &job.link().filename);
        let mut tracker = None;

        let result = match self.timeout {
            Some(limit) => tokio::time::timeout(limit, self.fetch(job, sink, &part, &mut tracker))
                .await
                .unwrap_or(Err(Error::Timeout(limit))),
            None => self.fetch(job, sink, &part, &mut tracker).await,
        };

        if let Some(tracker) = tracker {
            tracker.stop(result.is_ok());
        }

        if result.is_err() {
            match fs::remove_file(&part).await {
                Ok(()) => debug!("Removed partial file {:?}", part),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => (),
                Err(e) => debug!("Could not remove partial file {:?}: {}", part, e),
            }
        }

        result
    }

    async fn fetch(
        &self,
        job: &mut TransferJob,
        sink: &dyn ProgressSink,
        part: &Path,
        tracker: &mut Option<Box<dyn ProgressTracker>>,
    ) -> Result<PathBuf> {
        let url = job.link().url.clone();
        debug!("Fetching {}", url);

        let res = self.client.get(url).send().await?;
        let res = res.error_for_status()?;

        let total = declared_length(res.headers());
        job.set_total(total);
        let tracker = tracker.insert(sink.create_tracker(&job.link().filename, total));

        let written = write_through(res, job, part, &**tracker).await?;

        if let Some(expected) = total {
            if written != expected {
                return Err(Error::LengthMismatch {
                    expected,
                    actual: written,
                });
            }
        }

        let output = self.directory.join(&job.link().filename);
        debug!("Renaming {:?} to {:?}", part, output);
        fs::rename(part, &output).await?;

        Ok(output)
    }
}

/// Streams the response body into `part` chunk by chunk.
async fn write_through(
    res: Response,
    job: &mut TransferJob,
    part: &Path,
    tracker: &dyn ProgressTracker,
) -> Result<u64> {
    debug!("Creating temporary file {:?}", part);
    let mut file = fs::File::create(part).await?;

    // Download the file chunk by chunk.
    let mut stream = res.bytes_stream();
    while let Some(item) = stream.next().await {
        let mut chunk = item?;
        let update = job.record_chunk(chunk.len() as u64);
        file.write_all_buf(&mut chunk).await?;
        tracker.update(&update);
    }

    file.flush().await?;
    file.sync_all().await?;

    Ok(job.downloaded_bytes())
}
