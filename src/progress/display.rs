//! Terminal progress rendering with `indicatif`.
//!
//! [`ProgressDisplay`] owns a [`MultiProgress`] for the whole crawl. Its main
//! bar grows by the size of every scheduled batch and advances as transfers
//! finish; each transfer gets a child bar that shows its filename, bytes and
//! average rate.
//!
//! ```rust,no_run
//! use harvester::progress::{ProgressDisplay, ProgressSink, ProgressUpdate, StyleOptions};
//!
//! let display = ProgressDisplay::new(StyleOptions::default());
//! display.batch_started(1);
//! let tracker = display.create_tracker("uu-1-2024.pdf", Some(1024));
//! tracker.update(&ProgressUpdate::new(512, Some(1024), 0.5));
//! tracker.stop(true);
//! display.transfer_finished(true);
//! display.finish();
//! ```

use crate::progress::sink::{ProgressSink, ProgressTracker, ProgressUpdate};
use crate::progress::StyleOptions;

use indicatif::{HumanBytes, MultiProgress, ProgressBar, ProgressDrawTarget};

/// Progress display manager that coordinates multiple progress bars.
pub struct ProgressDisplay {
    /// The multi-progress instance for coordinating multiple progress bars.
    multi: MultiProgress,
    /// The main progress bar for overall progress.
    main: ProgressBar,
    /// Style options for progress bars.
    style_options: StyleOptions,
}

impl ProgressDisplay {
    /// Create a new progress display manager.
    pub fn new(style_options: StyleOptions) -> Self {
        // Prepare the progress bar.
        let multi = match style_options.is_enabled() {
            true => MultiProgress::new(),
            false => MultiProgress::with_draw_target(ProgressDrawTarget::hidden()),
        };

        let main = multi.add(style_options.main().to_progress_bar(Some(0)));
        main.tick();

        Self {
            multi,
            main,
            style_options,
        }
    }

    /// A display that draws nothing.
    pub fn hidden() -> Self {
        Self::new(StyleOptions::hidden())
    }

    /// Get the main progress bar.
    pub fn main(&self) -> &ProgressBar {
        &self.main
    }
}

impl ProgressSink for ProgressDisplay {
    fn create_tracker(&self, label: &str, total: Option<u64>) -> Box<dyn ProgressTracker> {
        let bar = self
            .multi
            .add(self.style_options.child().to_progress_bar(total));
        bar.set_prefix(label.to_string());
        Box::new(BarTracker {
            bar,
            clear: self.style_options.child().clear,
        })
    }

    fn batch_started(&self, jobs: usize) {
        self.main.inc_length(jobs as u64);
    }

    fn transfer_finished(&self, _success: bool) {
        self.main.inc(1);
    }

    fn batch_finished(&self) {
        self.main.tick();
    }

    /// Finish the progress display, clearing or keeping the main bar based on
    /// configuration.
    fn finish(&self) {
        if self.style_options.main().clear {
            self.main.finish_and_clear();
        } else {
            self.main.finish();
        }
    }
}

/// One child bar.
struct BarTracker {
    bar: ProgressBar,
    clear: bool,
}

impl ProgressTracker for BarTracker {
    fn update(&self, update: &ProgressUpdate) {
        self.bar.set_position(update.downloaded);
        self.bar
            .set_message(format!("{}/s", HumanBytes(update.bytes_per_sec as u64)));
    }

    fn stop(&self, success: bool) {
        if !success {
            self.bar.abandon_with_message("failed");
        } else if self.clear {
            self.bar.finish_and_clear();
        } else {
            self.bar.finish();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_main_bar_counts_finished_transfers() {
        let display = ProgressDisplay::hidden();
        display.batch_started(3);
        assert_eq!(display.main().length(), Some(3));

        let ok = display.create_tracker("a.pdf", Some(10));
        ok.update(&ProgressUpdate::new(10, Some(10), 1.0));
        ok.stop(true);
        display.transfer_finished(true);
        let failed = display.create_tracker("b.pdf", None);
        failed.stop(false);
        display.transfer_finished(false);

        assert_eq!(display.main().position(), 2);
        display.batch_finished();
        display.finish();
    }
}
