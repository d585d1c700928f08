//! Progress bar styling.
//!
//! The display draws two kinds of bars: a crawl-wide bar counting finished
//! transfers, and one bar per active transfer labelled with its filename.
//! [`StyleOptions`] holds one [`ProgressBarOpts`] for each.
//!
//! # Examples
//!
//! ```rust
//! use harvester::progress::{ProgressBarOpts, StyleOptions};
//!
//! let style = StyleOptions::new(
//!     ProgressBarOpts::new(
//!         Some("{bar:30.cyan} {pos}/{len} files".to_string()),
//!         None,
//!         true,
//!         false,
//!     ),
//!     ProgressBarOpts::transfer(),
//! );
//! assert!(style.is_enabled());
//! assert!(!StyleOptions::hidden().is_enabled());
//! ```

use indicatif::{ProgressBar, ProgressStyle};

/// Styles for the crawl-wide bar and the per-transfer bars.
///
/// By default the crawl bar is kept on screen when the crawl ends and
/// per-transfer bars disappear as soon as their transfer succeeds.
#[derive(Debug, Clone)]
pub struct StyleOptions {
    pub(crate) main: ProgressBarOpts,
    pub(crate) child: ProgressBarOpts,
}

impl Default for StyleOptions {
    fn default() -> Self {
        Self {
            main: ProgressBarOpts::files(),
            child: ProgressBarOpts::transfer(),
        }
    }
}

impl StyleOptions {
    pub fn new(main: ProgressBarOpts, child: ProgressBarOpts) -> Self {
        Self { main, child }
    }

    /// Nothing is drawn.
    pub fn hidden() -> Self {
        Self::new(ProgressBarOpts::hidden(), ProgressBarOpts::hidden())
    }

    /// `false` when both bars are disabled.
    pub fn is_enabled(&self) -> bool {
        self.main.enabled || self.child.enabled
    }

    /// Options of the crawl-wide bar.
    pub fn main(&self) -> &ProgressBarOpts {
        &self.main
    }

    /// Options of the per-transfer bars.
    pub fn child(&self) -> &ProgressBarOpts {
        &self.child
    }
}

/// Look and lifetime of one kind of bar.
#[derive(Debug, Clone)]
pub struct ProgressBarOpts {
    template: Option<String>,
    /// At least three characters: done, current, remaining.
    progress_chars: Option<String>,
    pub(crate) enabled: bool,
    /// Remove the bar from the screen once finished.
    pub(crate) clear: bool,
}

impl Default for ProgressBarOpts {
    fn default() -> Self {
        Self::new(None, None, true, true)
    }
}

impl ProgressBarOpts {
    /// Finished documents against documents scheduled so far.
    ///
    /// `████████████████████▊            57/92 (61%) eta 00:01:12`
    pub const TEMPLATE_FILES: &'static str =
        "{bar:40.blue} {pos:>}/{len} ({percent}%) eta {eta_precise:.blue}";
    /// Filename, bytes received against the declared total, average rate.
    ///
    /// `uu-1-2024.pdf ━━━━━━━━━━╾───────── 105.61 KiB/211.23 KiB 1.01 MiB/s`
    pub const TEMPLATE_TRANSFER: &'static str =
        "{prefix:.bold} {bar:40.green/black} {bytes:>11.green}/{total_bytes:<11.green} {msg:>13.red}";
    /// Used when the server declares no length.
    ///
    /// `uu-1-2024.pdf ⠋ 105.61 KiB 1.01 MiB/s`
    pub const TEMPLATE_UNSIZED: &'static str =
        "{prefix:.bold} {spinner} {bytes:>11.green} {msg:>13.red}";
    pub const CHARS_BLOCKS: &'static str = "█▉▊▋▌▍▎▏  ";
    pub const CHARS_LINE: &'static str = "━╾╴─";

    pub fn new(
        template: Option<String>,
        progress_chars: Option<String>,
        enabled: bool,
        clear: bool,
    ) -> Self {
        Self {
            template,
            progress_chars,
            enabled,
            clear,
        }
    }

    /// Default crawl-wide bar; stays on screen.
    pub fn files() -> Self {
        Self::new(
            Some(Self::TEMPLATE_FILES.into()),
            Some(Self::CHARS_BLOCKS.into()),
            true,
            false,
        )
    }

    /// Default per-transfer bar; cleared on success.
    pub fn transfer() -> Self {
        Self::new(
            Some(Self::TEMPLATE_TRANSFER.into()),
            Some(Self::CHARS_LINE.into()),
            true,
            true,
        )
    }

    /// A disabled bar.
    pub fn hidden() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }

    /// Builds the [`ProgressStyle`]. A template that does not parse is
    /// replaced by indicatif's default bar.
    pub fn to_progress_style(&self) -> ProgressStyle {
        let base = self
            .template
            .as_deref()
            .and_then(|t| ProgressStyle::with_template(t).ok())
            .unwrap_or_else(ProgressStyle::default_bar);
        match self.progress_chars {
            Some(ref chars) => base.progress_chars(chars),
            None => base,
        }
    }

    /// Creates a bar of length `len`, or a spinner when `len` is unknown.
    /// Disabled options yield a hidden bar.
    pub fn to_progress_bar(&self, len: Option<u64>) -> ProgressBar {
        if !self.enabled {
            return ProgressBar::hidden();
        }

        match len {
            Some(len) => ProgressBar::new(len).with_style(self.to_progress_style()),
            None => {
                let style = ProgressStyle::with_template(Self::TEMPLATE_UNSIZED)
                    .unwrap_or_else(|_| ProgressStyle::default_spinner());
                ProgressBar::new_spinner().with_style(style)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hidden_opts_give_hidden_bar() {
        let pb = ProgressBarOpts::hidden().to_progress_bar(Some(100));
        assert!(pb.is_hidden());
    }

    #[test]
    fn test_known_length() {
        let pb = ProgressBarOpts::transfer().to_progress_bar(Some(100));
        assert_eq!(pb.length(), Some(100));
    }

    #[test]
    fn test_unknown_length_is_spinner() {
        let pb = ProgressBarOpts::transfer().to_progress_bar(None);
        assert_eq!(pb.length(), None);
    }

    #[test]
    fn test_bad_template_falls_back() {
        let opts = ProgressBarOpts::new(Some("{bar:40.nope".into()), None, true, true);
        let _ = opts.to_progress_style();
    }

    #[test]
    fn test_defaults() {
        let style = StyleOptions::default();
        assert!(!style.main().clear);
        assert!(style.child().clear);
    }
}
