//! Progress module containing progress reporting and rendering.
//!
//! - `sink` - The [`ProgressSink`] / [`ProgressTracker`] capability the core reports to
//! - `display` - [`ProgressDisplay`], the `indicatif` implementation of that capability
//! - `style` - Progress bar styling options and templates
//!
//! # Examples
//!
//! ## Hidden Progress Bars
//!
//! ```rust
//! use harvester::progress::{ProgressDisplay, StyleOptions};
//!
//! let display = ProgressDisplay::new(StyleOptions::hidden());
//! ```

pub(crate) mod display;
pub(crate) mod sink;
pub(crate) mod style;

pub use display::ProgressDisplay;
pub use sink::{average_rate, NoopSink, ProgressSink, ProgressTracker, ProgressUpdate};
pub use style::{ProgressBarOpts, StyleOptions};
