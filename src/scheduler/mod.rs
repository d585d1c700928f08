//! Scheduler module containing the bounded download pool.
//!
//! - `scheduler` - [`DownloadScheduler`], running batches of links with a concurrency ceiling
//! - `gauge` - [`ActivityGauge`], counting active transfers and their peak

pub mod gauge;
pub mod scheduler;

pub use gauge::{ActiveSlot, ActivityGauge};
pub use scheduler::{DownloadScheduler, TransferCallback};
