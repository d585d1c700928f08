//! Transfer module containing single-document retrieval.
//!
//! - [`transfer`] - [`FileTransfer`], streaming one link to disk atomically
//! - [`job`] - [`TransferJob`], the mutable record of an in-flight transfer
//! - [`summary`] - [`Summary`] and [`Status`], what remains once a job ends

pub mod job;
pub mod summary;
pub mod transfer;

pub use job::{JobState, TransferJob};
pub use summary::{Status, Summary};
pub use transfer::FileTransfer;
