//! Shared utility functions.
//!
//! - [`content_length`] - Declared size extraction from HTTP response headers
//! - [`fs`] - Destination directory listing and temporary file naming

pub mod content_length;
pub mod fs;

// Re-export commonly used utilities
pub use content_length::{declared_length, parse_content_range_total};
pub use fs::{ensure_dir, list_filenames, temp_path};
