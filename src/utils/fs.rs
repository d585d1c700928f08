//! Destination directory helpers.
//!
//! Files are written under a hidden temporary name (`.<filename>.part`) and
//! renamed into place once complete, so a filename present in the destination
//! directory always denotes a fully downloaded document.

use crate::error::Result;

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

/// Suffix of in-flight temporary files.
pub const PART_SUFFIX: &str = ".part";

/// Creates `dir` and its parents if missing.
pub async fn ensure_dir(dir: &Path) -> Result<()> {
    debug!("Creating destination directory {:?}", dir);
    fs::create_dir_all(dir).await?;
    Ok(())
}

/// Lists the names of regular files in `dir`, ignoring temporary files.
///
/// A missing directory yields an empty set.
pub async fn list_filenames(dir: &Path) -> Result<HashSet<String>> {
    let mut names = HashSet::new();
    let mut entries = match fs::read_dir(dir).await {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(names),
        Err(e) => return Err(e.into()),
    };

    while let Some(entry) = entries.next_entry().await? {
        if !entry.file_type().await?.is_file() {
            continue;
        }
        let Ok(name) = entry.file_name().into_string() else {
            continue;
        };
        if is_temp_name(&name) {
            continue;
        }
        names.insert(name);
    }

    Ok(names)
}

/// Path of the temporary file used while `filename` is being transferred.
pub fn temp_path(dir: &Path, filename: &str) -> PathBuf {
    dir.join(format!(".{}{}", filename, PART_SUFFIX))
}

fn is_temp_name(name: &str) -> bool {
    name.starts_with('.') && name.ends_with(PART_SUFFIX)
}
