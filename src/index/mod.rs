//! The set of filenames already present in the destination directory.
//!
//! The index is loaded once when a crawl starts and only grows afterwards: a
//! filename is inserted right after its transfer succeeds and is never
//! removed during a run. Clones share the same underlying set.

use crate::error::Result;
use crate::link::Link;
use crate::utils::fs::list_filenames;

use std::collections::HashSet;
use std::path::Path;
use std::sync::{Arc, PoisonError, RwLock};
use tracing::debug;

/// Shared, append-only set of downloaded filenames.
#[derive(Debug, Clone, Default)]
pub struct ExistingFileIndex {
    names: Arc<RwLock<HashSet<String>>>,
}

impl ExistingFileIndex {
    /// Creates an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the index from the files currently in `dir`.
    pub async fn load(dir: &Path) -> Result<Self> {
        let names = list_filenames(dir).await?;
        debug!("Indexed {} existing files in {:?}", names.len(), dir);
        Ok(Self::from_iter(names))
    }

    /// Returns `true` if `filename` has already been downloaded.
    pub fn contains(&self, filename: &str) -> bool {
        self.names
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(filename)
    }

    /// Records a completed download. Returns `false` if it was already known.
    pub fn insert(&self, filename: &str) -> bool {
        self.names
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(filename.to_string())
    }

    /// Number of known filenames.
    pub fn len(&self) -> usize {
        self.names
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Returns `true` if no filename is known.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Copy of the current contents.
    pub fn snapshot(&self) -> HashSet<String> {
        self.names
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Splits `links` into those already downloaded and those still needed,
    /// preserving order within each group.
    pub fn partition(&self, links: Vec<Link>) -> (Vec<Link>, Vec<Link>) {
        let names = self.names.read().unwrap_or_else(PoisonError::into_inner);
        links
            .into_iter()
            .partition(|link| names.contains(&link.filename))
    }
}

impl FromIterator<String> for ExistingFileIndex {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self {
            names: Arc::new(RwLock::new(iter.into_iter().collect())),
        }
    }
}
