use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use super::error::DataError;
use super::loader;
use super::model::Dataset;

// ---------------------------------------------------------------------------
// DataStore – load once, serve the same table for the process lifetime
// ---------------------------------------------------------------------------

/// Owns the dataset read from `source`.
///
/// The first successful [`DataStore::load`] reads the file; every later call
/// returns the cached table without touching the filesystem. A failed load
/// leaves the cell empty.
#[derive(Debug)]
pub struct DataStore {
    source: PathBuf,
    dataset: OnceLock<Dataset>,
}

static GLOBAL: OnceLock<DataStore> = OnceLock::new();

impl DataStore {
    pub fn new(source: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            dataset: OnceLock::new(),
        }
    }

    /// The process-wide store. The first caller fixes the source path;
    /// later callers get that same store whatever path they pass.
    pub fn global(source: &Path) -> &'static DataStore {
        GLOBAL.get_or_init(|| DataStore::new(source))
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn load(&self) -> Result<&Dataset, DataError> {
        if let Some(ds) = self.dataset.get() {
            return Ok(ds);
        }

        let dataset = loader::load_file(&self.source).map_err(|e| {
            log::error!("Failed to load {}: {e:#}", self.source.display());
            DataError::Unavailable {
                path: self.source.clone(),
                reason: format!("{e:#}"),
            }
        })?;
        log::info!(
            "Loaded {} rows from {}",
            dataset.len(),
            self.source.display()
        );

        Ok(self.dataset.get_or_init(|| dataset))
    }
}
