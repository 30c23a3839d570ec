use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use log::{debug, info};

use crate::data::error::DataError;
use crate::data::loader;
use crate::data::model::ListingTable;

// ---------------------------------------------------------------------------
// TableCache – load-once, reuse-many
// ---------------------------------------------------------------------------

/// Caller-owned cache of loaded tables, keyed by source path.
///
/// The source file is treated as static for the process lifetime, so a path
/// is read at most once; a caller that knows the file changed invalidates
/// the entry explicitly and the next `load` re-reads it.
#[derive(Debug, Default)]
pub struct TableCache {
    entries: BTreeMap<PathBuf, ListingTable>,
}

impl TableCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the table for `path`, reading the file only on first use.
    pub fn load(&mut self, path: &Path) -> Result<&ListingTable, DataError> {
        match self.entries.entry(path.to_path_buf()) {
            Entry::Occupied(entry) => {
                debug!("cache hit for {}", path.display());
                Ok(entry.into_mut())
            }
            Entry::Vacant(entry) => {
                info!("cache miss, loading {}", path.display());
                Ok(entry.insert(loader::load_file(path)?))
            }
        }
    }

    /// Drop the cached table for `path`, if any. Returns whether an entry
    /// was present.
    pub fn invalidate(&mut self, path: &Path) -> bool {
        self.entries.remove(path).is_some()
    }

    /// Drop every cached table.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Number of cached tables.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
