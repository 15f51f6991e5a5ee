//! Catalog snapshot serialization
//!
//! A [`CatalogSnapshot`] is the JSON file format for a frozen schema: the
//! CLI and the test suite load catalogs from these instead of a live
//! database connection. The wrapper carries a format version so old
//! snapshots can be migrated or rejected explicitly.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tablewright_core::{GenError, GenResult};

use crate::catalog::MemoryCatalog;
use crate::table::TableMetadata;

// ============================================================================
// Constants
// ============================================================================

/// Current snapshot format version.
pub const SNAPSHOT_FORMAT_VERSION: u32 = 1;

/// Conventional file extension for catalog snapshots.
pub const SNAPSHOT_EXTENSION: &str = "json";

// ============================================================================
// CatalogSnapshot
// ============================================================================

/// Serializable wrapper around a full set of table snapshots.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogSnapshot {
    /// Snapshot format version, for forward-compatibility checks
    pub format_version: u32,

    /// All table snapshots
    pub tables: Vec<TableMetadata>,
}

impl CatalogSnapshot {
    /// Wrap a set of tables in the current format version.
    pub fn new(tables: Vec<TableMetadata>) -> Self {
        Self {
            format_version: SNAPSHOT_FORMAT_VERSION,
            tables,
        }
    }

    /// Snapshot an in-memory catalog.
    pub fn from_catalog(catalog: &MemoryCatalog) -> Self {
        Self::new(catalog.tables().cloned().collect())
    }

    /// Convert into an in-memory catalog.
    ///
    /// # Errors
    ///
    /// `GenError::InvalidSnapshot` when the snapshot was produced by a newer
    /// format than this build understands.
    pub fn into_catalog(self) -> GenResult<MemoryCatalog> {
        if self.format_version > SNAPSHOT_FORMAT_VERSION {
            return Err(GenError::InvalidSnapshot(format!(
                "format version {} is newer than supported version {}",
                self.format_version, SNAPSHOT_FORMAT_VERSION
            )));
        }
        let mut catalog = MemoryCatalog::new();
        for table in self.tables {
            catalog.insert(table);
        }
        Ok(catalog)
    }
}

// ============================================================================
// Load / Save
// ============================================================================

/// Load a catalog from a JSON snapshot file.
pub fn load_snapshot(path: impl AsRef<Path>) -> GenResult<MemoryCatalog> {
    let path = path.as_ref();
    let contents = std::fs::read_to_string(path).map_err(|e| GenError::FileRead {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    let snapshot: CatalogSnapshot = serde_json::from_str(&contents)?;
    snapshot.into_catalog()
}

/// Save a catalog to a JSON snapshot file (pretty-printed).
pub fn save_snapshot(catalog: &MemoryCatalog, path: impl AsRef<Path>) -> GenResult<()> {
    let snapshot = CatalogSnapshot::from_catalog(catalog);
    let json = serde_json::to_string_pretty(&snapshot)?;
    std::fs::write(path.as_ref(), json)?;
    Ok(())
}

// ============================================================================
// Tests
// ============================================================================
