//! # Tablewright Schema
//!
//! The schema model consumed by the generation pipeline:
//!
//! - [`TableMetadata`] / [`ColumnMeta`] — immutable per-table snapshots
//! - the `fk_<table>` foreign-key column convention
//! - [`SchemaCatalog`] — the introspection interface (listing, metadata,
//!   primary keys, reverse foreign-key lookups)
//! - [`MemoryCatalog`] — in-process implementation, loadable from JSON
//!   snapshot files

pub mod catalog;
pub mod snapshot;
pub mod table;

pub use catalog::{ForeignKeyRef, MemoryCatalog, PrimaryKey, SchemaCatalog};
pub use snapshot::{CatalogSnapshot, load_snapshot, save_snapshot};
pub use table::{ColumnMeta, FK_PREFIX, TableMetadata, foreign_key_column, foreign_key_target};
