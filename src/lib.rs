//! # Tablewright
//!
//! A schema-driven source generator: point it at a relational schema and it
//! derives a consistent naming scheme per table — with English
//! singularization and foreign-key relationship discovery — then produces
//! three source artifacts per table:
//!
//! - a **table gateway** owning the table's CRUD operations,
//! - an **abstract entity** base, fully regenerated on schema change,
//! - a thin **concrete entity** a developer may hand-edit, written once and
//!   never overwritten.
//!
//! Gateway and abstract-entity files embed an `@VERSION` marker so stale
//! artifacts are detected and selectively rewritten without clobbering
//! hand-written code.
//!
//! ## Example
//!
//! ```rust
//! use tablewright::codegen::{GenerationManager, NamingConfig};
//! use tablewright::core::ArtifactKind;
//! use tablewright::schema::{ColumnMeta, MemoryCatalog, TableMetadata};
//!
//! let catalog = MemoryCatalog::new().with_table(
//!     TableMetadata::new("orders")
//!         .with_column(ColumnMeta::new("id", "int(11)"))
//!         .with_column(ColumnMeta::new("total", "decimal(10,2)"))
//!         .with_primary_key("id", true),
//! );
//!
//! let out = tempfile::tempdir().unwrap();
//! let config = NamingConfig::new("store::db", out.path());
//! let mut manager = GenerationManager::new(catalog, config).unwrap();
//!
//! manager.select_table("orders").unwrap();
//! let gateway = manager.code(ArtifactKind::Gateway).unwrap();
//! assert!(gateway.contains("pub struct OrdersTable"));
//! ```

pub use tablewright_codegen as codegen;
pub use tablewright_core as core;
pub use tablewright_schema as schema;

/// Commonly used types, importable in one line.
pub mod prelude {
    pub use tablewright_codegen::{
        ArtifactGenerator, GenerationManager, NamingConfig, NamingResult, RelationEdge,
    };
    pub use tablewright_core::{ArtifactKind, FileState, GenError, GenResult, WriteOutcome};
    pub use tablewright_schema::{ColumnMeta, MemoryCatalog, SchemaCatalog, TableMetadata};
}
