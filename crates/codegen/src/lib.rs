//! # Tablewright Codegen
//!
//! The generation engine: given table metadata from a
//! [`SchemaCatalog`](tablewright_schema::SchemaCatalog), derive a canonical
//! naming scheme and produce three source artifacts per table — a table
//! gateway, a fully regenerated abstract entity, and a hand-editable
//! concrete entity.
//!
//! ## Pipeline
//!
//! ```text
//! SchemaCatalog ──► naming::resolve ──► NamingResult
//!        │                │
//!        └── relations ───┤
//!                         ▼
//!            generate::{Gateway, AbstractEntity, Entity}
//!                         │
//!                         ▼
//!            files::write_with_policy ──► file system
//! ```
//!
//! The [`GenerationManager`] wires the stages together behind a per-table
//! cursor; the individual modules stay usable on their own.

// ============================================================================
// Modules
// ============================================================================

pub mod config;
pub mod doc;
pub mod files;
pub mod generate;
pub mod inflect;
pub mod manager;
pub mod naming;
pub mod relations;

// ============================================================================
// Re-exports
// ============================================================================

pub use config::NamingConfig;
pub use generate::{
    ABSTRACT_ENTITY_ARTIFACT_VERSION, AbstractEntityGenerator, ArtifactGenerator,
    EntityGenerator, GATEWAY_ARTIFACT_VERSION, GatewayGenerator, artifact_version,
};
pub use manager::{ArtifactReport, GenerationManager, TableReport};
pub use naming::{NamingResult, Property};
pub use relations::{RelationDirection, RelationEdge};
