//! # Tablewright Core
//!
//! Core vocabulary shared by every Tablewright crate: the unified error
//! type, the semantic column type classification, normalized default values,
//! and the artifact/file-state/write-outcome enums of the generation
//! protocol.

pub mod error;
pub mod types;

pub use error::{GenError, GenResult};
pub use types::{ArtifactKind, DefaultValue, FileState, SemanticType, WriteOutcome};
