//! Artifact generators
//!
//! Three generation strategies share one contract: a generator holds the
//! resolved naming for the current table (plus relation edges where needed)
//! and assembles its artifact in four fixed stages — import declarations,
//! header documentation, type declaration, method bodies. The provided
//! [`generate`](ArtifactGenerator::generate) runs the stages in order over a
//! fresh [`SourceDocument`], so output is deterministic for identical
//! inputs.

use tablewright_core::ArtifactKind;

use crate::doc::{SourceDocument, version_marker};
use crate::naming::{NamingResult, Property};

pub mod entity;
pub mod entity_abstract;
pub mod gateway;

pub use entity::EntityGenerator;
pub use entity_abstract::AbstractEntityGenerator;
pub use gateway::GatewayGenerator;

// ============================================================================
// Artifact versions
// ============================================================================

/// Current gateway artifact version, stamped into generated headers.
pub const GATEWAY_ARTIFACT_VERSION: u32 = 3;

/// Current abstract-entity artifact version, stamped into generated headers.
pub const ABSTRACT_ENTITY_ARTIFACT_VERSION: u32 = 3;

/// The version for a kind; entity files carry none and report `0`.
pub fn artifact_version(kind: ArtifactKind) -> u32 {
    match kind {
        ArtifactKind::Gateway => GATEWAY_ARTIFACT_VERSION,
        ArtifactKind::AbstractEntity => ABSTRACT_ENTITY_ARTIFACT_VERSION,
        ArtifactKind::Entity => 0,
    }
}

// ============================================================================
// ArtifactGenerator
// ============================================================================

/// Common contract for the three artifact generators.
pub trait ArtifactGenerator {
    /// Which artifact this generator produces.
    fn kind(&self) -> ArtifactKind;

    /// The version stamped into the header; `None` for unversioned kinds.
    fn version(&self) -> Option<u32>;

    /// Stage (a): file-level import declarations.
    fn declarations(&self, doc: &mut SourceDocument);

    /// Stage (b): header documentation with kind name and version marker.
    fn header(&self, doc: &mut SourceDocument);

    /// Stage (c): type declaration with properties.
    fn class_decl(&self, doc: &mut SourceDocument);

    /// Stage (d): method bodies.
    fn methods(&self, doc: &mut SourceDocument);

    /// Run the four stages in order and render the artifact.
    fn generate(&self) -> String {
        let mut doc = SourceDocument::new();
        self.declarations(&mut doc);
        self.header(&mut doc);
        self.class_decl(&mut doc);
        self.methods(&mut doc);
        doc.render()
    }
}

// ============================================================================
// Shared emission helpers
// ============================================================================

/// The standard header block: type, kind, source table, optional version
/// marker, and a per-kind editing note.
pub(crate) fn standard_header(
    doc: &mut SourceDocument,
    kind: ArtifactKind,
    type_name: &str,
    table: &str,
    version: Option<u32>,
    note: &str,
) {
    doc.push_header(format!(
        "{} — {} for table `{}`",
        type_name,
        kind.display_name(),
        table
    ));
    if let Some(version) = version {
        doc.push_header(version_marker(version));
    }
    doc.push_header("");
    doc.push_header(note);
}

/// Properties in deterministic (sorted) order.
pub(crate) fn sorted_properties(naming: &NamingResult) -> impl Iterator<Item = (&str, &Property)> {
    naming.properties.iter().map(|(n, p)| (n.as_str(), p))
}

/// Non-primary-key properties, i.e. the data columns a save touches.
pub(crate) fn data_properties(naming: &NamingResult) -> Vec<(&str, &Property)> {
    sorted_properties(naming).filter(|(_, p)| !p.primary).collect()
}

// ============================================================================
// Tests
// ============================================================================
