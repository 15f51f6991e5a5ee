//! Concrete-entity generation
//!
//! Emits the thin, hand-editable entity artifact: a wrapper struct that
//! derefs to the abstract base. The file carries no version marker — it is
//! generated exactly once and never overwritten, so anything a developer
//! adds to it survives regeneration of the rest of the table's artifacts.

use tablewright_core::ArtifactKind;

use crate::doc::SourceDocument;
use crate::generate::{ArtifactGenerator, standard_header};
use crate::naming::NamingResult;

// ============================================================================
// EntityGenerator
// ============================================================================

/// Generator for the concrete-entity artifact.
#[derive(Debug, Clone)]
pub struct EntityGenerator {
    namespace: String,
    naming: NamingResult,
}

impl EntityGenerator {
    /// Create an entity generator for one resolved table.
    pub fn new(namespace: impl Into<String>, naming: NamingResult) -> Self {
        Self {
            namespace: namespace.into(),
            naming,
        }
    }
}

impl ArtifactGenerator for EntityGenerator {
    fn kind(&self) -> ArtifactKind {
        ArtifactKind::Entity
    }

    fn version(&self) -> Option<u32> {
        None
    }

    fn declarations(&self, doc: &mut SourceDocument) {
        doc.push_use("std::ops::{Deref, DerefMut}");
        doc.push_use(format!(
            "{}::entities::{}::{}",
            self.namespace,
            self.naming.entity_abstract_module(),
            self.naming.entity_abstract_name
        ));
    }

    fn header(&self, doc: &mut SourceDocument) {
        standard_header(
            doc,
            self.kind(),
            &self.naming.entity_name,
            &self.naming.table,
            self.version(),
            "Generated once; safe to edit. Regeneration never overwrites this file.",
        );
    }

    fn class_decl(&self, doc: &mut SourceDocument) {
        let naming = &self.naming;
        let mut block = String::new();
        block.push_str(&format!(
            "/// Hand-editable entity for one `{}` row.\n",
            naming.table
        ));
        block.push_str("///\n");
        block.push_str(&format!(
            "/// Add custom behavior here; generated plumbing lives in [`{}`].\n",
            naming.entity_abstract_name
        ));
        block.push_str(&format!("pub struct {} {{\n", naming.entity_name));
        block.push_str(&format!("    base: {},\n", naming.entity_abstract_name));
        block.push_str("}");
        doc.push_block(block);
    }

    fn methods(&self, doc: &mut SourceDocument) {
        let entity = &self.naming.entity_name;
        let base = &self.naming.entity_abstract_name;

        let mut block = format!("impl {entity} {{\n");
        block.push_str("    /// New entity with column defaults.\n");
        block.push_str("    pub fn new() -> Self {\n");
        block.push_str(&format!("        Self {{ base: {base}::new() }}\n"));
        block.push_str("    }\n");
        block.push('\n');
        block.push_str("    /// Wrap a generated base.\n");
        block.push_str(&format!("    pub fn from_base(base: {base}) -> Self {{\n"));
        block.push_str("        Self { base }\n");
        block.push_str("    }\n");
        block.push_str("}");
        doc.push_block(block);

        let mut deref = format!("impl Deref for {entity} {{\n");
        deref.push_str(&format!("    type Target = {base};\n"));
        deref.push('\n');
        deref.push_str("    fn deref(&self) -> &Self::Target {\n");
        deref.push_str("        &self.base\n");
        deref.push_str("    }\n");
        deref.push_str("}");
        doc.push_block(deref);

        let mut deref_mut = format!("impl DerefMut for {entity} {{\n");
        deref_mut.push_str("    fn deref_mut(&mut self) -> &mut Self::Target {\n");
        deref_mut.push_str("        &mut self.base\n");
        deref_mut.push_str("    }\n");
        deref_mut.push_str("}");
        doc.push_block(deref_mut);

        let mut default_block = format!("impl Default for {entity} {{\n");
        default_block.push_str("    fn default() -> Self {\n");
        default_block.push_str("        Self::new()\n");
        default_block.push_str("    }\n");
        default_block.push_str("}");
        doc.push_block(default_block);
    }
}

// ============================================================================
// Tests
// ============================================================================
