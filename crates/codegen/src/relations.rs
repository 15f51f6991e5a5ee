//! Relationship resolution
//!
//! Discovers foreign-key edges around one table and resolves naming for the
//! far side of each edge:
//!
//! - **Parent** edges come from the table's own columns following the
//!   `fk_<table>` convention.
//! - **Child** edges come from scanning the catalog for other tables whose
//!   FK columns point back at this one.
//!
//! Edges are recomputed on demand — one catalog round-trip per direction —
//! and are never cached across catalog mutations.

use tablewright_core::GenResult;
use tablewright_schema::{SchemaCatalog, TableMetadata};

use crate::config::NamingConfig;
use crate::naming::{self, NamingResult};

// ============================================================================
// RelationEdge
// ============================================================================

/// Direction of a discovered relationship, seen from the current table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RelationDirection {
    /// The current table references the related table
    Parent,
    /// The related table references the current table
    Child,
}

/// A discovered foreign-key relationship.
#[derive(Debug, Clone, PartialEq)]
pub struct RelationEdge {
    /// Edge direction
    pub direction: RelationDirection,

    /// The FK column: local for [`Parent`](RelationDirection::Parent),
    /// on the remote table for [`Child`](RelationDirection::Child)
    pub column: String,

    /// Name of the table on the other side
    pub related_table: String,

    /// Resolved naming for the other side
    pub related: NamingResult,
}

impl RelationEdge {
    /// Whether this is a parent edge.
    pub fn is_parent(&self) -> bool {
        self.direction == RelationDirection::Parent
    }

    /// Whether this is a child edge.
    pub fn is_child(&self) -> bool {
        self.direction == RelationDirection::Child
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Parent edges: tables this one references through its own FK columns.
pub fn resolve_parents(
    config: &NamingConfig,
    table: &TableMetadata,
    catalog: &dyn SchemaCatalog,
) -> GenResult<Vec<RelationEdge>> {
    let mut edges = Vec::new();
    for (column, target) in table.foreign_key_columns() {
        let parent = catalog.table(target)?;
        let related = naming::resolve(config, &parent)?;
        edges.push(RelationEdge {
            direction: RelationDirection::Parent,
            column: column.name.clone(),
            related_table: parent.name,
            related,
        });
    }
    Ok(edges)
}

/// Child edges: tables referencing this one through their FK columns.
pub fn resolve_children(
    config: &NamingConfig,
    table: &TableMetadata,
    catalog: &dyn SchemaCatalog,
) -> GenResult<Vec<RelationEdge>> {
    let mut edges = Vec::new();
    for fk_ref in catalog.referencing_columns(&table.name)? {
        let child = catalog.table(&fk_ref.table)?;
        let related = naming::resolve(config, &child)?;
        edges.push(RelationEdge {
            direction: RelationDirection::Child,
            column: fk_ref.column,
            related_table: child.name,
            related,
        });
    }
    Ok(edges)
}

/// Both directions, parents first.
pub fn resolve_all(
    config: &NamingConfig,
    table: &TableMetadata,
    catalog: &dyn SchemaCatalog,
) -> GenResult<Vec<RelationEdge>> {
    let mut edges = resolve_parents(config, table, catalog)?;
    edges.extend(resolve_children(config, table, catalog)?);
    Ok(edges)
}

// ============================================================================
// Tests
// ============================================================================
