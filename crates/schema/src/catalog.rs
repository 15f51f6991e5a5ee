//! Schema catalog interface
//!
//! The generation pipeline reads everything it knows about a database
//! through the [`SchemaCatalog`] trait: table listing, per-table metadata,
//! primary-key constraints, and reverse foreign-key lookups. Production
//! deployments back this with a live information-schema connection;
//! [`MemoryCatalog`] backs it with an in-process map for snapshots and tests.

use std::collections::BTreeMap;

use tablewright_core::{GenError, GenResult};

use crate::table::{TableMetadata, foreign_key_column};

// ============================================================================
// PrimaryKey / ForeignKeyRef
// ============================================================================

/// A table's primary-key constraint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrimaryKey {
    /// Primary-key column name
    pub column: String,
    /// Whether the key auto-increments
    pub sequential: bool,
}

/// A reverse foreign-key hit: `table.column` points at the table being
/// queried.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForeignKeyRef {
    /// The child table holding the FK column
    pub table: String,
    /// The FK column on the child table
    pub column: String,
}

// ============================================================================
// SchemaCatalog
// ============================================================================

/// Read-only schema introspection.
///
/// Only [`list_tables`](SchemaCatalog::list_tables) and
/// [`table`](SchemaCatalog::table) are required; the remaining queries have
/// default implementations derived from the table snapshot. A live backend
/// would override them with direct catalog queries.
pub trait SchemaCatalog {
    /// Names of every table in the schema, in a stable order.
    fn list_tables(&self) -> GenResult<Vec<String>>;

    /// Full metadata snapshot for one table.
    ///
    /// # Errors
    ///
    /// `GenError::TableNotFound` if the table does not exist.
    fn table(&self, name: &str) -> GenResult<TableMetadata>;

    /// Column descriptors for one table, in catalog order.
    fn columns_of(&self, name: &str) -> GenResult<Vec<crate::table::ColumnMeta>> {
        Ok(self.table(name)?.columns)
    }

    /// The table's primary-key constraint, or `None` when it has none.
    fn primary_key_of(&self, name: &str) -> GenResult<Option<PrimaryKey>> {
        let table = self.table(name)?;
        Ok(table.primary_key.map(|column| PrimaryKey {
            column,
            sequential: table.primary_key_sequential,
        }))
    }

    /// Every other table holding a conventional FK column pointing at `name`.
    fn referencing_columns(&self, name: &str) -> GenResult<Vec<ForeignKeyRef>> {
        let marker = foreign_key_column(name);
        let mut refs = Vec::new();
        for other in self.list_tables()? {
            if other == name {
                continue;
            }
            let table = self.table(&other)?;
            if table.column(&marker).is_some() {
                refs.push(ForeignKeyRef {
                    table: other,
                    column: marker.clone(),
                });
            }
        }
        Ok(refs)
    }
}

// ============================================================================
// MemoryCatalog
// ============================================================================

/// In-memory catalog backed by a sorted table map.
///
/// Iteration order is the sorted table-name order, so every pipeline run
/// over the same snapshot visits tables deterministically.
#[derive(Debug, Clone, Default)]
pub struct MemoryCatalog {
    tables: BTreeMap<String, TableMetadata>,
}

impl MemoryCatalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a table, replacing any previous snapshot with the same name.
    pub fn insert(&mut self, table: TableMetadata) {
        self.tables.insert(table.name.clone(), table);
    }

    /// Builder-style [`insert`](MemoryCatalog::insert).
    pub fn with_table(mut self, table: TableMetadata) -> Self {
        self.insert(table);
        self
    }

    /// Number of tables.
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    /// Whether the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// Borrow every table snapshot, in name order.
    pub fn tables(&self) -> impl Iterator<Item = &TableMetadata> {
        self.tables.values()
    }
}

impl SchemaCatalog for MemoryCatalog {
    fn list_tables(&self) -> GenResult<Vec<String>> {
        Ok(self.tables.keys().cloned().collect())
    }

    fn table(&self, name: &str) -> GenResult<TableMetadata> {
        self.tables
            .get(name)
            .cloned()
            .ok_or_else(|| GenError::table_not_found(name))
    }
}

// ============================================================================
// Tests
// ============================================================================
