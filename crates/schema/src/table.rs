//! Table and column metadata
//!
//! These types form the contract between schema introspection (produces) and
//! naming/generation (consumes). A `TableMetadata` is an immutable snapshot:
//! the pipeline never mutates it, and nothing here caches across catalog
//! changes.

use serde::{Deserialize, Serialize};

// ============================================================================
// Foreign-key column convention
// ============================================================================

/// Prefix marking a column as a foreign key: `fk_<table>` references the
/// primary key of `<table>`.
pub const FK_PREFIX: &str = "fk_";

/// The table referenced by a conventionally named foreign-key column, if the
/// column follows the convention.
pub fn foreign_key_target(column: &str) -> Option<&str> {
    column
        .strip_prefix(FK_PREFIX)
        .filter(|target| !target.is_empty())
}

/// The conventional foreign-key column name pointing at `table`.
pub fn foreign_key_column(table: &str) -> String {
    format!("{}{}", FK_PREFIX, table)
}

// ============================================================================
// ColumnMeta
// ============================================================================

/// One column of a source table, as reported by the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnMeta {
    /// Column name
    pub name: String,

    /// Raw data type text (e.g. `"decimal(10,2)"`)
    pub raw_type: String,

    /// Whether NULL is allowed
    #[serde(default)]
    pub nullable: bool,

    /// Raw default expression, if any (normalized later by the naming layer)
    #[serde(default)]
    pub default: Option<String>,

    /// Whether this column is part of the primary key
    #[serde(default)]
    pub primary: bool,
}

impl ColumnMeta {
    /// Create a new column descriptor.
    pub fn new(name: impl Into<String>, raw_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            raw_type: raw_type.into(),
            nullable: false,
            default: None,
            primary: false,
        }
    }

    /// Mark the column as nullable.
    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    /// Set the raw default expression.
    pub fn with_default(mut self, default: impl Into<String>) -> Self {
        self.default = Some(default.into());
        self
    }

    /// Mark the column as primary key.
    pub fn primary(mut self) -> Self {
        self.primary = true;
        self
    }

    /// The table this column references by the foreign-key convention, if any.
    pub fn foreign_key_target(&self) -> Option<&str> {
        foreign_key_target(&self.name)
    }
}

// ============================================================================
// TableMetadata
// ============================================================================

/// Immutable snapshot of one source table: name, ordered columns, and the
/// primary-key constraint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableMetadata {
    /// Table name as it appears in the catalog
    pub name: String,

    /// Columns in catalog order
    pub columns: Vec<ColumnMeta>,

    /// Primary-key column name, if the table has one
    #[serde(default)]
    pub primary_key: Option<String>,

    /// Whether the primary key is auto-incrementing
    #[serde(default)]
    pub primary_key_sequential: bool,
}

impl TableMetadata {
    /// Create an empty table snapshot.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            columns: Vec::new(),
            primary_key: None,
            primary_key_sequential: false,
        }
    }

    /// Append a column.
    pub fn with_column(mut self, column: ColumnMeta) -> Self {
        self.columns.push(column);
        self
    }

    /// Set the primary-key constraint, marking the matching column.
    pub fn with_primary_key(mut self, column: impl Into<String>, sequential: bool) -> Self {
        let column = column.into();
        for c in &mut self.columns {
            if c.name == column {
                c.primary = true;
            }
        }
        self.primary_key = Some(column);
        self.primary_key_sequential = sequential;
        self
    }

    /// Look up a column by name.
    pub fn column(&self, name: &str) -> Option<&ColumnMeta> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// All columns following the foreign-key convention, paired with the
    /// table each one references.
    pub fn foreign_key_columns(&self) -> Vec<(&ColumnMeta, &str)> {
        self.columns
            .iter()
            .filter_map(|c| c.foreign_key_target().map(|t| (c, t)))
            .collect()
    }

    /// Whether this table references `other` through a conventional FK column.
    pub fn references(&self, other: &str) -> bool {
        self.column(&foreign_key_column(other)).is_some()
    }
}

// ============================================================================
// Tests
// ============================================================================
