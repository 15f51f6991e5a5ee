//! Error types for Tablewright
//!
//! One unified error enum covers the whole pipeline: configuration problems,
//! schema-catalog problems, file IO, and snapshot serialization. Write
//! failures caused by file permissions are deliberately *not* errors — the
//! file-state protocol reports them as a failed write outcome so batch runs
//! can continue past a single bad target.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for Tablewright
#[derive(Debug, Error)]
pub enum GenError {
    // ========================================================================
    // Configuration Errors
    // ========================================================================
    /// General configuration error
    #[error("Invalid configuration: {0}")]
    Configuration(String),

    /// The namespace does not map to an existing module root directory
    #[error("Namespace '{namespace}' does not map to a module root: {path}")]
    NamespaceRoot { namespace: String, path: PathBuf },

    // ========================================================================
    // Schema Errors
    // ========================================================================
    /// Requested table is absent from the catalog
    #[error("Table not found in catalog: {0}")]
    TableNotFound(String),

    /// A table has no resolvable primary key
    #[error("Table '{0}' has no resolvable primary key")]
    MissingPrimaryKey(String),

    /// A catalog query failed
    #[error("Catalog query failed for '{table}': {message}")]
    Catalog { table: String, message: String },

    // ========================================================================
    // IO Errors
    // ========================================================================
    /// File IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// File read error
    #[error("Failed to read file '{path}': {message}")]
    FileRead { path: PathBuf, message: String },

    /// Directory creation failed
    #[error("Failed to create directory '{path}': {message}")]
    DirectoryCreate { path: PathBuf, message: String },

    // ========================================================================
    // Serialization Errors
    // ========================================================================
    /// JSON serialization error
    #[error("JSON serialization error: {0}")]
    JsonSerialization(#[from] serde_json::Error),

    /// Invalid catalog snapshot format
    #[error("Invalid catalog snapshot: {0}")]
    InvalidSnapshot(String),
}

impl GenError {
    /// Create a configuration error
    pub fn configuration(msg: impl Into<String>) -> Self {
        GenError::Configuration(msg.into())
    }

    /// Create a namespace-root error
    pub fn namespace_root(namespace: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        GenError::NamespaceRoot {
            namespace: namespace.into(),
            path: path.into(),
        }
    }

    /// Create a table-not-found error
    pub fn table_not_found(table: impl Into<String>) -> Self {
        GenError::TableNotFound(table.into())
    }

    /// Create a missing-primary-key error
    pub fn missing_primary_key(table: impl Into<String>) -> Self {
        GenError::MissingPrimaryKey(table.into())
    }

    /// Create a catalog query error
    pub fn catalog(table: impl Into<String>, msg: impl Into<String>) -> Self {
        GenError::Catalog {
            table: table.into(),
            message: msg.into(),
        }
    }

    /// Check if this error is a configuration error
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            GenError::Configuration(_) | GenError::NamespaceRoot { .. }
        )
    }

    /// Check if this error is a schema error
    pub fn is_schema(&self) -> bool {
        matches!(
            self,
            GenError::TableNotFound(_) | GenError::MissingPrimaryKey(_) | GenError::Catalog { .. }
        )
    }

    /// Check if this error is an IO error
    pub fn is_io(&self) -> bool {
        matches!(
            self,
            GenError::Io(_) | GenError::FileRead { .. } | GenError::DirectoryCreate { .. }
        )
    }
}

/// Result type alias using GenError
pub type GenResult<T> = Result<T, GenError>;

// ============================================================================
// Tests
// ============================================================================
