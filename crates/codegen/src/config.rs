//! Naming configuration
//!
//! A [`NamingConfig`] carries the target namespace, the module root
//! directory the namespace maps to, and the singularization switches. The
//! naming resolver and the generation manager both validate through
//! [`NamingConfig::validate`]; everything downstream can then assume the
//! configuration is sound.

use std::collections::BTreeSet;
use std::path::PathBuf;

use tablewright_core::{GenError, GenResult};

use crate::inflect;

// ============================================================================
// NamingConfig
// ============================================================================

/// Configuration for naming resolution and artifact placement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamingConfig {
    /// Target namespace for generated code (e.g. `"store::db"`); embedded in
    /// generated `use` paths.
    pub namespace: String,

    /// Directory the namespace maps to; generated files are placed under
    /// `gateways/` and `entities/` below this root.
    pub module_root: PathBuf,

    /// Whether entity names are singularized at all (default `true`).
    pub singularize_enabled: bool,

    /// Tables exempt from singularization even when it is enabled.
    pub singular_ignore: BTreeSet<String>,
}

impl NamingConfig {
    /// Create a configuration with singularization enabled and no ignore
    /// list.
    pub fn new(namespace: impl Into<String>, module_root: impl Into<PathBuf>) -> Self {
        Self {
            namespace: namespace.into(),
            module_root: module_root.into(),
            singularize_enabled: true,
            singular_ignore: BTreeSet::new(),
        }
    }

    /// Disable singularization entirely.
    pub fn without_singularization(mut self) -> Self {
        self.singularize_enabled = false;
        self
    }

    /// Exempt one table from singularization.
    pub fn with_ignored_table(mut self, table: impl Into<String>) -> Self {
        self.singular_ignore.insert(table.into());
        self
    }

    /// Replace the whole ignore list.
    pub fn with_ignore_list<I, S>(mut self, tables: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.singular_ignore = tables.into_iter().map(Into::into).collect();
        self
    }

    /// Check that the namespace is usable and maps to an existing module
    /// root.
    ///
    /// # Errors
    ///
    /// `GenError::Configuration` for an empty or malformed namespace,
    /// `GenError::NamespaceRoot` when the root directory does not exist.
    pub fn validate(&self) -> GenResult<()> {
        if self.namespace.is_empty() {
            return Err(GenError::configuration("namespace must not be empty"));
        }
        if !self
            .namespace
            .split("::")
            .all(|segment| is_identifier(segment))
        {
            return Err(GenError::configuration(format!(
                "namespace '{}' is not a valid module path",
                self.namespace
            )));
        }
        if !self.module_root.is_dir() {
            return Err(GenError::namespace_root(
                &self.namespace,
                &self.module_root,
            ));
        }
        Ok(())
    }

    /// Singularize `word`, honoring the global switch and the per-table
    /// ignore list. `table` is the catalog name used for the exception
    /// lookup (the word itself may be a cased variant of it).
    pub fn singular(&self, word: &str, table: &str) -> String {
        if !self.singularize_enabled || self.singular_ignore.contains(table) {
            return word.to_string();
        }
        inflect::singular_of(word)
    }

    /// Directory for gateway artifacts.
    pub fn gateway_dir(&self) -> PathBuf {
        self.module_root.join("gateways")
    }

    /// Directory for entity and abstract-entity artifacts.
    pub fn entity_dir(&self) -> PathBuf {
        self.module_root.join("entities")
    }
}

/// A non-empty ASCII identifier: letters, digits, underscores, not starting
/// with a digit.
fn is_identifier(segment: &str) -> bool {
    let mut chars = segment.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

// ============================================================================
// Tests
// ============================================================================
