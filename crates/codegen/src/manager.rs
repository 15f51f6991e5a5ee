//! Generation manager
//!
//! The `GenerationManager` drives the pipeline for a caller: it owns the
//! catalog and the naming configuration, keeps a cursor over the catalog's
//! table list, and exposes the per-artifact surface — `code`, `file_status`,
//! `write_file` — plus batch generation over every table.
//!
//! The three generators are built lazily, one per artifact kind, and all
//! three are dropped by a single invalidation event: a table switch, a
//! namespace switch, or a singularization change that affects the current
//! table. Naming and relation edges are resolved lazily too, so a broken
//! table (no primary key) only fails when something actually asks for it —
//! which is what lets batch mode skip it and keep going.

use serde::Serialize;
use tablewright_core::{ArtifactKind, FileState, GenError, GenResult, WriteOutcome};
use tablewright_schema::SchemaCatalog;

use crate::config::NamingConfig;
use crate::files;
use crate::generate::{
    AbstractEntityGenerator, ArtifactGenerator, EntityGenerator, GatewayGenerator,
    artifact_version,
};
use crate::naming::{self, NamingResult};
use crate::relations::{self, RelationEdge};

// ============================================================================
// GeneratorCache
// ============================================================================

/// Lazily built generators, one slot per artifact kind.
#[derive(Debug, Default)]
struct GeneratorCache {
    gateway: Option<GatewayGenerator>,
    abstract_entity: Option<AbstractEntityGenerator>,
    entity: Option<EntityGenerator>,
}

impl GeneratorCache {
    fn clear(&mut self) {
        self.gateway = None;
        self.abstract_entity = None;
        self.entity = None;
    }
}

// ============================================================================
// Reports
// ============================================================================

/// Outcome of one artifact write during batch generation.
#[derive(Debug, Clone, Serialize)]
pub struct ArtifactReport {
    /// Artifact kind
    pub kind: ArtifactKind,
    /// Write outcome
    pub outcome: WriteOutcome,
}

/// Per-table result of a batch generation run.
#[derive(Debug, Clone, Serialize)]
pub struct TableReport {
    /// Table name
    pub table: String,
    /// Per-kind outcomes; empty when the table failed to resolve
    pub artifacts: Vec<ArtifactReport>,
    /// Resolution error, when the table was skipped
    pub error: Option<String>,
}

impl TableReport {
    /// Whether the table was skipped due to a resolution error.
    pub fn skipped(&self) -> bool {
        self.error.is_some()
    }
}

// ============================================================================
// GenerationManager
// ============================================================================

/// Orchestrates naming resolution and artifact generation over a catalog.
#[derive(Debug)]
pub struct GenerationManager<C: SchemaCatalog> {
    catalog: C,
    config: NamingConfig,
    tables: Vec<String>,
    cursor: Option<usize>,
    naming: Option<NamingResult>,
    edges: Option<Vec<RelationEdge>>,
    generators: GeneratorCache,
}

impl<C: SchemaCatalog> GenerationManager<C> {
    // ====================================================================
    // Construction
    // ====================================================================

    /// Create a manager from a catalog and a naming configuration.
    ///
    /// # Errors
    ///
    /// `GenError::Configuration` / `GenError::NamespaceRoot` when the
    /// configuration is unusable; catalog errors from the initial table
    /// listing.
    pub fn new(catalog: C, config: NamingConfig) -> GenResult<Self> {
        config.validate()?;
        let tables = catalog.list_tables()?;
        Ok(Self {
            catalog,
            config,
            tables,
            cursor: None,
            naming: None,
            edges: None,
            generators: GeneratorCache::default(),
        })
    }

    /// Create a manager around a pre-built naming result, bypassing
    /// namespace validation. The caller vouches for the naming's paths.
    pub fn with_naming(catalog: C, config: NamingConfig, naming: NamingResult) -> GenResult<Self> {
        let tables = catalog.list_tables()?;
        Ok(Self {
            catalog,
            config,
            tables,
            cursor: None,
            naming: Some(naming),
            edges: None,
            generators: GeneratorCache::default(),
        })
    }

    // ====================================================================
    // Cursor
    // ====================================================================

    /// Advance to the next table; `false` once the list is exhausted.
    pub fn next_table(&mut self) -> bool {
        let next = match self.cursor {
            None => 0,
            Some(i) => i + 1,
        };
        if next >= self.tables.len() {
            return false;
        }
        self.cursor = Some(next);
        self.invalidate();
        true
    }

    /// Jump directly to a named table.
    pub fn select_table(&mut self, name: &str) -> GenResult<()> {
        let idx = self
            .tables
            .iter()
            .position(|t| t == name)
            .ok_or_else(|| GenError::table_not_found(name))?;
        self.cursor = Some(idx);
        self.invalidate();
        Ok(())
    }

    /// Reset the cursor to before the first table.
    pub fn rewind(&mut self) {
        self.cursor = None;
        self.invalidate();
    }

    /// Name of the table under the cursor.
    pub fn current_table(&self) -> Option<&str> {
        self.cursor.map(|i| self.tables[i].as_str())
    }

    /// All table names known to this manager.
    pub fn tables(&self) -> &[String] {
        &self.tables
    }

    // ====================================================================
    // Configuration
    // ====================================================================

    /// The active naming configuration.
    pub fn config(&self) -> &NamingConfig {
        &self.config
    }

    /// Switch namespace and module root; invalidates the active naming.
    pub fn set_namespace(
        &mut self,
        namespace: impl Into<String>,
        module_root: impl Into<std::path::PathBuf>,
    ) -> GenResult<()> {
        self.config.namespace = namespace.into();
        self.config.module_root = module_root.into();
        self.config.validate()?;
        self.invalidate();
        Ok(())
    }

    /// Toggle singularization; invalidates the active naming on change.
    pub fn set_singularize_enabled(&mut self, enabled: bool) {
        if self.config.singularize_enabled != enabled {
            self.config.singularize_enabled = enabled;
            self.invalidate();
        }
    }

    /// Replace the singularization ignore list, invalidating only when the
    /// current table's membership actually changed.
    pub fn set_singular_ignore<I, S>(&mut self, tables: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let ignore: std::collections::BTreeSet<String> =
            tables.into_iter().map(Into::into).collect();
        let affects_current = self
            .current_table()
            .is_some_and(|t| self.config.singular_ignore.contains(t) != ignore.contains(t));
        self.config.singular_ignore = ignore;
        if affects_current {
            self.invalidate();
        }
    }

    /// Drop the resolved naming, edges, and all three generators.
    fn invalidate(&mut self) {
        self.naming = None;
        self.edges = None;
        self.generators.clear();
        tracing::debug!(table = ?self.current_table(), "generation cache invalidated");
    }

    // ====================================================================
    // Resolution (lazy)
    // ====================================================================

    /// The naming result for the current table, resolving it on first use.
    pub fn naming(&mut self) -> GenResult<&NamingResult> {
        if self.naming.is_none() {
            let table = self
                .current_table()
                .ok_or_else(|| GenError::configuration("no table selected"))?
                .to_string();
            let meta = self.catalog.table(&table)?;
            self.naming = Some(naming::resolve(&self.config, &meta)?);
        }
        Ok(self.naming.as_ref().expect("resolved above"))
    }

    /// Relation edges for the current table, resolving them on first use.
    fn relation_edges(&mut self) -> GenResult<&[RelationEdge]> {
        if self.edges.is_none() {
            let table = self
                .current_table()
                .ok_or_else(|| GenError::configuration("no table selected"))?
                .to_string();
            let meta = self.catalog.table(&table)?;
            self.edges = Some(relations::resolve_all(&self.config, &meta, &self.catalog)?);
        }
        Ok(self.edges.as_deref().expect("resolved above"))
    }

    fn ensure_generator(&mut self, kind: ArtifactKind) -> GenResult<()> {
        match kind {
            ArtifactKind::Gateway => {
                if self.generators.gateway.is_none() {
                    let naming = self.naming()?.clone();
                    self.generators.gateway =
                        Some(GatewayGenerator::new(self.config.namespace.clone(), naming));
                }
            }
            ArtifactKind::AbstractEntity => {
                if self.generators.abstract_entity.is_none() {
                    let naming = self.naming()?.clone();
                    // Pre-built naming has no backing table to scan for edges.
                    let edges = if self.current_table().is_some() {
                        self.relation_edges()?.to_vec()
                    } else {
                        Vec::new()
                    };
                    self.generators.abstract_entity = Some(AbstractEntityGenerator::new(
                        self.config.namespace.clone(),
                        naming,
                        edges,
                    ));
                }
            }
            ArtifactKind::Entity => {
                if self.generators.entity.is_none() {
                    let naming = self.naming()?.clone();
                    self.generators.entity =
                        Some(EntityGenerator::new(self.config.namespace.clone(), naming));
                }
            }
        }
        Ok(())
    }

    // ====================================================================
    // Per-artifact surface
    // ====================================================================

    /// Generate the artifact source text for one kind.
    pub fn code(&mut self, kind: ArtifactKind) -> GenResult<String> {
        self.ensure_generator(kind)?;
        Ok(match kind {
            ArtifactKind::Gateway => self.generators.gateway.as_ref().expect("built").generate(),
            ArtifactKind::AbstractEntity => self
                .generators
                .abstract_entity
                .as_ref()
                .expect("built")
                .generate(),
            ArtifactKind::Entity => self.generators.entity.as_ref().expect("built").generate(),
        })
    }

    /// The target path for one artifact kind.
    pub fn artifact_path(&mut self, kind: ArtifactKind) -> GenResult<std::path::PathBuf> {
        let naming = self.naming()?;
        Ok(match kind {
            ArtifactKind::Gateway => naming.gateway_path.clone(),
            ArtifactKind::AbstractEntity => naming.entity_abstract_path.clone(),
            ArtifactKind::Entity => naming.entity_path.clone(),
        })
    }

    /// File state for one artifact kind at its target path.
    pub fn file_status(&mut self, kind: ArtifactKind) -> GenResult<FileState> {
        let path = self.artifact_path(kind)?;
        files::artifact_status(kind, &path, artifact_version(kind))
    }

    /// Write one artifact under the kind's overwrite policy.
    pub fn write_file(&mut self, kind: ArtifactKind, overwrite: bool) -> GenResult<WriteOutcome> {
        let path = self.artifact_path(kind)?;
        let content = self.code(kind)?;
        files::write_with_policy(kind, &path, artifact_version(kind), overwrite, || content)
    }

    // ====================================================================
    // Batch generation
    // ====================================================================

    /// Generate every artifact for every table, skipping tables whose
    /// naming fails with a schema error and reporting per-table outcomes.
    pub fn generate_all(&mut self, overwrite: bool) -> GenResult<Vec<TableReport>> {
        self.rewind();
        let mut reports = Vec::new();

        while self.next_table() {
            let table = self.current_table().expect("cursor set").to_string();

            if let Err(e) = self.naming() {
                if e.is_schema() {
                    tracing::warn!(table = %table, error = %e, "table skipped");
                    reports.push(TableReport {
                        table,
                        artifacts: Vec::new(),
                        error: Some(e.to_string()),
                    });
                    continue;
                }
                return Err(e);
            }

            let mut artifacts = Vec::new();
            for &kind in ArtifactKind::all() {
                let outcome = self.write_file(kind, overwrite)?;
                artifacts.push(ArtifactReport { kind, outcome });
            }
            reports.push(TableReport {
                table,
                artifacts,
                error: None,
            });
        }

        tracing::info!(
            tables = reports.len(),
            skipped = reports.iter().filter(|r| r.skipped()).count(),
            "batch generation complete"
        );
        Ok(reports)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use tablewright_schema::{ColumnMeta, MemoryCatalog, TableMetadata};

    fn shop_catalog() -> MemoryCatalog {
        MemoryCatalog::new()
            .with_table(
                TableMetadata::new("customers")
                    .with_column(ColumnMeta::new("id", "int(11)"))
                    .with_column(ColumnMeta::new("name", "varchar(255)"))
                    .with_primary_key("id", true),
            )
            .with_table(
                TableMetadata::new("orders")
                    .with_column(ColumnMeta::new("id", "int(11)"))
                    .with_column(ColumnMeta::new("total", "decimal(10,2)"))
                    .with_column(ColumnMeta::new("fk_customers", "int(11)"))
                    .with_primary_key("id", true),
            )
    }

    fn manager(dir: &tempfile::TempDir) -> GenerationManager<MemoryCatalog> {
        GenerationManager::new(
            shop_catalog(),
            NamingConfig::new("store::db", dir.path()),
        )
        .unwrap()
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let err = GenerationManager::new(
            shop_catalog(),
            NamingConfig::new("", "/nonexistent"),
        )
        .unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn test_with_naming_skips_namespace_validation() {
        let dir = tempfile::tempdir().unwrap();
        let table = shop_catalog().table("orders").unwrap();
        let naming =
            naming::resolve(&NamingConfig::new("store::db", dir.path()), &table).unwrap();

        // Invalid namespace, but a pre-built naming result carries the day.
        let mut mgr = GenerationManager::with_naming(
            shop_catalog(),
            NamingConfig::new("", "/nonexistent"),
            naming,
        )
        .unwrap();
        assert_eq!(mgr.naming().unwrap().entity_name, "Order");
    }

    #[test]
    fn test_cursor_iteration() {
        let dir = tempfile::tempdir().unwrap();
        let mut mgr = manager(&dir);

        assert_eq!(mgr.current_table(), None);
        assert!(mgr.next_table());
        assert_eq!(mgr.current_table(), Some("customers"));
        assert!(mgr.next_table());
        assert_eq!(mgr.current_table(), Some("orders"));
        assert!(!mgr.next_table());
    }

    #[test]
    fn test_naming_without_selection_fails() {
        let dir = tempfile::tempdir().unwrap();
        let mut mgr = manager(&dir);
        assert!(mgr.naming().unwrap_err().is_configuration());
    }

    #[test]
    fn test_table_switch_invalidates_naming() {
        let dir = tempfile::tempdir().unwrap();
        let mut mgr = manager(&dir);

        mgr.select_table("orders").unwrap();
        assert_eq!(mgr.naming().unwrap().entity_name, "Order");

        mgr.select_table("customers").unwrap();
        assert_eq!(mgr.naming().unwrap().entity_name, "Customer");
    }

    #[test]
    fn test_ignore_list_invalidates_only_current_table() {
        let dir = tempfile::tempdir().unwrap();
        let mut mgr = manager(&dir);
        mgr.select_table("orders").unwrap();
        assert_eq!(mgr.naming().unwrap().entity_name, "Order");

        // Ignoring an unrelated table leaves the resolved naming in place.
        mgr.set_singular_ignore(["customers"]);
        assert_eq!(mgr.naming().unwrap().entity_name, "Order");

        // Ignoring the current table re-resolves it.
        mgr.set_singular_ignore(["orders"]);
        assert_eq!(mgr.naming().unwrap().entity_name, "Orders");
    }

    #[test]
    fn test_code_for_all_kinds() {
        let dir = tempfile::tempdir().unwrap();
        let mut mgr = manager(&dir);
        mgr.select_table("orders").unwrap();

        assert!(
            mgr.code(ArtifactKind::Gateway)
                .unwrap()
                .contains("pub struct OrdersTable")
        );
        assert!(
            mgr.code(ArtifactKind::AbstractEntity)
                .unwrap()
                .contains("pub struct OrderAbstract")
        );
        assert!(
            mgr.code(ArtifactKind::Entity)
                .unwrap()
                .contains("pub struct Order {")
        );
    }

    #[test]
    fn test_write_and_status_lifecycle() {
        let dir = tempfile::tempdir().unwrap();
        let mut mgr = manager(&dir);
        mgr.select_table("orders").unwrap();

        for &kind in ArtifactKind::all() {
            assert_eq!(mgr.file_status(kind).unwrap(), FileState::Missing);
            assert_eq!(mgr.write_file(kind, false).unwrap(), WriteOutcome::Written);
            assert_eq!(mgr.file_status(kind).unwrap(), FileState::Ok);
        }

        // A second pass skips everything.
        for &kind in ArtifactKind::all() {
            assert_eq!(mgr.write_file(kind, false).unwrap(), WriteOutcome::Skipped);
        }
    }

    #[test]
    fn test_entity_write_once_preserves_edits() {
        let dir = tempfile::tempdir().unwrap();
        let mut mgr = manager(&dir);
        mgr.select_table("orders").unwrap();

        // Abstract write creates entities/; then the entity lands.
        mgr.write_file(ArtifactKind::AbstractEntity, false).unwrap();
        mgr.write_file(ArtifactKind::Entity, false).unwrap();

        let path = mgr.artifact_path(ArtifactKind::Entity).unwrap();
        std::fs::write(&path, "// hand edited\n").unwrap();

        assert_eq!(
            mgr.write_file(ArtifactKind::Entity, true).unwrap(),
            WriteOutcome::Skipped
        );
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "// hand edited\n");
        assert_eq!(mgr.file_status(ArtifactKind::Entity).unwrap(), FileState::Ok);
    }

    #[test]
    fn test_generate_all_reports() {
        let dir = tempfile::tempdir().unwrap();
        let mut mgr = manager(&dir);

        let reports = mgr.generate_all(false).unwrap();
        assert_eq!(reports.len(), 2);
        for report in &reports {
            assert!(!report.skipped());
            assert_eq!(report.artifacts.len(), 3);
            assert!(
                report
                    .artifacts
                    .iter()
                    .all(|a| a.outcome == WriteOutcome::Written)
            );
        }
        assert!(dir.path().join("gateways").join("orders_table.rs").exists());
        assert!(dir.path().join("entities").join("order.rs").exists());
        assert!(dir.path().join("entities").join("order_abstract.rs").exists());
    }

    #[test]
    fn test_generate_all_skips_pk_less_table() {
        let dir = tempfile::tempdir().unwrap();
        let catalog = shop_catalog().with_table(
            TableMetadata::new("audit_log").with_column(ColumnMeta::new("event", "text")),
        );
        let mut mgr =
            GenerationManager::new(catalog, NamingConfig::new("store::db", dir.path())).unwrap();

        let reports = mgr.generate_all(false).unwrap();
        assert_eq!(reports.len(), 3);

        let audit = reports.iter().find(|r| r.table == "audit_log").unwrap();
        assert!(audit.skipped());
        assert!(audit.error.as_deref().unwrap().contains("primary key"));

        // The other tables still generated.
        let orders = reports.iter().find(|r| r.table == "orders").unwrap();
        assert!(!orders.skipped());
        assert_eq!(orders.artifacts.len(), 3);
    }
}
