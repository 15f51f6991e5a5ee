//! End-to-end pipeline test over the `orders` / `customers` scenario:
//! naming, relationship symmetry, generation, write policies, and the
//! staleness round-trip on a version bump.

use tablewright_codegen::generate::{GATEWAY_ARTIFACT_VERSION, artifact_version};
use tablewright_codegen::{GenerationManager, NamingConfig, files};
use tablewright_core::{ArtifactKind, FileState, WriteOutcome};
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

#[test]
fn full_scenario() {
    let dir = tempfile::tempdir().unwrap();
    let mut mgr = GenerationManager::new(
        shop_catalog(),
        NamingConfig::new("store::db", dir.path()),
    )
    .unwrap();

    // ── naming for `orders` ──────────────────────────────────────────────
    mgr.select_table("orders").unwrap();
    {
        let naming = mgr.naming().unwrap();
        assert_eq!(naming.entity_name, "Order");
        assert_eq!(naming.entity_variable_name, "order");
        assert_eq!(naming.gateway_name, "OrdersTable");
    }

    // ── relationship symmetry shows up in the generated code ─────────────
    let order_abstract = mgr.code(ArtifactKind::AbstractEntity).unwrap();
    assert!(order_abstract.contains("pub fn customer(&self, conn: &Connection)"));

    mgr.select_table("customers").unwrap();
    let customer_abstract = mgr.code(ArtifactKind::AbstractEntity).unwrap();
    assert!(customer_abstract.contains("pub fn orders(&self, conn: &Connection)"));
    assert!(customer_abstract.contains("find_by(\"fk_customers\""));

    // ── entity lifecycle: Missing → written → Ok, then write-once ────────
    mgr.select_table("orders").unwrap();
    assert_eq!(
        mgr.file_status(ArtifactKind::Entity).unwrap(),
        FileState::Missing
    );

    mgr.write_file(ArtifactKind::AbstractEntity, false).unwrap();
    assert_eq!(
        mgr.write_file(ArtifactKind::Entity, false).unwrap(),
        WriteOutcome::Written
    );
    assert_eq!(mgr.file_status(ArtifactKind::Entity).unwrap(), FileState::Ok);

    let entity_path = mgr.artifact_path(ArtifactKind::Entity).unwrap();
    std::fs::write(&entity_path, "// manual edits\n").unwrap();
    assert_eq!(
        mgr.write_file(ArtifactKind::Entity, true).unwrap(),
        WriteOutcome::Skipped
    );
    assert_eq!(
        std::fs::read_to_string(&entity_path).unwrap(),
        "// manual edits\n"
    );
}

#[test]
fn staleness_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let mut mgr = GenerationManager::new(
        shop_catalog(),
        NamingConfig::new("store::db", dir.path()),
    )
    .unwrap();
    mgr.select_table("orders").unwrap();

    // Generate and write the gateway; it reads back current.
    assert_eq!(
        mgr.write_file(ArtifactKind::Gateway, false).unwrap(),
        WriteOutcome::Written
    );
    let path = mgr.artifact_path(ArtifactKind::Gateway).unwrap();
    assert_eq!(
        files::artifact_status(ArtifactKind::Gateway, &path, GATEWAY_ARTIFACT_VERSION).unwrap(),
        FileState::Ok
    );

    // A bumped version sees the same file as outdated.
    assert_eq!(
        files::artifact_status(ArtifactKind::Gateway, &path, GATEWAY_ARTIFACT_VERSION + 1)
            .unwrap(),
        FileState::Outdated
    );

    // Rewriting under the current version restores Ok.
    assert_eq!(
        mgr.write_file(ArtifactKind::Gateway, true).unwrap(),
        WriteOutcome::Written
    );
    assert_eq!(
        mgr.file_status(ArtifactKind::Gateway).unwrap(),
        FileState::Ok
    );
}

#[test]
fn generated_outputs_are_reproducible() {
    let dir = tempfile::tempdir().unwrap();
    let config = NamingConfig::new("store::db", dir.path());

    let mut first = GenerationManager::new(shop_catalog(), config.clone()).unwrap();
    let mut second = GenerationManager::new(shop_catalog(), config).unwrap();
    first.select_table("orders").unwrap();
    second.select_table("orders").unwrap();

    for &kind in ArtifactKind::all() {
        assert_eq!(
            first.code(kind).unwrap(),
            second.code(kind).unwrap(),
            "{kind} output must be byte-identical across runs"
        );
    }
}

#[test]
fn written_gateway_embeds_its_version() {
    let dir = tempfile::tempdir().unwrap();
    let mut mgr = GenerationManager::new(
        shop_catalog(),
        NamingConfig::new("store::db", dir.path()),
    )
    .unwrap();
    mgr.select_table("orders").unwrap();
    mgr.write_file(ArtifactKind::Gateway, false).unwrap();

    let path = mgr.artifact_path(ArtifactKind::Gateway).unwrap();
    let content = std::fs::read_to_string(path).unwrap();
    assert_eq!(
        files::extract_version(&content),
        Some(artifact_version(ArtifactKind::Gateway))
    );
}
