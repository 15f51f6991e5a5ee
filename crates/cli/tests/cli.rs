//! CLI integration tests: exercise the binary against a snapshot on disk.

use assert_cmd::Command;
use predicates::prelude::*;
use tablewright_schema::{ColumnMeta, MemoryCatalog, TableMetadata, save_snapshot};

fn write_shop_snapshot(dir: &std::path::Path) -> std::path::PathBuf {
    let catalog = MemoryCatalog::new()
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
        );
    let path = dir.join("schema.json");
    save_snapshot(&catalog, &path).unwrap();
    path
}

#[test]
fn tables_lists_catalog() {
    let dir = tempfile::tempdir().unwrap();
    let schema = write_shop_snapshot(dir.path());

    Command::cargo_bin("tablewright")
        .unwrap()
        .args(["--schema", schema.to_str().unwrap(), "tables"])
        .assert()
        .success()
        .stdout(predicate::str::contains("customers"))
        .stdout(predicate::str::contains("orders"));
}

#[test]
fn generate_writes_artifacts() {
    let dir = tempfile::tempdir().unwrap();
    let schema = write_shop_snapshot(dir.path());
    let out = dir.path().join("db");
    std::fs::create_dir(&out).unwrap();

    Command::cargo_bin("tablewright")
        .unwrap()
        .args([
            "--schema",
            schema.to_str().unwrap(),
            "generate",
            "--namespace",
            "store::db",
            "--out",
            out.to_str().unwrap(),
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("orders:"));

    assert!(out.join("gateways").join("orders_table.rs").exists());
    assert!(out.join("entities").join("order_abstract.rs").exists());
    assert!(out.join("entities").join("order.rs").exists());
    assert!(out.join("gateways").join("customers_table.rs").exists());
}

#[test]
fn status_reports_missing_then_ok() {
    let dir = tempfile::tempdir().unwrap();
    let schema = write_shop_snapshot(dir.path());
    let out = dir.path().join("db");
    std::fs::create_dir(&out).unwrap();

    Command::cargo_bin("tablewright")
        .unwrap()
        .args([
            "--schema",
            schema.to_str().unwrap(),
            "status",
            "--namespace",
            "store::db",
            "--out",
            out.to_str().unwrap(),
            "--table",
            "orders",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("missing"));

    Command::cargo_bin("tablewright")
        .unwrap()
        .args([
            "--schema",
            schema.to_str().unwrap(),
            "generate",
            "--namespace",
            "store::db",
            "--out",
            out.to_str().unwrap(),
            "--table",
            "orders",
        ])
        .assert()
        .success();

    Command::cargo_bin("tablewright")
        .unwrap()
        .args([
            "--schema",
            schema.to_str().unwrap(),
            "status",
            "--namespace",
            "store::db",
            "--out",
            out.to_str().unwrap(),
            "--table",
            "orders",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("ok"));
}

#[test]
fn generate_json_report() {
    let dir = tempfile::tempdir().unwrap();
    let schema = write_shop_snapshot(dir.path());
    let out = dir.path().join("db");
    std::fs::create_dir(&out).unwrap();

    Command::cargo_bin("tablewright")
        .unwrap()
        .args([
            "--schema",
            schema.to_str().unwrap(),
            "generate",
            "--json",
            "--namespace",
            "store::db",
            "--out",
            out.to_str().unwrap(),
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"outcome\": \"written\""));
}

#[test]
fn missing_snapshot_fails() {
    Command::cargo_bin("tablewright")
        .unwrap()
        .args(["--schema", "/nonexistent/schema.json", "tables"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("loading catalog snapshot"));
}
