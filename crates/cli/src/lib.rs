//! # Tablewright CLI
//!
//! Thin console front-end over the generation pipeline. The CLI loads a
//! catalog snapshot (JSON), builds a [`GenerationManager`], and drives the
//! per-table generation surface — it contains no generation logic of its
//! own.
//!
//! ## Commands
//!
//! - `tables` — list the catalog's tables
//! - `status` — report per-artifact file state for one or all tables
//! - `generate` — write artifacts for one or all tables

use std::path::PathBuf;

use anyhow::{Context, bail};
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use serde::Deserialize;
use tablewright_codegen::{GenerationManager, NamingConfig, TableReport};
use tablewright_core::{ArtifactKind, FileState, WriteOutcome};
use tablewright_schema::{MemoryCatalog, load_snapshot};

// ============================================================================
// CLI definition
// ============================================================================

/// Tablewright: schema-driven generator for table gateways and entity pairs.
#[derive(Debug, Parser)]
#[command(name = "tablewright", version, about)]
pub struct Cli {
    /// Catalog snapshot file (JSON)
    #[arg(long, global = true, default_value = "schema.json")]
    pub schema: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List the tables in the catalog
    Tables,

    /// Report per-artifact file status
    Status(TargetArgs),

    /// Generate artifacts
    Generate(GenerateArgs),
}

/// Arguments identifying the generation target.
#[derive(Debug, Args)]
pub struct TargetArgs {
    /// Naming configuration file (TOML); command-line flags override it
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Target namespace (e.g. `store::db`)
    #[arg(long)]
    pub namespace: Option<String>,

    /// Module root directory the namespace maps to
    #[arg(long)]
    pub out: Option<PathBuf>,

    /// Restrict to one table instead of the whole catalog
    #[arg(long)]
    pub table: Option<String>,
}

#[derive(Debug, Args)]
pub struct GenerateArgs {
    #[command(flatten)]
    pub target: TargetArgs,

    /// Rewrite current gateway/abstract files too (entities are never
    /// overwritten)
    #[arg(long)]
    pub overwrite: bool,

    /// Emit the per-table report as JSON instead of text
    #[arg(long)]
    pub json: bool,
}

// ============================================================================
// Naming configuration file
// ============================================================================

/// On-disk naming configuration (`tablewright.toml`).
#[derive(Debug, Deserialize)]
pub struct ConfigFile {
    /// Target namespace
    pub namespace: String,

    /// Module root directory
    pub module_root: PathBuf,

    /// Whether entity names are singularized
    #[serde(default = "default_singularize")]
    pub singularize: bool,

    /// Tables exempt from singularization
    #[serde(default)]
    pub ignore: Vec<String>,
}

fn default_singularize() -> bool {
    true
}

impl TargetArgs {
    /// Merge the config file (if any) and command-line flags into a
    /// [`NamingConfig`]; flags win.
    pub fn naming_config(&self) -> anyhow::Result<NamingConfig> {
        let file = match &self.config {
            Some(path) => {
                let text = std::fs::read_to_string(path)
                    .with_context(|| format!("reading config file {}", path.display()))?;
                Some(
                    toml::from_str::<ConfigFile>(&text)
                        .with_context(|| format!("parsing config file {}", path.display()))?,
                )
            }
            None => None,
        };

        let namespace = self
            .namespace
            .clone()
            .or_else(|| file.as_ref().map(|f| f.namespace.clone()));
        let module_root = self
            .out
            .clone()
            .or_else(|| file.as_ref().map(|f| f.module_root.clone()));

        let (Some(namespace), Some(module_root)) = (namespace, module_root) else {
            bail!("a namespace and module root are required (flags or --config file)");
        };

        let mut config = NamingConfig::new(namespace, module_root);
        if let Some(file) = file {
            config.singularize_enabled = file.singularize;
            config = config.with_ignore_list(file.ignore);
        }
        Ok(config)
    }
}

// ============================================================================
// Entry point
// ============================================================================

/// Run one parsed CLI invocation.
pub fn run(cli: Cli) -> anyhow::Result<()> {
    let catalog = load_snapshot(&cli.schema)
        .with_context(|| format!("loading catalog snapshot {}", cli.schema.display()))?;

    match cli.command {
        Command::Tables => cmd_tables(&catalog),
        Command::Status(target) => cmd_status(catalog, target),
        Command::Generate(args) => cmd_generate(catalog, args),
    }
}

fn cmd_tables(catalog: &MemoryCatalog) -> anyhow::Result<()> {
    for table in catalog.tables() {
        println!(
            "{}  ({} columns{})",
            table.name,
            table.columns.len(),
            if table.primary_key.is_some() {
                ""
            } else {
                ", no primary key"
            }
        );
    }
    Ok(())
}

fn cmd_status(catalog: MemoryCatalog, target: TargetArgs) -> anyhow::Result<()> {
    let config = target.naming_config()?;
    let mut mgr = GenerationManager::new(catalog, config)?;

    let tables: Vec<String> = match &target.table {
        Some(table) => vec![table.clone()],
        None => mgr.tables().to_vec(),
    };

    for table in tables {
        mgr.select_table(&table)?;
        print!("{table}:");
        if let Err(e) = mgr.naming() {
            println!("  {}", format!("skipped ({e})").yellow());
            continue;
        }
        for &kind in ArtifactKind::all() {
            let state = mgr.file_status(kind)?;
            print!("  {}={}", kind, paint_state(state));
        }
        println!();
    }
    Ok(())
}

fn cmd_generate(catalog: MemoryCatalog, args: GenerateArgs) -> anyhow::Result<()> {
    let config = args.target.naming_config()?;
    let mut mgr = GenerationManager::new(catalog, config)?;

    let reports: Vec<TableReport> = match &args.target.table {
        Some(table) => {
            mgr.select_table(table)?;
            mgr.naming()?;
            let mut artifacts = Vec::new();
            for &kind in ArtifactKind::all() {
                let outcome = mgr.write_file(kind, args.overwrite)?;
                artifacts.push(tablewright_codegen::ArtifactReport { kind, outcome });
            }
            vec![TableReport {
                table: table.clone(),
                artifacts,
                error: None,
            }]
        }
        None => mgr.generate_all(args.overwrite)?,
    };

    tracing::info!(tables = reports.len(), overwrite = args.overwrite, "generation run finished");

    if args.json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
        return Ok(());
    }

    let mut failed = false;
    for report in &reports {
        if let Some(error) = &report.error {
            println!("{}: {}", report.table, format!("skipped ({error})").yellow());
            continue;
        }
        print!("{}:", report.table);
        for artifact in &report.artifacts {
            failed |= artifact.outcome == WriteOutcome::Failed;
            print!("  {}={}", artifact.kind, paint_outcome(artifact.outcome));
        }
        println!();
    }

    if failed {
        bail!("one or more artifact writes failed");
    }
    Ok(())
}

fn paint_state(state: FileState) -> colored::ColoredString {
    match state {
        FileState::Missing => state.to_string().red(),
        FileState::Outdated => state.to_string().yellow(),
        FileState::Ok => state.to_string().green(),
    }
}

fn paint_outcome(outcome: WriteOutcome) -> colored::ColoredString {
    match outcome {
        WriteOutcome::Written => outcome.to_string().green(),
        WriteOutcome::Skipped => outcome.to_string().dimmed(),
        WriteOutcome::Failed => outcome.to_string().red(),
    }
}

// ============================================================================
// Tests
// ============================================================================
