//! Naming resolution
//!
//! Turns one table's metadata into the canonical identifier set every other
//! stage consumes: entity/gateway/abstract type names, the variable-style
//! name, the three artifact file paths, and the normalized property map.
//! Resolution is a pure function of (configuration, table metadata) — same
//! inputs always yield the same [`NamingResult`], which is what makes
//! regeneration reproducible.

use std::collections::BTreeMap;
use std::path::PathBuf;

use heck::{ToPascalCase, ToSnakeCase};
use tablewright_core::{DefaultValue, GenError, GenResult, SemanticType};
use tablewright_schema::TableMetadata;

use crate::config::NamingConfig;

// ============================================================================
// Property
// ============================================================================

/// One column, normalized for generation.
#[derive(Debug, Clone, PartialEq)]
pub struct Property {
    /// Semantic type classified from the raw column type
    pub semantic: SemanticType,

    /// Normalized default value
    pub default: DefaultValue,

    /// Whether NULL is allowed
    pub nullable: bool,

    /// Whether this column is the primary key
    pub primary: bool,
}

// ============================================================================
// NamingResult
// ============================================================================

/// The canonical naming scheme for one (namespace, table) pair.
#[derive(Debug, Clone, PartialEq)]
pub struct NamingResult {
    /// Source table name
    pub table: String,

    /// Singular, PascalCase entity type name (e.g. `Order`)
    pub entity_name: String,

    /// Abstract base type name (`entity_name` + `Abstract`)
    pub entity_abstract_name: String,

    /// Gateway type name (PascalCase table + `Table`, e.g. `OrdersTable`)
    pub gateway_name: String,

    /// Singular, original-case variable-style name (e.g. `order`)
    pub entity_variable_name: String,

    /// Target path of the gateway artifact
    pub gateway_path: PathBuf,

    /// Target path of the concrete entity artifact
    pub entity_path: PathBuf,

    /// Target path of the abstract entity artifact
    pub entity_abstract_path: PathBuf,

    /// Primary-key column name
    pub primary_key: String,

    /// Whether the primary key auto-increments
    pub primary_key_sequential: bool,

    /// Normalized properties keyed by column name
    pub properties: BTreeMap<String, Property>,
}

impl NamingResult {
    /// Module name of the gateway artifact (file stem, e.g. `orders_table`).
    pub fn gateway_module(&self) -> String {
        self.gateway_name.to_snake_case()
    }

    /// Module name of the entity artifact (e.g. `order`).
    pub fn entity_module(&self) -> String {
        self.entity_name.to_snake_case()
    }

    /// Module name of the abstract entity artifact (e.g. `order_abstract`).
    pub fn entity_abstract_module(&self) -> String {
        self.entity_abstract_name.to_snake_case()
    }

    /// The primary key's property descriptor.
    ///
    /// Resolution guarantees the primary-key column exists in the property
    /// map, so this never fails after a successful [`resolve`].
    pub fn primary_key_property(&self) -> &Property {
        &self.properties[&self.primary_key]
    }
}

// ============================================================================
// resolve
// ============================================================================

/// Resolve the canonical naming scheme for `table` under `config`.
///
/// # Errors
///
/// - `GenError::Configuration` / `GenError::NamespaceRoot` when the
///   configuration is unusable
/// - `GenError::MissingPrimaryKey` when the table has no primary key, or
///   the declared key names a column the table does not have
pub fn resolve(config: &NamingConfig, table: &TableMetadata) -> GenResult<NamingResult> {
    config.validate()?;

    let primary_key = table
        .primary_key
        .clone()
        .ok_or_else(|| GenError::missing_primary_key(&table.name))?;
    if table.column(&primary_key).is_none() {
        return Err(GenError::missing_primary_key(&table.name));
    }

    let base = table.name.to_pascal_case();
    let gateway_name = format!("{base}Table");
    let entity_name = config.singular(&base, &table.name);
    let entity_abstract_name = format!("{entity_name}Abstract");
    let entity_variable_name = config.singular(&table.name, &table.name);

    let gateway_path = config
        .gateway_dir()
        .join(format!("{}.rs", gateway_name.to_snake_case()));
    let entity_path = config
        .entity_dir()
        .join(format!("{}.rs", entity_name.to_snake_case()));
    let entity_abstract_path = config
        .entity_dir()
        .join(format!("{}.rs", entity_abstract_name.to_snake_case()));

    let mut properties = BTreeMap::new();
    for column in &table.columns {
        let semantic = SemanticType::from_raw(&column.raw_type);
        properties.insert(
            column.name.clone(),
            Property {
                semantic,
                default: DefaultValue::normalize(column.default.as_deref(), semantic),
                nullable: column.nullable,
                primary: column.primary,
            },
        );
    }

    Ok(NamingResult {
        table: table.name.clone(),
        entity_name,
        entity_abstract_name,
        gateway_name,
        entity_variable_name,
        gateway_path,
        entity_path,
        entity_abstract_path,
        primary_key,
        primary_key_sequential: table.primary_key_sequential,
        properties,
    })
}

// ============================================================================
// Tests
// ============================================================================
