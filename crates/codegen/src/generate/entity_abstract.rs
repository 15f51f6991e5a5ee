//! Abstract-entity generation
//!
//! Emits the fully regenerated base type for one table: the field struct,
//! one typed getter/setter pair per property, name-string `get`/`set`
//! dispatch validated against the known property set, one traversal method
//! per relation edge, and load/save/delete delegation to the gateway.
//! Everything hand-written belongs in the concrete entity, never here.

use std::collections::BTreeSet;

use tablewright_core::ArtifactKind;

use crate::doc::{SourceDocument, initializer, is_copy_type, rust_type};
use crate::generate::{
    ABSTRACT_ENTITY_ARTIFACT_VERSION, ArtifactGenerator, sorted_properties, standard_header,
};
use crate::naming::NamingResult;
use crate::relations::RelationEdge;

// ============================================================================
// AbstractEntityGenerator
// ============================================================================

/// Generator for the abstract-entity artifact.
#[derive(Debug, Clone)]
pub struct AbstractEntityGenerator {
    namespace: String,
    naming: NamingResult,
    edges: Vec<RelationEdge>,
}

impl AbstractEntityGenerator {
    /// Create an abstract-entity generator for one resolved table and its
    /// relation edges.
    pub fn new(
        namespace: impl Into<String>,
        naming: NamingResult,
        edges: Vec<RelationEdge>,
    ) -> Self {
        Self {
            namespace: namespace.into(),
            naming,
            edges,
        }
    }

    fn pk_getter(&self) -> String {
        format!("self.{}()", self.naming.primary_key)
    }

    fn emit_properties_const(&self, out: &mut String) {
        let names: Vec<String> = sorted_properties(&self.naming)
            .map(|(name, _)| format!("\"{name}\""))
            .collect();
        out.push_str("    /// Property names accepted by [`get`](Self::get) and [`set`](Self::set).\n");
        out.push_str(&format!(
            "    pub const PROPERTIES: &'static [&'static str] = &[{}];\n",
            names.join(", ")
        ));
    }

    fn emit_new(&self, out: &mut String) {
        out.push_str("    /// New instance with column defaults.\n");
        out.push_str("    pub fn new() -> Self {\n");
        out.push_str("        Self {\n");
        for (name, prop) in sorted_properties(&self.naming) {
            out.push_str(&format!(
                "            {name}: {},\n",
                initializer(prop.semantic, prop.nullable, &prop.default)
            ));
        }
        out.push_str("        }\n");
        out.push_str("    }\n");
    }

    fn emit_accessors(&self, out: &mut String) {
        let mut first = true;
        for (name, prop) in sorted_properties(&self.naming) {
            if !first {
                out.push('\n');
            }
            first = false;
            let ty = rust_type(prop.semantic, prop.nullable);
            if is_copy_type(prop.semantic) {
                out.push_str(&format!("    pub fn {name}(&self) -> {ty} {{\n"));
                out.push_str(&format!("        self.{name}\n"));
            } else {
                out.push_str(&format!("    pub fn {name}(&self) -> {ty} {{\n"));
                out.push_str(&format!("        self.{name}.clone()\n"));
            }
            out.push_str("    }\n");
            out.push('\n');
            out.push_str(&format!(
                "    pub fn set_{name}(&mut self, value: {ty}) {{\n"
            ));
            out.push_str(&format!("        self.{name} = value;\n"));
            out.push_str("    }\n");
        }
    }

    fn emit_get_dispatch(&self, out: &mut String) {
        out.push_str("    /// Read a property by name; `None` for unknown properties.\n");
        out.push_str("    pub fn get(&self, property: &str) -> Option<Value> {\n");
        out.push_str("        match property {\n");
        for (name, _) in sorted_properties(&self.naming) {
            out.push_str(&format!(
                "            \"{name}\" => Some(Value::from(self.{name}())),\n"
            ));
        }
        out.push_str("            _ => None,\n");
        out.push_str("        }\n");
        out.push_str("    }\n");
    }

    fn emit_set_dispatch(&self, out: &mut String) {
        out.push_str("    /// Write a property by name; `false` for unknown properties or\n");
        out.push_str("    /// mismatched value types.\n");
        out.push_str("    pub fn set(&mut self, property: &str, value: Value) -> bool {\n");
        out.push_str("        match property {\n");
        for (name, _) in sorted_properties(&self.naming) {
            out.push_str(&format!("            \"{name}\" => match value.try_into() {{\n"));
            out.push_str("                Ok(value) => {\n");
            out.push_str(&format!("                    self.{name} = value;\n"));
            out.push_str("                    true\n");
            out.push_str("                }\n");
            out.push_str("                Err(_) => false,\n");
            out.push_str("            },\n");
        }
        out.push_str("            _ => false,\n");
        out.push_str("        }\n");
        out.push_str("    }\n");
    }

    fn emit_relations(&self, out: &mut String) {
        let mut first = true;
        for edge in &self.edges {
            if !first {
                out.push('\n');
            }
            first = false;
            if edge.is_parent() {
                self.emit_parent_relation(out, edge);
            } else {
                self.emit_child_relation(out, edge);
            }
        }
    }

    fn emit_parent_relation(&self, out: &mut String, edge: &RelationEdge) {
        let method = &edge.related.entity_variable_name;
        let entity = &edge.related.entity_name;
        let gateway = &edge.related.gateway_name;
        let column = &edge.column;
        let nullable = self
            .naming
            .properties
            .get(column)
            .is_some_and(|p| p.nullable);

        out.push_str(&format!(
            "    /// Parent `{}` row referenced by `{column}`.\n",
            edge.related_table
        ));
        out.push_str(&format!(
            "    pub fn {method}(&self, conn: &Connection) -> Result<Option<{entity}>, DbError> {{\n"
        ));
        if nullable {
            out.push_str(&format!("        match self.{column}() {{\n"));
            out.push_str(&format!(
                "            Some(key) => {gateway}::new(conn.clone()).find(key),\n"
            ));
            out.push_str("            None => Ok(None),\n");
            out.push_str("        }\n");
        } else {
            out.push_str(&format!(
                "        {gateway}::new(conn.clone()).find(self.{column}())\n"
            ));
        }
        out.push_str("    }\n");
    }

    fn emit_child_relation(&self, out: &mut String, edge: &RelationEdge) {
        let method = &edge.related_table;
        let entity = &edge.related.entity_name;
        let gateway = &edge.related.gateway_name;
        let column = &edge.column;

        out.push_str(&format!(
            "    /// Child `{method}` rows referencing this row via `{column}`.\n"
        ));
        out.push_str(&format!(
            "    pub fn {method}(&self, conn: &Connection) -> Result<Vec<{entity}>, DbError> {{\n"
        ));
        out.push_str(&format!(
            "        {gateway}::new(conn.clone()).find_by(\"{column}\", Value::from({}))\n",
            self.pk_getter()
        ));
        out.push_str("    }\n");
    }

    fn emit_persistence(&self, out: &mut String) {
        let naming = &self.naming;
        let entity = &naming.entity_name;
        let gateway = &naming.gateway_name;
        let pk = &naming.primary_key;
        let pk_ty = rust_type(naming.primary_key_property().semantic, false);

        out.push_str(&format!("    /// Load one `{entity}` by primary key.\n"));
        out.push_str(&format!(
            "    pub fn load(conn: &Connection, {pk}: {pk_ty}) -> Result<Option<{entity}>, DbError> {{\n"
        ));
        out.push_str(&format!(
            "        {gateway}::new(conn.clone()).find({pk})\n"
        ));
        out.push_str("    }\n");
        out.push('\n');
        out.push_str("    /// Insert or update this row through the gateway.\n");
        out.push_str(
            "    pub fn save(&mut self, conn: &Connection) -> Result<(), DbError> {\n",
        );
        out.push_str(&format!(
            "        {gateway}::new(conn.clone()).save(self)\n"
        ));
        out.push_str("    }\n");
        out.push('\n');
        out.push_str("    /// Delete this row by primary key.\n");
        out.push_str("    pub fn delete(&self, conn: &Connection) -> Result<(), DbError> {\n");
        out.push_str(&format!(
            "        {gateway}::new(conn.clone()).delete({})\n",
            self.pk_getter()
        ));
        out.push_str("    }\n");
    }
}

impl ArtifactGenerator for AbstractEntityGenerator {
    fn kind(&self) -> ArtifactKind {
        ArtifactKind::AbstractEntity
    }

    fn version(&self) -> Option<u32> {
        Some(ABSTRACT_ENTITY_ARTIFACT_VERSION)
    }

    fn declarations(&self, doc: &mut SourceDocument) {
        let ns = &self.namespace;
        let naming = &self.naming;

        // Deduplicated, sorted imports: own entity + gateway, every related
        // entity + gateway, and the runtime surface.
        let mut paths = BTreeSet::new();
        paths.insert(format!(
            "{ns}::entities::{}::{}",
            naming.entity_module(),
            naming.entity_name
        ));
        paths.insert(format!(
            "{ns}::gateways::{}::{}",
            naming.gateway_module(),
            naming.gateway_name
        ));
        for edge in &self.edges {
            paths.insert(format!(
                "{ns}::entities::{}::{}",
                edge.related.entity_module(),
                edge.related.entity_name
            ));
            paths.insert(format!(
                "{ns}::gateways::{}::{}",
                edge.related.gateway_module(),
                edge.related.gateway_name
            ));
        }
        paths.insert(format!("{ns}::runtime::{{Connection, DbError, Value}}"));

        for path in paths {
            doc.push_use(path);
        }
    }

    fn header(&self, doc: &mut SourceDocument) {
        standard_header(
            doc,
            self.kind(),
            &self.naming.entity_abstract_name,
            &self.naming.table,
            self.version(),
            &format!(
                "Fully regenerated on schema change. Custom code belongs in `{}`.",
                self.naming.entity_name
            ),
        );
    }

    fn class_decl(&self, doc: &mut SourceDocument) {
        let naming = &self.naming;
        let mut block = String::new();
        block.push_str(&format!(
            "/// Generated base carrying every column of `{}`.\n",
            naming.table
        ));
        block.push_str("///\n");
        block.push_str(&format!(
            "/// Custom behavior belongs in [`{}`]; this type is fully regenerated.\n",
            naming.entity_name
        ));
        block.push_str(&format!("pub struct {} {{\n", naming.entity_abstract_name));
        for (name, prop) in sorted_properties(naming) {
            block.push_str(&format!(
                "    {name}: {},\n",
                rust_type(prop.semantic, prop.nullable)
            ));
        }
        block.push_str("}");
        doc.push_block(block);
    }

    fn methods(&self, doc: &mut SourceDocument) {
        let mut block = format!("impl {} {{\n", self.naming.entity_abstract_name);
        self.emit_properties_const(&mut block);
        block.push('\n');
        self.emit_new(&mut block);
        block.push('\n');
        self.emit_accessors(&mut block);
        block.push('\n');
        self.emit_get_dispatch(&mut block);
        block.push('\n');
        self.emit_set_dispatch(&mut block);
        if !self.edges.is_empty() {
            block.push('\n');
            self.emit_relations(&mut block);
        }
        block.push('\n');
        self.emit_persistence(&mut block);
        block.push_str("}");
        doc.push_block(block);

        let mut default_block = format!("impl Default for {} {{\n", self.naming.entity_abstract_name);
        default_block.push_str("    fn default() -> Self {\n");
        default_block.push_str("        Self::new()\n");
        default_block.push_str("    }\n");
        default_block.push_str("}");
        doc.push_block(default_block);
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::NamingConfig;
    use crate::{naming, relations};
    use tablewright_schema::{ColumnMeta, MemoryCatalog, TableMetadata};

    fn shop_catalog() -> MemoryCatalog {
        MemoryCatalog::new()
            .with_table(
                TableMetadata::new("customers")
                    .with_column(ColumnMeta::new("id", "int(11)"))
                    .with_column(ColumnMeta::new("name", "varchar(255)").nullable())
                    .with_primary_key("id", true),
            )
            .with_table(
                TableMetadata::new("orders")
                    .with_column(ColumnMeta::new("id", "int(11)"))
                    .with_column(ColumnMeta::new("total", "decimal(10,2)").with_default("0.00"))
                    .with_column(ColumnMeta::new("fk_customers", "int(11)"))
                    .with_primary_key("id", true),
            )
    }

    fn generator_for(dir: &tempfile::TempDir, table: &str) -> AbstractEntityGenerator {
        let config = NamingConfig::new("store::db", dir.path());
        let catalog = shop_catalog();
        let meta = tablewright_schema::SchemaCatalog::table(&catalog, table).unwrap();
        let result = naming::resolve(&config, &meta).unwrap();
        let edges = relations::resolve_all(&config, &meta, &catalog).unwrap();
        AbstractEntityGenerator::new("store::db", result, edges)
    }

    #[test]
    fn test_abstract_structure() {
        let dir = tempfile::tempdir().unwrap();
        let out = generator_for(&dir, "orders").generate();

        assert!(out.contains("OrderAbstract — Abstract Entity for table `orders`"));
        assert!(out.contains(&format!("@VERSION {}", ABSTRACT_ENTITY_ARTIFACT_VERSION)));
        assert!(out.contains("pub struct OrderAbstract {"));
        assert!(out.contains("    total: f64,\n"));
        assert!(out.contains("    fk_customers: i64,\n"));
        assert!(out.contains("impl Default for OrderAbstract {"));
    }

    #[test]
    fn test_abstract_accessors_and_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let out = generator_for(&dir, "orders").generate();

        assert!(out.contains("pub fn total(&self) -> f64 {"));
        assert!(out.contains("pub fn set_total(&mut self, value: f64) {"));
        // Normalized column default flows into the constructor.
        assert!(out.contains("total: 0.0,"));
        assert!(
            out.contains("pub const PROPERTIES: &'static [&'static str] = &[\"fk_customers\", \"id\", \"total\"];")
        );
    }

    #[test]
    fn test_abstract_name_dispatch() {
        let dir = tempfile::tempdir().unwrap();
        let out = generator_for(&dir, "orders").generate();

        assert!(out.contains("pub fn get(&self, property: &str) -> Option<Value> {"));
        assert!(out.contains("\"total\" => Some(Value::from(self.total())),"));
        assert!(out.contains("pub fn set(&mut self, property: &str, value: Value) -> bool {"));
        assert!(out.contains("_ => false,"));
    }

    #[test]
    fn test_abstract_parent_relation() {
        let dir = tempfile::tempdir().unwrap();
        let out = generator_for(&dir, "orders").generate();

        assert!(out.contains("/// Parent `customers` row referenced by `fk_customers`."));
        assert!(out.contains(
            "pub fn customer(&self, conn: &Connection) -> Result<Option<Customer>, DbError> {"
        ));
        assert!(out.contains("CustomersTable::new(conn.clone()).find(self.fk_customers())"));
        assert!(out.contains("use store::db::gateways::customers_table::CustomersTable;"));
    }

    #[test]
    fn test_abstract_child_relation() {
        let dir = tempfile::tempdir().unwrap();
        let out = generator_for(&dir, "customers").generate();

        assert!(out.contains("/// Child `orders` rows referencing this row via `fk_customers`."));
        assert!(out.contains(
            "pub fn orders(&self, conn: &Connection) -> Result<Vec<Order>, DbError> {"
        ));
        assert!(out.contains(
            "OrdersTable::new(conn.clone()).find_by(\"fk_customers\", Value::from(self.id()))"
        ));
    }

    #[test]
    fn test_abstract_persistence_delegation() {
        let dir = tempfile::tempdir().unwrap();
        let out = generator_for(&dir, "orders").generate();

        assert!(out.contains(
            "pub fn load(conn: &Connection, id: i64) -> Result<Option<Order>, DbError> {"
        ));
        assert!(out.contains("OrdersTable::new(conn.clone()).save(self)"));
        assert!(out.contains("OrdersTable::new(conn.clone()).delete(self.id())"));
    }

    #[test]
    fn test_abstract_nullable_string_accessor() {
        let dir = tempfile::tempdir().unwrap();
        let out = generator_for(&dir, "customers").generate();

        assert!(out.contains("pub fn name(&self) -> Option<String> {"));
        assert!(out.contains("self.name.clone()"));
        assert!(out.contains("name: None,"));
    }

    #[test]
    fn test_abstract_is_deterministic() {
        let dir = tempfile::tempdir().unwrap();
        let a = generator_for(&dir, "orders").generate();
        let b = generator_for(&dir, "orders").generate();
        assert_eq!(a, b);
    }
}
