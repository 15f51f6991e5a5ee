//! Gateway generation
//!
//! Emits the table-gateway artifact: one type owning CRUD access to a single
//! table through the hosting application's `runtime` module. The save method
//! implements upsert-by-existence — an unset sequential key inserts and
//! reads back the generated key; a set key updates only changed columns; a
//! set sequential key with no matching row is an error rather than a silent
//! insert.

use tablewright_core::{ArtifactKind, SemanticType};

use crate::doc::{SourceDocument, rust_type};
use crate::generate::{
    ArtifactGenerator, GATEWAY_ARTIFACT_VERSION, data_properties, sorted_properties,
    standard_header,
};
use crate::naming::NamingResult;

// ============================================================================
// GatewayGenerator
// ============================================================================

/// Generator for the table-gateway artifact.
#[derive(Debug, Clone)]
pub struct GatewayGenerator {
    namespace: String,
    naming: NamingResult,
}

impl GatewayGenerator {
    /// Create a gateway generator for one resolved table.
    pub fn new(namespace: impl Into<String>, naming: NamingResult) -> Self {
        Self {
            namespace: namespace.into(),
            naming,
        }
    }

    fn pk(&self) -> &str {
        &self.naming.primary_key
    }

    fn pk_type(&self) -> String {
        rust_type(self.naming.primary_key_property().semantic, false)
    }

    /// Whether the unset-key insert branch applies: a sequential integer
    /// key owned by the database.
    fn sequential_int_key(&self) -> bool {
        self.naming.primary_key_sequential
            && self.naming.primary_key_property().semantic == SemanticType::Int
    }

    fn emit_new(&self, out: &mut String) {
        out.push_str("    /// Bind a gateway to a connection.\n");
        out.push_str("    pub fn new(conn: Connection) -> Self {\n");
        out.push_str("        Self { conn }\n");
        out.push_str("    }\n");
    }

    fn emit_find(&self, out: &mut String) {
        let pk = self.pk();
        let entity = &self.naming.entity_name;
        let table = &self.naming.table;
        out.push_str("    /// Fetch one row by primary key.\n");
        out.push_str(&format!(
            "    pub fn find(&self, {pk}: {}) -> Result<Option<{entity}>, DbError> {{\n",
            self.pk_type()
        ));
        out.push_str(&format!(
            "        match self.conn.select_one(\"{table}\", \"{pk}\", Value::from({pk}))? {{\n"
        ));
        out.push_str(&format!(
            "            Some(row) => Ok(Some({entity}::from_base(Self::hydrate(&row)?))),\n"
        ));
        out.push_str("            None => Ok(None),\n");
        out.push_str("        }\n");
        out.push_str("    }\n");
    }

    fn emit_find_by(&self, out: &mut String) {
        let entity = &self.naming.entity_name;
        let table = &self.naming.table;
        out.push_str("    /// Fetch every row matching `column = value`.\n");
        out.push_str(&format!(
            "    pub fn find_by(&self, column: &str, value: Value) -> Result<Vec<{entity}>, DbError> {{\n"
        ));
        out.push_str(&format!(
            "        let rows = self.conn.select_where(\"{table}\", column, value)?;\n"
        ));
        out.push_str("        rows.iter()\n");
        out.push_str(&format!(
            "            .map(|row| Ok({entity}::from_base(Self::hydrate(row)?)))\n"
        ));
        out.push_str("            .collect()\n");
        out.push_str("    }\n");
    }

    fn emit_save(&self, out: &mut String) {
        let pk = self.pk();
        let table = &self.naming.table;
        let base = &self.naming.entity_abstract_name;

        out.push_str("    /// Insert or update by primary-key existence.\n");
        out.push_str("    ///\n");
        if self.sequential_int_key() {
            out.push_str(
                "    /// An unset key inserts and reads back the generated key. A set key\n",
            );
            out.push_str(
                "    /// updates only the columns whose values changed; a set key without\n",
            );
            out.push_str("    /// a matching row is a stale-key error.\n");
        } else {
            out.push_str(
                "    /// A key without a matching row inserts; an existing row is updated\n",
            );
            out.push_str("    /// on only the columns whose values changed.\n");
        }
        out.push_str(&format!(
            "    pub fn save(&self, entity: &mut {base}) -> Result<(), DbError> {{\n"
        ));

        if self.sequential_int_key() {
            out.push_str(&format!("        if entity.{pk}() == 0 {{\n"));
            self.emit_insert_values(out, 12, false);
            out.push_str(&format!(
                "            self.conn.insert(\"{table}\", &values)?;\n"
            ));
            out.push_str(&format!(
                "            entity.set_{pk}(self.conn.last_insert_id()?);\n"
            ));
            out.push_str("            return Ok(());\n");
            out.push_str("        }\n");
            out.push_str(&format!(
                "        let current = match self.conn.select_one(\"{table}\", \"{pk}\", Value::from(entity.{pk}()))? {{\n"
            ));
            out.push_str("            Some(row) => Self::hydrate(&row)?,\n");
            out.push_str(&format!(
                "            None => return Err(DbError::stale_key(\"{table}\", Value::from(entity.{pk}()))),\n"
            ));
            out.push_str("        };\n");
            self.emit_diff_update(out, 8);
        } else {
            out.push_str(&format!(
                "        match self.conn.select_one(\"{table}\", \"{pk}\", Value::from(entity.{pk}()))? {{\n"
            ));
            out.push_str("            Some(row) => {\n");
            out.push_str("                let current = Self::hydrate(&row)?;\n");
            self.emit_diff_update(out, 16);
            out.push_str("            }\n");
            out.push_str("            None => {\n");
            self.emit_insert_values(out, 16, true);
            out.push_str(&format!(
                "                self.conn.insert(\"{table}\", &values)?;\n"
            ));
            out.push_str("            }\n");
            out.push_str("        }\n");
        }
        out.push_str("        Ok(())\n");
        out.push_str("    }\n");
    }

    /// The `values` vector for an insert; `with_key` includes the primary
    /// key (caller-supplied keys only).
    fn emit_insert_values(&self, out: &mut String, indent: usize, with_key: bool) {
        let pad = " ".repeat(indent);
        out.push_str(&format!("{pad}let values: Vec<(&str, Value)> = vec![\n"));
        for (name, _) in sorted_properties(&self.naming) {
            if !with_key && name == self.pk() {
                continue;
            }
            out.push_str(&format!(
                "{pad}    (\"{name}\", Value::from(entity.{name}())),\n"
            ));
        }
        out.push_str(&format!("{pad}];\n"));
    }

    /// The diff-and-update sequence against a hydrated `current` row.
    fn emit_diff_update(&self, out: &mut String, indent: usize) {
        let pad = " ".repeat(indent);
        let table = &self.naming.table;
        let pk = self.pk();
        out.push_str(&format!(
            "{pad}let mut changes: Vec<(&str, Value)> = Vec::new();\n"
        ));
        for (name, _) in data_properties(&self.naming) {
            out.push_str(&format!("{pad}if entity.{name}() != current.{name}() {{\n"));
            out.push_str(&format!(
                "{pad}    changes.push((\"{name}\", Value::from(entity.{name}())));\n"
            ));
            out.push_str(&format!("{pad}}}\n"));
        }
        out.push_str(&format!("{pad}if !changes.is_empty() {{\n"));
        out.push_str(&format!(
            "{pad}    self.conn.update(\"{table}\", \"{pk}\", Value::from(entity.{pk}()), &changes)?;\n"
        ));
        out.push_str(&format!("{pad}}}\n"));
    }

    fn emit_delete(&self, out: &mut String) {
        let pk = self.pk();
        let table = &self.naming.table;
        out.push_str("    /// Delete by primary key.\n");
        out.push_str(&format!(
            "    pub fn delete(&self, {pk}: {}) -> Result<(), DbError> {{\n",
            self.pk_type()
        ));
        out.push_str(&format!(
            "        self.conn.delete(\"{table}\", \"{pk}\", Value::from({pk}))\n"
        ));
        out.push_str("    }\n");
    }

    fn emit_hydrate(&self, out: &mut String) {
        let base = &self.naming.entity_abstract_name;
        out.push_str("    /// Build the abstract base from a database row.\n");
        out.push_str(&format!(
            "    fn hydrate(row: &Row) -> Result<{base}, DbError> {{\n"
        ));
        out.push_str(&format!("        let mut base = {base}::new();\n"));
        for (name, _) in sorted_properties(&self.naming) {
            out.push_str(&format!(
                "        base.set_{name}(row.get(\"{name}\")?);\n"
            ));
        }
        out.push_str("        Ok(base)\n");
        out.push_str("    }\n");
    }
}

impl ArtifactGenerator for GatewayGenerator {
    fn kind(&self) -> ArtifactKind {
        ArtifactKind::Gateway
    }

    fn version(&self) -> Option<u32> {
        Some(GATEWAY_ARTIFACT_VERSION)
    }

    fn declarations(&self, doc: &mut SourceDocument) {
        let ns = &self.namespace;
        let naming = &self.naming;
        doc.push_use(format!(
            "{ns}::entities::{}::{}",
            naming.entity_module(),
            naming.entity_name
        ));
        doc.push_use(format!(
            "{ns}::entities::{}::{}",
            naming.entity_abstract_module(),
            naming.entity_abstract_name
        ));
        doc.push_use(format!(
            "{ns}::runtime::{{Connection, DbError, Row, Value}}"
        ));
    }

    fn header(&self, doc: &mut SourceDocument) {
        standard_header(
            doc,
            self.kind(),
            &self.naming.gateway_name,
            &self.naming.table,
            self.version(),
            "Regenerated on schema change; do not hand-edit.",
        );
    }

    fn class_decl(&self, doc: &mut SourceDocument) {
        let mut block = String::new();
        block.push_str(&format!(
            "/// Table gateway owning CRUD access to `{}`.\n",
            self.naming.table
        ));
        block.push_str(&format!("pub struct {} {{\n", self.naming.gateway_name));
        block.push_str("    conn: Connection,\n");
        block.push_str("}");
        doc.push_block(block);
    }

    fn methods(&self, doc: &mut SourceDocument) {
        let mut block = format!("impl {} {{\n", self.naming.gateway_name);
        self.emit_new(&mut block);
        block.push('\n');
        self.emit_find(&mut block);
        block.push('\n');
        self.emit_find_by(&mut block);
        block.push('\n');
        self.emit_save(&mut block);
        block.push('\n');
        self.emit_delete(&mut block);
        block.push('\n');
        self.emit_hydrate(&mut block);
        block.push_str("}");
        doc.push_block(block);
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::NamingConfig;
    use crate::naming;
    use tablewright_schema::{ColumnMeta, TableMetadata};

    fn orders_naming(dir: &tempfile::TempDir) -> NamingResult {
        let table = TableMetadata::new("orders")
            .with_column(ColumnMeta::new("id", "int(11)"))
            .with_column(ColumnMeta::new("total", "decimal(10,2)"))
            .with_column(ColumnMeta::new("fk_customers", "int(11)"))
            .with_primary_key("id", true);
        naming::resolve(&NamingConfig::new("store::db", dir.path()), &table).unwrap()
    }

    #[test]
    fn test_gateway_structure() {
        let dir = tempfile::tempdir().unwrap();
        let out = GatewayGenerator::new("store::db", orders_naming(&dir)).generate();

        assert!(out.contains("OrdersTable — Gateway for table `orders`"));
        assert!(out.contains(&format!("@VERSION {}", GATEWAY_ARTIFACT_VERSION)));
        assert!(out.contains("use store::db::entities::order::Order;"));
        assert!(out.contains("pub struct OrdersTable {"));
        assert!(out.contains("pub fn find(&self, id: i64) -> Result<Option<Order>, DbError>"));
        assert!(out.contains("pub fn find_by(&self, column: &str, value: Value)"));
        assert!(out.contains("pub fn delete(&self, id: i64)"));
    }

    #[test]
    fn test_gateway_sequential_save() {
        let dir = tempfile::tempdir().unwrap();
        let out = GatewayGenerator::new("store::db", orders_naming(&dir)).generate();

        // Unset key inserts and reads back the generated key.
        assert!(out.contains("if entity.id() == 0 {"));
        assert!(out.contains("entity.set_id(self.conn.last_insert_id()?);"));
        // Set key without a row is an error, not an insert.
        assert!(out.contains("DbError::stale_key(\"orders\""));
        // Diff-and-update only changed columns; the key is never diffed.
        assert!(out.contains("if entity.total() != current.total() {"));
        assert!(!out.contains("if entity.id() != current.id()"));
        // Sequential inserts never carry the key column.
        assert!(!out.contains("(\"id\", Value::from(entity.id())),"));
    }

    #[test]
    fn test_gateway_caller_supplied_key_save() {
        let dir = tempfile::tempdir().unwrap();
        let table = TableMetadata::new("countries")
            .with_column(ColumnMeta::new("code", "varchar(2)"))
            .with_column(ColumnMeta::new("name", "varchar(255)"))
            .with_primary_key("code", false);
        let naming =
            naming::resolve(&NamingConfig::new("store::db", dir.path()), &table).unwrap();
        let out = GatewayGenerator::new("store::db", naming).generate();

        // A caller-supplied key falls through to insert, key included.
        assert!(out.contains("pub fn find(&self, code: String)"));
        assert!(out.contains("(\"code\", Value::from(entity.code())),"));
        assert!(!out.contains("last_insert_id"));
        assert!(!out.contains("stale_key"));
    }

    #[test]
    fn test_gateway_is_deterministic() {
        let dir = tempfile::tempdir().unwrap();
        let naming = orders_naming(&dir);
        let a = GatewayGenerator::new("store::db", naming.clone()).generate();
        let b = GatewayGenerator::new("store::db", naming).generate();
        assert_eq!(a, b);
    }
}
