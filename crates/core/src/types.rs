//! Core types used throughout Tablewright
//!
//! This module contains the fundamental enums shared by the schema model and
//! the generation pipeline: the semantic column type, normalized default
//! values, artifact kinds, and the file-state protocol vocabulary.

use serde::{Deserialize, Serialize};

// ============================================================================
// SemanticType
// ============================================================================

/// Semantic classification of a column's raw SQL data type.
///
/// Raw types are classified by ordered, case-insensitive substring matches.
/// The order matters: `int` must win before `bit` (so `bigint` is an integer,
/// not a bit column), and `float` before `double`/`decimal`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SemanticType {
    /// Integer types (int, bigint, smallint, tinyint, …)
    Int,
    /// Single-precision floating point
    Float,
    /// Double-precision floating point
    Double,
    /// Fixed-point decimal
    Decimal,
    /// Bit/boolean
    Bool,
    /// JSON document or array column
    Json,
    /// Fallback: anything textual (varchar, text, date, enum, …)
    Str,
}

impl SemanticType {
    /// Classification priority: first matching substring wins.
    const RULES: &'static [(&'static str, SemanticType)] = &[
        ("int", SemanticType::Int),
        ("bit", SemanticType::Bool),
        ("float", SemanticType::Float),
        ("json", SemanticType::Json),
        ("double", SemanticType::Double),
        ("decimal", SemanticType::Decimal),
    ];

    /// Classify a raw SQL type string (e.g. `"bigint(20) unsigned"`).
    pub fn from_raw(raw: &str) -> Self {
        let lower = raw.to_lowercase();
        for (needle, semantic) in Self::RULES {
            if lower.contains(needle) {
                return *semantic;
            }
        }
        SemanticType::Str
    }

    /// Whether this type carries a numeric value.
    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            SemanticType::Int | SemanticType::Float | SemanticType::Double | SemanticType::Decimal
        )
    }
}

impl std::fmt::Display for SemanticType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            SemanticType::Int => "int",
            SemanticType::Float => "float",
            SemanticType::Double => "double",
            SemanticType::Decimal => "decimal",
            SemanticType::Bool => "bool",
            SemanticType::Json => "json",
            SemanticType::Str => "string",
        };
        write!(f, "{}", name)
    }
}

// ============================================================================
// DefaultValue
// ============================================================================

/// A column default after normalization.
///
/// Normalization collapses the timestamp-now sentinel to "no default" and
/// decodes bit literals into booleans or integers, so generators never see
/// raw engine syntax.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum DefaultValue {
    /// No usable default
    None,
    /// Integer default
    Int(i64),
    /// Floating-point default
    Float(f64),
    /// Boolean default (decoded from bit literals)
    Bool(bool),
    /// Textual default
    Text(String),
}

impl DefaultValue {
    /// Normalize a raw default expression for a column of the given semantic
    /// type.
    pub fn normalize(raw: Option<&str>, semantic: SemanticType) -> Self {
        let Some(raw) = raw else {
            return DefaultValue::None;
        };
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return DefaultValue::None;
        }

        // Timestamp-now sentinels carry no reproducible value.
        let upper = trimmed.to_uppercase();
        if upper.starts_with("CURRENT_TIMESTAMP") || upper == "NOW()" || upper == "NULL" {
            return DefaultValue::None;
        }

        // Bit literals: b'1' / b'0'
        let unquoted = strip_bit_literal(trimmed).unwrap_or_else(|| strip_quotes(trimmed));

        match semantic {
            SemanticType::Bool => match unquoted {
                "0" | "false" => DefaultValue::Bool(false),
                "1" | "true" => DefaultValue::Bool(true),
                other => DefaultValue::Text(other.to_string()),
            },
            SemanticType::Int => unquoted
                .parse::<i64>()
                .map(DefaultValue::Int)
                .unwrap_or_else(|_| DefaultValue::Text(unquoted.to_string())),
            SemanticType::Float | SemanticType::Double | SemanticType::Decimal => unquoted
                .parse::<f64>()
                .map(DefaultValue::Float)
                .unwrap_or_else(|_| DefaultValue::Text(unquoted.to_string())),
            SemanticType::Json | SemanticType::Str => DefaultValue::Text(unquoted.to_string()),
        }
    }

    /// Whether a default value is present.
    pub fn is_some(&self) -> bool {
        !matches!(self, DefaultValue::None)
    }
}

/// Extract the payload of a `b'…'` bit literal, if the input is one.
fn strip_bit_literal(raw: &str) -> Option<&str> {
    raw.strip_prefix("b'")
        .or_else(|| raw.strip_prefix("B'"))
        .and_then(|rest| rest.strip_suffix('\''))
}

/// Strip one matching pair of surrounding single quotes.
fn strip_quotes(raw: &str) -> &str {
    raw.strip_prefix('\'')
        .and_then(|rest| rest.strip_suffix('\''))
        .unwrap_or(raw)
}

// ============================================================================
// ArtifactKind
// ============================================================================

/// The three generated artifact kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArtifactKind {
    /// Table gateway: one type owning a single table's CRUD operations
    Gateway,
    /// Abstract entity: fully regenerated base carrying properties and
    /// relation traversal
    AbstractEntity,
    /// Concrete entity: hand-editable extension, written once and never
    /// overwritten
    Entity,
}

impl ArtifactKind {
    /// All kinds, in generation order.
    pub fn all() -> &'static [ArtifactKind] {
        &[
            ArtifactKind::Gateway,
            ArtifactKind::AbstractEntity,
            ArtifactKind::Entity,
        ]
    }

    /// Human-readable name, as embedded in generated file headers.
    pub fn display_name(&self) -> &'static str {
        match self {
            ArtifactKind::Gateway => "Gateway",
            ArtifactKind::AbstractEntity => "Abstract Entity",
            ArtifactKind::Entity => "Entity",
        }
    }

    /// Whether files of this kind carry a version marker and participate in
    /// staleness checking. Entity files are discovered, never version-checked.
    pub fn is_versioned(&self) -> bool {
        !matches!(self, ArtifactKind::Entity)
    }
}

impl std::fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

// ============================================================================
// FileState
// ============================================================================

/// State of a generated file on disk relative to the current generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileState {
    /// No file exists at the target path
    Missing,
    /// A file exists but its version marker does not match the generator
    Outdated,
    /// The file is present and current
    Ok,
}

impl std::fmt::Display for FileState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            FileState::Missing => "missing",
            FileState::Outdated => "outdated",
            FileState::Ok => "ok",
        };
        write!(f, "{}", name)
    }
}

// ============================================================================
// WriteOutcome
// ============================================================================

/// Result of a policy-governed artifact write.
///
/// `Skipped` (declined by policy) is distinct from `Failed` (attempted and
/// lost to IO/permissions); callers iterating many tables need to tell the
/// two apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WriteOutcome {
    /// The artifact was regenerated and written
    Written,
    /// Policy declined the write (e.g. entity already exists)
    Skipped,
    /// The write was attempted and failed
    Failed,
}

impl WriteOutcome {
    /// Tri-state report: `Some(true)` written, `Some(false)` failed,
    /// `None` skipped by policy.
    pub fn report(&self) -> Option<bool> {
        match self {
            WriteOutcome::Written => Some(true),
            WriteOutcome::Failed => Some(false),
            WriteOutcome::Skipped => None,
        }
    }
}

impl std::fmt::Display for WriteOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            WriteOutcome::Written => "written",
            WriteOutcome::Skipped => "skipped",
            WriteOutcome::Failed => "failed",
        };
        write!(f, "{}", name)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    // ── SemanticType classification ──────────────────────────────────────

    #[test]
    fn test_semantic_type_int_family() {
        assert_eq!(SemanticType::from_raw("int(11)"), SemanticType::Int);
        assert_eq!(SemanticType::from_raw("BIGINT(20) unsigned"), SemanticType::Int);
        assert_eq!(SemanticType::from_raw("smallint"), SemanticType::Int);
        assert_eq!(SemanticType::from_raw("tinyint(1)"), SemanticType::Int);
    }

    #[test]
    fn test_semantic_type_order_int_beats_bit() {
        // "bigint" contains both "int" and "bit" fragments in other engines'
        // spellings; the int rule must win by priority.
        assert_eq!(SemanticType::from_raw("bigint"), SemanticType::Int);
        assert_eq!(SemanticType::from_raw("bit(1)"), SemanticType::Bool);
    }

    #[test]
    fn test_semantic_type_float_family() {
        assert_eq!(SemanticType::from_raw("float"), SemanticType::Float);
        assert_eq!(SemanticType::from_raw("double precision"), SemanticType::Double);
        assert_eq!(SemanticType::from_raw("decimal(10,2)"), SemanticType::Decimal);
    }

    #[test]
    fn test_semantic_type_json_and_fallback() {
        assert_eq!(SemanticType::from_raw("json"), SemanticType::Json);
        assert_eq!(SemanticType::from_raw("jsonb"), SemanticType::Json);
        assert_eq!(SemanticType::from_raw("varchar(255)"), SemanticType::Str);
        assert_eq!(SemanticType::from_raw("datetime"), SemanticType::Str);
        assert_eq!(SemanticType::from_raw("enum('a','b')"), SemanticType::Str);
    }

    #[test]
    fn test_semantic_type_is_numeric() {
        assert!(SemanticType::Int.is_numeric());
        assert!(SemanticType::Decimal.is_numeric());
        assert!(!SemanticType::Bool.is_numeric());
        assert!(!SemanticType::Str.is_numeric());
    }

    // ── DefaultValue normalization ───────────────────────────────────────

    #[test]
    fn test_default_none_passthrough() {
        assert_eq!(
            DefaultValue::normalize(None, SemanticType::Int),
            DefaultValue::None
        );
        assert_eq!(
            DefaultValue::normalize(Some("  "), SemanticType::Str),
            DefaultValue::None
        );
    }

    #[test]
    fn test_default_timestamp_sentinel_collapses() {
        assert_eq!(
            DefaultValue::normalize(Some("CURRENT_TIMESTAMP"), SemanticType::Str),
            DefaultValue::None
        );
        assert_eq!(
            DefaultValue::normalize(Some("current_timestamp()"), SemanticType::Str),
            DefaultValue::None
        );
        assert_eq!(
            DefaultValue::normalize(Some("now()"), SemanticType::Str),
            DefaultValue::None
        );
    }

    #[test]
    fn test_default_bit_literal_decode() {
        assert_eq!(
            DefaultValue::normalize(Some("b'1'"), SemanticType::Bool),
            DefaultValue::Bool(true)
        );
        assert_eq!(
            DefaultValue::normalize(Some("b'0'"), SemanticType::Bool),
            DefaultValue::Bool(false)
        );
        assert_eq!(
            DefaultValue::normalize(Some("b'1'"), SemanticType::Int),
            DefaultValue::Int(1)
        );
    }

    #[test]
    fn test_default_numeric_parse() {
        assert_eq!(
            DefaultValue::normalize(Some("42"), SemanticType::Int),
            DefaultValue::Int(42)
        );
        assert_eq!(
            DefaultValue::normalize(Some("0.00"), SemanticType::Decimal),
            DefaultValue::Float(0.0)
        );
    }

    #[test]
    fn test_default_text_unquoted() {
        assert_eq!(
            DefaultValue::normalize(Some("'pending'"), SemanticType::Str),
            DefaultValue::Text("pending".to_string())
        );
        assert_eq!(
            DefaultValue::normalize(Some("pending"), SemanticType::Str),
            DefaultValue::Text("pending".to_string())
        );
    }

    // ── ArtifactKind ─────────────────────────────────────────────────────

    #[test]
    fn test_artifact_kind_versioning() {
        assert!(ArtifactKind::Gateway.is_versioned());
        assert!(ArtifactKind::AbstractEntity.is_versioned());
        assert!(!ArtifactKind::Entity.is_versioned());
    }

    #[test]
    fn test_artifact_kind_all_order() {
        assert_eq!(
            ArtifactKind::all(),
            &[
                ArtifactKind::Gateway,
                ArtifactKind::AbstractEntity,
                ArtifactKind::Entity
            ]
        );
    }

    // ── WriteOutcome ─────────────────────────────────────────────────────

    #[test]
    fn test_write_outcome_report() {
        assert_eq!(WriteOutcome::Written.report(), Some(true));
        assert_eq!(WriteOutcome::Failed.report(), Some(false));
        assert_eq!(WriteOutcome::Skipped.report(), None);
    }
}
