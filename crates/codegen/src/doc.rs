//! Source document model and rendering boundary
//!
//! Generators assemble a [`SourceDocument`] out of three sections — header
//! comment lines, import declarations, and code blocks — and every piece of
//! target-language syntax (type names, literals, the version-marker comment
//! format) lives here or in the emission helpers below. The naming,
//! relationship, and generator layers stay language-agnostic: retargeting
//! the output language means replacing this boundary, nothing else.

use tablewright_core::{DefaultValue, SemanticType};

// ============================================================================
// Version marker
// ============================================================================

/// The token prefix embedded in versioned artifact headers. This exact
/// spelling is the compatibility contract with previously generated files;
/// changing it invalidates staleness detection for all of them.
pub const VERSION_TOKEN: &str = "@VERSION";

/// Render the version-marker line content (without comment syntax).
pub fn version_marker(version: u32) -> String {
    format!("{} {}", VERSION_TOKEN, version)
}

// ============================================================================
// SourceDocument
// ============================================================================

/// An artifact under construction: header comment, imports, code blocks.
#[derive(Debug, Default)]
pub struct SourceDocument {
    header: Vec<String>,
    uses: Vec<String>,
    blocks: Vec<String>,
}

impl SourceDocument {
    /// Create an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a header comment line (comment syntax is added at render
    /// time).
    pub fn push_header(&mut self, line: impl Into<String>) {
        self.header.push(line.into());
    }

    /// Append a `use` declaration by path (e.g. `"std::ops::Deref"`).
    pub fn push_use(&mut self, path: impl Into<String>) {
        self.uses.push(path.into());
    }

    /// Append a rendered code block. Blocks are separated by blank lines.
    pub fn push_block(&mut self, block: impl Into<String>) {
        self.blocks.push(block.into());
    }

    /// Render the final source text.
    pub fn render(&self) -> String {
        let mut out = String::with_capacity(4096);

        if !self.header.is_empty() {
            out.push_str(&rule_line());
            for line in &self.header {
                if line.is_empty() {
                    out.push_str("//\n");
                } else {
                    out.push_str("// ");
                    out.push_str(line);
                    out.push('\n');
                }
            }
            out.push_str(&rule_line());
            out.push('\n');
        }

        if !self.uses.is_empty() {
            for path in &self.uses {
                out.push_str("use ");
                out.push_str(path);
                out.push_str(";\n");
            }
            out.push('\n');
        }

        for (i, block) in self.blocks.iter().enumerate() {
            if i > 0 {
                out.push('\n');
            }
            out.push_str(block.trim_end());
            out.push('\n');
        }

        out
    }
}

fn rule_line() -> String {
    format!("// {}\n", "=".repeat(76))
}

// ============================================================================
// Target-language emission helpers
// ============================================================================

/// The emitted Rust type for a property.
pub fn rust_type(semantic: SemanticType, nullable: bool) -> String {
    let base = match semantic {
        SemanticType::Int => "i64",
        SemanticType::Float => "f32",
        SemanticType::Double => "f64",
        SemanticType::Decimal => "f64",
        SemanticType::Bool => "bool",
        SemanticType::Json => "String",
        SemanticType::Str => "String",
    };
    if nullable {
        format!("Option<{}>", base)
    } else {
        base.to_string()
    }
}

/// Whether values of the emitted type are `Copy` (affects accessor
/// emission: copy types return by value, the rest return clones).
pub fn is_copy_type(semantic: SemanticType) -> bool {
    !matches!(semantic, SemanticType::Json | SemanticType::Str)
}

/// The initializer literal for a property in a generated constructor.
pub fn initializer(semantic: SemanticType, nullable: bool, default: &DefaultValue) -> String {
    if nullable {
        return match default {
            DefaultValue::None => "None".to_string(),
            other => format!("Some({})", bare_literal(semantic, other)),
        };
    }
    match default {
        DefaultValue::None => zero_literal(semantic).to_string(),
        other => bare_literal(semantic, other),
    }
}

/// The zero/empty literal for a non-nullable property with no default.
fn zero_literal(semantic: SemanticType) -> &'static str {
    match semantic {
        SemanticType::Int => "0",
        SemanticType::Float => "0.0",
        SemanticType::Double => "0.0",
        SemanticType::Decimal => "0.0",
        SemanticType::Bool => "false",
        SemanticType::Json | SemanticType::Str => "String::new()",
    }
}

/// Render a normalized default as a Rust literal of the property's type.
fn bare_literal(semantic: SemanticType, default: &DefaultValue) -> String {
    match default {
        DefaultValue::None => zero_literal(semantic).to_string(),
        DefaultValue::Int(v) => match semantic {
            SemanticType::Float | SemanticType::Double | SemanticType::Decimal => {
                format!("{:?}", *v as f64)
            }
            SemanticType::Bool => (*v != 0).to_string(),
            _ => v.to_string(),
        },
        DefaultValue::Float(v) => format!("{:?}", v),
        DefaultValue::Bool(v) => v.to_string(),
        DefaultValue::Text(v) => format!("{}.to_string()", quoted(v)),
    }
}

/// A quoted Rust string literal with escapes.
pub fn quoted(text: &str) -> String {
    format!("{:?}", text)
}

// ============================================================================
// Tests
// ============================================================================
