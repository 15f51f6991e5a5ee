//! English singularization
//!
//! Table names are conventionally plural (`orders`, `categories`) while
//! entity types are singular (`Order`, `Category`). [`singular_of`] performs
//! the plural→singular conversion with three layers, checked in priority
//! order:
//!
//! 1. an uncountable-word list (words with no distinct singular),
//! 2. an irregular-form table (case-insensitive suffix match, preserving the
//!    original leading-character case),
//! 3. an ordered suffix-rewrite rule list where the *first* matching rule
//!    wins — specific endings like `-ies` and `-ves` must not be preempted
//!    by the bare trailing-`s` rule.
//!
//! Only forward plural→singular conversion is specified; feeding an
//! already-singular word back in is not guaranteed to be a no-op.
//! Configuration gating (global disable, per-table ignore list) lives in
//! [`NamingConfig`](crate::config::NamingConfig), not here.

// ============================================================================
// Word tables
// ============================================================================

/// Words whose plural equals their singular; matched as a case-insensitive
/// suffix so compound names like `StockSheep` pass through too.
const UNCOUNTABLE: &[&str] = &[
    "deer",
    "equipment",
    "fish",
    "information",
    "money",
    "news",
    "rice",
    "series",
    "sheep",
    "species",
];

/// Irregular plural → singular forms, matched as a case-insensitive suffix.
const IRREGULAR: &[(&str, &str)] = &[
    ("children", "child"),
    ("feet", "foot"),
    ("geese", "goose"),
    ("men", "man"),
    ("mice", "mouse"),
    ("oxen", "ox"),
    ("people", "person"),
    ("teeth", "tooth"),
    ("women", "woman"),
];

/// Ordered suffix-rewrite rules; the first matching rule is applied.
const RULES: &[(&str, &str)] = &[
    ("sses", "ss"), // classes → class, addresses → address
    ("ies", "y"),   // categories → category
    ("ves", "fe"),  // knives → knife
    ("xes", "x"),   // boxes → box
    ("ches", "ch"), // matches → match
    ("shes", "sh"), // dishes → dish
    ("oes", "o"),   // heroes → hero
    ("uses", "us"), // buses → bus, statuses → status
    ("ss", "ss"),   // bare "ss" is not a plural marker
    ("s", ""),      // orders → order
];

// ============================================================================
// singular_of
// ============================================================================

/// Convert an English plural or collective noun to its singular form.
///
/// Pure function; identical input always yields identical output. Empty
/// input returns empty, and a word matching no table or rule is returned
/// unchanged.
pub fn singular_of(word: &str) -> String {
    if word.is_empty() {
        return String::new();
    }
    let lower = word.to_lowercase();

    for uncountable in UNCOUNTABLE {
        if lower.ends_with(uncountable) {
            return word.to_string();
        }
    }

    for (plural, singular) in IRREGULAR {
        if lower.ends_with(plural) {
            let start = word.len() - plural.len();
            return format!(
                "{}{}",
                &word[..start],
                match_leading_case(&word[start..], singular)
            );
        }
    }

    for (suffix, replacement) in RULES {
        if lower.ends_with(suffix) {
            let stem = &word[..word.len() - suffix.len()];
            return format!("{}{}", stem, replacement);
        }
    }

    word.to_string()
}

/// Apply the leading-character case of `original` to `replacement`.
fn match_leading_case(original: &str, replacement: &str) -> String {
    let leading_upper = original
        .chars()
        .next()
        .is_some_and(|c| c.is_uppercase());
    if leading_upper {
        let mut chars = replacement.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
            None => String::new(),
        }
    } else {
        replacement.to_string()
    }
}

// ============================================================================
// Tests
// ============================================================================
