//! Typed view of the compiler's keyword/type taxonomy (`syntax-data.json`).
//!
//! The taxonomy is authored by the compiler project and is the single source of truth for reserved words and
//! builtin type names. This module only describes its shape; reading it from disk lives in the `hew_grammar`
//! crate.
//!
//! ## Notes
//! - Categories are kept as name → list maps so the scope table can reference them by name and report a
//!   precise error when a category it relies on disappears upstream.
//! - Category disjointness is an upstream invariant and is not checked here.
//!
//! ## Examples
//! ```rust
//! use hew_vocab::taxonomy::Taxonomy;
//!
//! let raw = r#"{
//!     "version": "0.4.0",
//!     "keywords": { "control_flow": ["if", "else"] },
//!     "types": { "integer": ["i32"] },
//!     "contextual_identifiers": { "description": "metadata", "ready": { "description": "select arm" } },
//!     "all_keywords": ["if", "else"]
//! }"#;
//! let taxonomy: Taxonomy = serde_json::from_str(raw).unwrap();
//! assert_eq!(taxonomy.keyword_category("control_flow"), Some(&["if".to_string(), "else".to_string()][..]));
//! assert_eq!(taxonomy.version.to_string(), "0.4.0");
//! ```

use std::collections::BTreeMap;
use std::fmt;

use serde::Deserialize;

/// The full taxonomy record.
///
/// All fields are required; a taxonomy missing any of them is rejected at load time.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Taxonomy {
    pub version: TaxonomyVersion,
    /// Keyword categories (e.g. `control_flow`, `declarations`, `wire`, `reserved_unused`).
    pub keywords: BTreeMap<String, Vec<String>>,
    /// Type-name categories (e.g. `integer`, `float`, `collections`).
    pub types: BTreeMap<String, Vec<String>>,
    /// Names that only carry meaning in specific parser contexts.
    pub contextual_identifiers: BTreeMap<String, ContextualEntry>,
    /// Authoritative flat keyword list; expected to be the union of all keyword categories.
    pub all_keywords: Vec<String>,
}

impl Taxonomy {
    /// Members of a keyword category, if the taxonomy declares it.
    pub fn keyword_category(&self, name: &str) -> Option<&[String]> {
        self.keywords.get(name).map(Vec::as_slice)
    }

    /// Members of a type category, if the taxonomy declares it.
    pub fn type_category(&self, name: &str) -> Option<&[String]> {
        self.types.get(name).map(Vec::as_slice)
    }

    /// Keys of the contextual-identifier map, in key order.
    ///
    /// ## Notes
    /// - This includes metadata keys such as `description`; scope rules decide what to exclude.
    pub fn contextual_names(&self) -> impl Iterator<Item = &str> {
        self.contextual_identifiers.keys().map(String::as_str)
    }
}

/// Version marker of a taxonomy. Producers have emitted both `"0.4.0"` and bare numbers.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum TaxonomyVersion {
    Text(String),
    Integer(u64),
    Float(f64),
}

impl fmt::Display for TaxonomyVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaxonomyVersion::Text(s) => f.write_str(s),
            TaxonomyVersion::Integer(n) => write!(f, "{n}"),
            TaxonomyVersion::Float(n) => write!(f, "{n}"),
        }
    }
}

/// Value side of the contextual-identifier map.
///
/// Real entries are objects carrying at least a `description`; the map also holds a top-level
/// `"description": "..."` string documenting the map itself.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ContextualEntry {
    Detailed {
        #[serde(default)]
        description: Option<String>,
    },
    Note(String),
}

impl ContextualEntry {
    pub fn description(&self) -> Option<&str> {
        match self {
            ContextualEntry::Detailed { description } => description.as_deref(),
            ContextualEntry::Note(note) => Some(note),
        }
    }
}
