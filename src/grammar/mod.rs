//! The TextMate grammar document (`hew.tmLanguage.json`).
//!
//! The grammar is loaded once, validated into [`GrammarDocument`] / [`PatternNode`] records, mutated in place
//! by the synchronizer and written back in full.
//!
//! ## Notes
//! - Validation happens at load time only: `scopeName` must be a string, `patterns` an array of objects,
//!   `repository` an object of objects, and `name`/`match`/`comment`/`patterns` inside any node must have
//!   their expected types. Everything else is carried through verbatim.
//! - Output is pretty-printed with two-space indentation, original key order and a trailing newline, so an
//!   unchanged grammar round-trips byte-for-byte.

pub mod lint;
mod node;

use std::fs;
use std::path::Path;

use indexmap::IndexMap;
use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::{Map, Value};

use crate::errors::{InputKind, SyncError, SyncResult};

pub use node::{PatternNode, ShapeError};

const SCOPE_NAME: &str = "scopeName";
const REPOSITORY: &str = "repository";

/// A whole grammar document.
#[derive(Debug, Clone, PartialEq)]
pub struct GrammarDocument {
    scope_name: String,
    patterns: Vec<PatternNode>,
    repository: IndexMap<String, PatternNode>,
    rest: Map<String, Value>,
    order: Vec<String>,
}

impl GrammarDocument {
    /// Top-level `scopeName`, e.g. `source.hew`.
    pub fn scope_name(&self) -> &str {
        &self.scope_name
    }

    /// Top-level pattern sequence.
    pub fn patterns(&self) -> &[PatternNode] {
        &self.patterns
    }

    pub fn patterns_mut(&mut self) -> &mut Vec<PatternNode> {
        &mut self.patterns
    }

    /// Named repository sections, in document order.
    pub fn repository(&self) -> &IndexMap<String, PatternNode> {
        &self.repository
    }

    pub fn repository_mut(&mut self) -> &mut IndexMap<String, PatternNode> {
        &mut self.repository
    }

    /// Pattern sequence of a repository section.
    ///
    /// ## Returns
    /// - `None` if the section is absent or has no `patterns` key.
    pub fn section_patterns(&self, section: &str) -> Option<&[PatternNode]> {
        self.repository.get(section).and_then(PatternNode::patterns)
    }

    pub fn section_patterns_mut(&mut self, section: &str) -> Option<&mut Vec<PatternNode>> {
        self.repository.get_mut(section).and_then(PatternNode::patterns_mut)
    }

    /// Any other top-level key (`name`, `fileTypes`, `$schema`, ...).
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.rest.get(key)
    }

    /// Validate and convert a parsed grammar.
    pub fn from_json(value: Value) -> Result<Self, ShapeError> {
        let map = match value {
            Value::Object(map) => map,
            other => return Err(ShapeError::expected("", "an object", &other)),
        };

        let mut scope_name = None;
        let mut patterns = None;
        let mut repository = None;
        let mut rest = Map::new();
        let mut order = Vec::with_capacity(map.len());

        for (key, value) in map {
            let pointer = node::pointer_push("", &key);
            match key.as_str() {
                SCOPE_NAME => scope_name = Some(node::expect_string(value, &pointer)?),
                node::PATTERNS => patterns = Some(node::pattern_list(value, &pointer)?),
                REPOSITORY => repository = Some(repository_sections(value, &pointer)?),
                _ => {
                    rest.insert(key.clone(), value);
                }
            }
            order.push(key);
        }

        let missing = |field: &str| ShapeError::new("", format!("missing required field `{field}`"));
        Ok(GrammarDocument {
            scope_name: scope_name.ok_or_else(|| missing(SCOPE_NAME))?,
            patterns: patterns.ok_or_else(|| missing(node::PATTERNS))?,
            repository: repository.ok_or_else(|| missing(REPOSITORY))?,
            rest,
            order,
        })
    }

    /// Parse grammar text.
    ///
    /// ## Parameters
    /// - `text`: the grammar's JSON source.
    /// - `path`: where the text came from, for diagnostics.
    pub fn parse(text: &str, path: &Path) -> SyncResult<Self> {
        let value: Value = serde_json::from_str(text).map_err(|source| SyncError::MalformedInput {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(value).map_err(|e| SyncError::InvalidShape {
            path: path.to_path_buf(),
            pointer: e.pointer,
            message: e.message,
        })
    }
}

impl Serialize for GrammarDocument {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.order.len()))?;
        for key in &self.order {
            match key.as_str() {
                SCOPE_NAME => map.serialize_entry(key, &self.scope_name)?,
                node::PATTERNS => map.serialize_entry(key, &self.patterns)?,
                REPOSITORY => map.serialize_entry(key, &self.repository)?,
                _ => {
                    if let Some(value) = self.rest.get(key) {
                        map.serialize_entry(key, value)?;
                    }
                }
            }
        }
        map.end()
    }
}

fn repository_sections(value: Value, pointer: &str) -> Result<IndexMap<String, PatternNode>, ShapeError> {
    let map = match value {
        Value::Object(map) => map,
        other => return Err(ShapeError::expected(pointer, "an object", &other)),
    };
    map.into_iter()
        .map(|(key, value)| {
            let section = PatternNode::from_json(value, &node::pointer_push(pointer, &key))?;
            Ok((key, section))
        })
        .collect()
}

/// Load and validate a grammar file.
///
/// ## Errors
/// - [`SyncError::MissingInput`] if `path` does not exist.
/// - [`SyncError::MalformedInput`] if the file is not JSON.
/// - [`SyncError::InvalidShape`] if a required field is missing or mistyped.
#[tracing::instrument(skip_all, fields(path = %path.display()))]
pub fn load_grammar(path: &Path) -> SyncResult<GrammarDocument> {
    if !path.exists() {
        return Err(SyncError::missing_input(InputKind::Grammar, path));
    }
    let text = fs::read_to_string(path).map_err(|e| SyncError::io(path, e))?;
    let grammar = GrammarDocument::parse(&text, path)?;
    tracing::debug!(
        top_level = grammar.patterns.len(),
        sections = grammar.repository.len(),
        "loaded grammar"
    );
    Ok(grammar)
}

/// Render a grammar the way it is stored on disk.
pub fn to_json_string(grammar: &GrammarDocument) -> serde_json::Result<String> {
    let mut out = serde_json::to_string_pretty(grammar)?;
    out.push('\n');
    Ok(out)
}

/// Overwrite `path` with the rendered grammar.
#[tracing::instrument(skip_all, fields(path = %path.display()))]
pub fn write_grammar(path: &Path, grammar: &GrammarDocument) -> SyncResult<()> {
    let text = to_json_string(grammar).map_err(|e| SyncError::io(path, e.into()))?;
    fs::write(path, text).map_err(|e| SyncError::io(path, e))
}
