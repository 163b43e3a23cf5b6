//! Pattern nodes of a TextMate grammar.
//!
//! A node keeps the fields the synchronizer reads (`name`, `match`, `comment`, `patterns`) typed and every
//! other key (`begin`, `end`, `captures`, `include`, ...) as raw JSON. The original key order is recorded so a
//! node that is not touched serializes back byte-for-byte.

use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::{Map, Value};

pub(crate) const NAME: &str = "name";
pub(crate) const MATCH: &str = "match";
pub(crate) const COMMENT: &str = "comment";
pub(crate) const PATTERNS: &str = "patterns";
pub(crate) const INCLUDE: &str = "include";

/// A field of the grammar that does not have the expected JSON type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShapeError {
    /// JSON pointer (RFC 6901) to the offending value.
    pub pointer: String,
    pub message: String,
}

impl ShapeError {
    pub(crate) fn new(pointer: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            pointer: pointer.into(),
            message: message.into(),
        }
    }

    pub(crate) fn expected(pointer: &str, expected: &str, found: &Value) -> Self {
        Self::new(pointer, format!("expected {expected}, found {}", json_kind(found)))
    }
}

/// One pattern of the grammar tree.
#[derive(Debug, Clone, PartialEq)]
pub struct PatternNode {
    name: Option<String>,
    matcher: Option<String>,
    comment: Option<String>,
    patterns: Option<Vec<PatternNode>>,
    rest: Map<String, Value>,
    order: Vec<String>,
}

impl PatternNode {
    /// Build a generated keyword pattern (`comment`, `name`, `match`, in that key order).
    pub fn generated(comment: impl Into<String>, name: impl Into<String>, regex: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            matcher: Some(regex.into()),
            comment: Some(comment.into()),
            patterns: None,
            rest: Map::new(),
            order: vec![COMMENT.to_string(), NAME.to_string(), MATCH.to_string()],
        }
    }

    /// Scope name (`name` key).
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Regex of the `match` key.
    pub fn match_regex(&self) -> Option<&str> {
        self.matcher.as_deref()
    }

    pub fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }

    /// Target of an `include` key, e.g. `#strings` or `$self`.
    pub fn include(&self) -> Option<&str> {
        self.rest.get(INCLUDE).and_then(Value::as_str)
    }

    /// Nested patterns, if the node has a `patterns` key.
    pub fn patterns(&self) -> Option<&[PatternNode]> {
        self.patterns.as_deref()
    }

    pub fn patterns_mut(&mut self) -> Option<&mut Vec<PatternNode>> {
        self.patterns.as_mut()
    }

    /// Any key the node carries verbatim.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.rest.get(key)
    }

    /// Replace the `match` regex, returning the previous one.
    ///
    /// ## Notes
    /// - A node without `match` gets the key appended after its existing keys.
    pub fn set_match_regex(&mut self, regex: impl Into<String>) -> Option<String> {
        if self.matcher.is_none() {
            self.order.push(MATCH.to_string());
        }
        self.matcher.replace(regex.into())
    }

    /// Validate and convert one JSON object.
    ///
    /// ## Parameters
    /// - `value`: the node as parsed JSON.
    /// - `pointer`: JSON pointer of `value`, used in error messages.
    pub fn from_json(value: Value, pointer: &str) -> Result<Self, ShapeError> {
        let map = match value {
            Value::Object(map) => map,
            other => return Err(ShapeError::expected(pointer, "an object", &other)),
        };

        let mut node = PatternNode {
            name: None,
            matcher: None,
            comment: None,
            patterns: None,
            rest: Map::new(),
            order: Vec::with_capacity(map.len()),
        };

        for (key, value) in map {
            let field_pointer = pointer_push(pointer, &key);
            match key.as_str() {
                NAME => node.name = Some(expect_string(value, &field_pointer)?),
                MATCH => node.matcher = Some(expect_string(value, &field_pointer)?),
                COMMENT => node.comment = Some(expect_string(value, &field_pointer)?),
                PATTERNS => node.patterns = Some(pattern_list(value, &field_pointer)?),
                _ => {
                    node.rest.insert(key.clone(), value);
                }
            }
            node.order.push(key);
        }

        Ok(node)
    }
}

impl Serialize for PatternNode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.order.len()))?;
        for key in &self.order {
            match key.as_str() {
                NAME => map.serialize_entry(key, &self.name)?,
                MATCH => map.serialize_entry(key, &self.matcher)?,
                COMMENT => map.serialize_entry(key, &self.comment)?,
                PATTERNS => map.serialize_entry(key, &self.patterns)?,
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

/// Validate a JSON array of pattern objects.
pub(crate) fn pattern_list(value: Value, pointer: &str) -> Result<Vec<PatternNode>, ShapeError> {
    let items = match value {
        Value::Array(items) => items,
        other => return Err(ShapeError::expected(pointer, "an array", &other)),
    };
    items
        .into_iter()
        .enumerate()
        .map(|(idx, item)| PatternNode::from_json(item, &pointer_push(pointer, &idx.to_string())))
        .collect()
}

pub(crate) fn expect_string(value: Value, pointer: &str) -> Result<String, ShapeError> {
    match value {
        Value::String(s) => Ok(s),
        other => Err(ShapeError::expected(pointer, "a string", &other)),
    }
}

/// Append one reference token to a JSON pointer.
pub(crate) fn pointer_push(pointer: &str, token: &str) -> String {
    format!("{pointer}/{}", token.replace('~', "~0").replace('/', "~1"))
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
