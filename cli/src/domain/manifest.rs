//! Manifest document model — untyped `agent.yaml` contents.
//!
//! The manifest is kept as a tagged YAML value rather than a fixed struct so
//! that partially specified or wrongly typed input can still be represented
//! and reported on field by field.

use std::fmt;

use serde_yaml::{Mapping, Value};
use thiserror::Error;

/// Kind of a manifest value, as named in schema `type` declarations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    String,
    Integer,
    Number,
    Boolean,
    Array,
    Object,
    Null,
}

impl ValueKind {
    /// Classify a YAML value. Tags (`!foo bar`) are looked through.
    #[must_use]
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(_) => Self::Boolean,
            Value::Number(n) if n.is_i64() || n.is_u64() => Self::Integer,
            Value::Number(_) => Self::Number,
            Value::String(_) => Self::String,
            Value::Sequence(_) => Self::Array,
            Value::Mapping(_) => Self::Object,
            Value::Tagged(tagged) => Self::of(&tagged.value),
        }
    }

    /// Parse a schema type name.
    #[must_use]
    pub fn from_schema_name(name: &str) -> Option<Self> {
        match name {
            "string" => Some(Self::String),
            "integer" => Some(Self::Integer),
            "number" => Some(Self::Number),
            "boolean" => Some(Self::Boolean),
            "array" => Some(Self::Array),
            "object" => Some(Self::Object),
            "null" => Some(Self::Null),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Integer => "integer",
            Self::Number => "number",
            Self::Boolean => "boolean",
            Self::Array => "array",
            Self::Object => "object",
            Self::Null => "null",
        }
    }

    /// Whether a value of kind `actual` satisfies a declared type of `self`.
    ///
    /// `number` accepts integers; everything else is exact.
    #[must_use]
    pub fn accepts(self, actual: ValueKind) -> bool {
        self == actual || (self == Self::Number && actual == Self::Integer)
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why manifest text could not become a document.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ManifestParseError {
    #[error("Invalid YAML in agent.yaml: {0}")]
    Syntax(String),

    #[error("agent.yaml must be a YAML mapping (found {0})")]
    NotMapping(ValueKind),
}

/// Decoded top-level mapping of `agent.yaml`.
#[derive(Debug, Clone, PartialEq)]
pub struct ManifestDocument {
    fields: Mapping,
}

impl ManifestDocument {
    /// Value of a top-level field.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// Value of a top-level field when it is a string.
    #[must_use]
    pub fn get_str(&self, field: &str) -> Option<&str> {
        self.get(field).and_then(Value::as_str)
    }

    /// Top-level keys that are strings, in document order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().filter_map(Value::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Decode manifest text.
///
/// # Errors
///
/// Returns `Syntax` when the text is not YAML and `NotMapping` when it is
/// YAML but not a mapping (an empty file counts as `null`).
pub fn parse_manifest(text: &str) -> Result<ManifestDocument, ManifestParseError> {
    if text.trim().is_empty() {
        return Err(ManifestParseError::NotMapping(ValueKind::Null));
    }
    let value: Value =
        serde_yaml::from_str(text).map_err(|e| ManifestParseError::Syntax(e.to_string()))?;
    match value {
        Value::Mapping(fields) => Ok(ManifestDocument { fields }),
        other => Err(ManifestParseError::NotMapping(ValueKind::of(&other))),
    }
}
