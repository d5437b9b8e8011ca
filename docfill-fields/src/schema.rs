//! Loosely-typed field schema records.
//!
//! A schema record arrives from an external store as an untyped mapping.
//! Recognized top-level keys are read through [`RawFieldSchema::text`];
//! secondary synonyms live in the nested `parameters` mapping and are read
//! through [`RawFieldSchema::parameter`] with an explicit, ordered synonym
//! list. Unknown keys are ignored.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::sync::OnceLock;

static EMPTY: OnceLock<Map<String, Value>> = OnceLock::new();

/// `parameters` synonyms for a mandatory flag.
pub const REQUIRED_KEYS: &[&str] = &["required", "is_required"];
/// `parameters` synonyms for a read-only flag.
pub const READONLY_KEYS: &[&str] = &["readonly", "read_only", "disabled"];
/// `parameters` synonyms for select options, first non-empty wins.
pub const OPTION_KEYS: &[&str] = &["options", "choices", "values"];
/// `parameters` synonyms for placeholder text.
pub const PLACEHOLDER_KEYS: &[&str] = &["placeholder", "prompt", "empty", "empty_label"];
/// `parameters` synonyms for help text.
pub const DESCRIPTION_KEYS: &[&str] = &["description", "help", "hint"];
/// `parameters` synonyms for a display title.
pub const TITLE_KEYS: &[&str] = &["title", "label"];
/// `parameters` synonyms for the normalized data type.
pub const DATA_TYPE_KEYS: &[&str] = &["data_type", "datatype", "format"];

/// An untyped field schema mapping.
///
/// Any non-object value (including `null`) becomes an empty schema, so a
/// malformed record degrades to defaults instead of failing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Value", into = "Value")]
pub struct RawFieldSchema {
    fields: Map<String, Value>,
}

impl RawFieldSchema {
    /// An empty schema.
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw access to a top-level key.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// A top-level key as text.
    ///
    /// Strings are returned verbatim and numbers in decimal form. Empty
    /// strings and every other value type count as absent.
    pub fn text(&self, key: &str) -> Option<String> {
        self.fields.get(key).and_then(scalar_text)
    }

    /// The nested `parameters` mapping, or an empty one.
    pub fn parameters(&self) -> &Map<String, Value> {
        match self.fields.get("parameters") {
            Some(Value::Object(map)) => map,
            _ => EMPTY.get_or_init(Map::new),
        }
    }

    /// The first present, non-empty parameter among `synonyms`, tried in order.
    pub fn parameter(&self, synonyms: &[&str]) -> Option<&Value> {
        let params = self.parameters();
        synonyms
            .iter()
            .filter_map(|key| params.get(*key))
            .find(|value| !is_empty_value(value))
    }

    /// The first parameter among `synonyms` that has a text form.
    pub fn parameter_text(&self, synonyms: &[&str]) -> Option<String> {
        let params = self.parameters();
        synonyms
            .iter()
            .filter_map(|key| params.get(*key))
            .find_map(scalar_text)
    }

    /// The schema's `slug`, or an empty string.
    pub fn slug(&self) -> String {
        self.text("slug").unwrap_or_default()
    }
}

impl From<Value> for RawFieldSchema {
    fn from(value: Value) -> Self {
        match value {
            Value::Object(fields) => Self { fields },
            _ => Self::default(),
        }
    }
}

impl From<Map<String, Value>> for RawFieldSchema {
    fn from(fields: Map<String, Value>) -> Self {
        Self { fields }
    }
}

impl From<RawFieldSchema> for Value {
    fn from(schema: RawFieldSchema) -> Self {
        Value::Object(schema.fields)
    }
}

/// Text form of a scalar value; empty strings and non-scalars are `None`.
pub(crate) fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
        _ => false,
    }
}
