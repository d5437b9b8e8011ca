//! Option sets for select-like controls.
//!
//! Options may be declared as a sequence, a mapping, or a delimited string
//! (`"a:Alpha|b:Beta"` or `"red,green"`). All shapes collapse to an ordered
//! `value → label` map of sanitized plain text.

use docfill_common::sanitize_text_field;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::schema::{scalar_text, RawFieldSchema, OPTION_KEYS, PLACEHOLDER_KEYS};

/// Ordered `value → label` options in declaration order.
///
/// A repeated value overwrites the earlier label but keeps its position.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OptionSet {
    options: IndexMap<String, String>,
}

impl OptionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a sanitized option. Entries whose value sanitizes to nothing
    /// are dropped; an empty label falls back to the value.
    pub fn insert(&mut self, value: &str, label: &str) {
        let value = sanitize_text_field(value);
        if value.is_empty() {
            return;
        }
        let label = sanitize_text_field(label);
        let label = if label.is_empty() { value.clone() } else { label };
        self.options.insert(value, label);
    }

    pub fn get(&self, value: &str) -> Option<&str> {
        self.options.get(value).map(String::as_str)
    }

    pub fn contains(&self, value: &str) -> bool {
        self.options.contains_key(value)
    }

    pub fn len(&self) -> usize {
        self.options.len()
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.options.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.options.keys().map(String::as_str)
    }
}

/// Extract the option set declared in `parameters.{options, choices, values}`.
///
/// The first non-empty synonym is used.
pub fn parse_options(raw: &RawFieldSchema) -> OptionSet {
    let mut options = OptionSet::new();
    match raw.parameter(OPTION_KEYS) {
        Some(Value::Array(items)) => parse_sequence(items, &mut options),
        Some(Value::Object(map)) => parse_mapping(map, &mut options),
        Some(other) => {
            if let Some(text) = scalar_text(other) {
                parse_delimited(&text, &mut options);
            }
        }
        None => {}
    }
    options
}

/// Placeholder shown for the empty choice: `placeholder`, else
/// `parameters.{placeholder, prompt, empty, empty_label}`.
pub fn get_placeholder(raw: &RawFieldSchema) -> String {
    raw.text("placeholder")
        .map(|p| sanitize_text_field(&p))
        .filter(|p| !p.is_empty())
        .or_else(|| {
            raw.parameter_text(PLACEHOLDER_KEYS)
                .map(|p| sanitize_text_field(&p))
        })
        .unwrap_or_default()
}

/// Sequence entries carry no keys, so every label doubles as its value.
/// Entries shaped `{value, label}` are honored.
fn parse_sequence(items: &[Value], options: &mut OptionSet) {
    for item in items {
        match item {
            Value::Object(entry) => {
                let value = entry.get("value").and_then(scalar_text);
                let label = entry.get("label").and_then(scalar_text);
                if let Some(value) = value {
                    options.insert(&value, label.as_deref().unwrap_or(&value));
                }
            }
            other => {
                if let Some(label) = scalar_text(other) {
                    options.insert(&label, &label);
                }
            }
        }
    }
}

fn parse_mapping(map: &Map<String, Value>, options: &mut OptionSet) {
    for (key, label) in map {
        let Some(label) = scalar_text(label) else {
            continue;
        };
        if is_integer_key(key) {
            options.insert(&label, &label);
        } else {
            options.insert(key, &label);
        }
    }
}

fn parse_delimited(text: &str, options: &mut OptionSet) {
    let separator = if text.contains('|') { '|' } else { ',' };
    for piece in text.split(separator) {
        let piece = piece.trim();
        if piece.is_empty() {
            continue;
        }
        match piece.split_once(':') {
            Some((value, label)) => options.insert(value, label),
            None => options.insert(piece, piece),
        }
    }
}

/// Keys that are canonical integers (`"0"`, `"12"`, `"-3"`), i.e. positional.
fn is_integer_key(key: &str) -> bool {
    key.parse::<i64>().is_ok_and(|n| n.to_string() == key)
}
