//! HTML attribute derivation for form controls.
//!
//! Attributes are written with "first writer wins": top-level schema keys are
//! applied before their `parameters` synonyms, and a later source only fills
//! an attribute that is still absent.

use docfill_common::{is_truthy, parse_int, sanitize_attr_name};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::input::InputType;
use crate::schema::{RawFieldSchema, PLACEHOLDER_KEYS, READONLY_KEYS, REQUIRED_KEYS, TITLE_KEYS};

/// Ordered HTML attributes for one control.
///
/// Names are restricted to `[a-z0-9_-:]`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AttributeSet {
    attrs: IndexMap<String, String>,
}

impl AttributeSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `value` under `name` unless the attribute is already set.
    ///
    /// Returns `true` if the value was written. Names that sanitize to
    /// nothing are ignored.
    pub fn set_if_absent(&mut self, name: &str, value: impl Into<String>) -> bool {
        let name = sanitize_attr_name(name);
        if name.is_empty() || self.attrs.contains_key(&name) {
            return false;
        }
        self.attrs.insert(name, value.into());
        true
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.attrs.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.attrs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attrs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attrs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Render as ` name="value"` pairs in insertion order, values escaped for
    /// a double-quoted attribute context.
    pub fn render(&self) -> String {
        self.attrs
            .iter()
            .map(|(name, value)| {
                format!(
                    " {}=\"{}\"",
                    name,
                    html_escape::encode_double_quoted_attribute(value)
                )
            })
            .collect()
    }
}

/// Derive the attribute set for a field rendered as `input`.
pub fn build_attributes(raw: &RawFieldSchema, input: InputType) -> AttributeSet {
    let mut attrs = AttributeSet::new();
    let allows_placeholder = input.allows_placeholder();

    if allows_placeholder {
        if let Some(placeholder) = trimmed(raw.text("placeholder")) {
            attrs.set_if_absent("placeholder", placeholder);
        }
        if let Some(pattern) = trimmed(raw.text("pattern")) {
            attrs.set_if_absent("pattern", pattern);
        }
        if let Some(length) = positive_int(raw.get("length")) {
            attrs.set_if_absent("maxlength", length.to_string());
        }
    }

    if input.accepts_bounds() {
        if let Some(min) = trimmed(raw.text("minvalue")) {
            attrs.set_if_absent("min", min);
        }
        if let Some(max) = trimmed(raw.text("maxvalue")) {
            attrs.set_if_absent("max", max);
        }
    }

    apply_parameters(raw, input, &mut attrs);

    let title = trimmed(raw.text("patternmsg"))
        .or_else(|| trimmed(raw.text("title")))
        .or_else(|| trimmed(raw.parameter_text(TITLE_KEYS)));
    if let Some(title) = title {
        attrs.set_if_absent("title", title);
    }

    attrs
}

fn apply_parameters(raw: &RawFieldSchema, input: InputType, attrs: &mut AttributeSet) {
    if raw.parameter(REQUIRED_KEYS).is_some_and(is_truthy) {
        attrs.set_if_absent("required", "required");
    }
    if raw.parameter(READONLY_KEYS).is_some_and(is_truthy) {
        attrs.set_if_absent("readonly", "readonly");
    }

    if input.allows_placeholder() {
        if let Some(placeholder) = trimmed(raw.parameter_text(PLACEHOLDER_KEYS)) {
            attrs.set_if_absent("placeholder", placeholder);
        }
    }

    if input.accepts_step() {
        if let Some(step) = positive_int(raw.parameter(&["step"])) {
            attrs.set_if_absent("step", step.to_string());
        }
    }

    if input.accepts_bounds() {
        if let Some(min) = trimmed(raw.parameter_text(&["min"])) {
            attrs.set_if_absent("min", min);
        }
        if let Some(max) = trimmed(raw.parameter_text(&["max"])) {
            attrs.set_if_absent("max", max);
        }
    }

    if input == InputType::Textarea {
        if let Some(rows) = positive_int(raw.parameter(&["rows"])) {
            attrs.set_if_absent("rows", rows.to_string());
        }
    }
}

fn trimmed(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn positive_int(value: Option<&Value>) -> Option<i64> {
    value.map(parse_int).filter(|n| *n > 0)
}
