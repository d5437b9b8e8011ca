//! Control-type resolution.
//!
//! Schemas mix a legacy per-field type (`single`, `textarea`, `rich`,
//! `array`) with a modern raw `type` token. Resolution is a cascade of table
//! lookups checked in a fixed order; the order matters because a token may
//! appear plausible in more than one vocabulary.

use docfill_common::sanitize_key;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::schema::RawFieldSchema;

/// Structural rendering category of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ControlType {
    /// Single-line scalar input
    Single,
    /// Multi-line plain text
    Textarea,
    /// WYSIWYG / HTML value
    Rich,
    /// Repeater of values; terminal, no scalar mapping applies
    Array,
}

impl ControlType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Single => "single",
            Self::Textarea => "textarea",
            Self::Rich => "rich",
            Self::Array => "array",
        }
    }

    /// Legacy tokens that are kept as-is; anything else coerces to `textarea`.
    fn from_legacy(token: &str) -> Self {
        match token {
            "single" => Self::Single,
            "rich" => Self::Rich,
            "array" => Self::Array,
            _ => Self::Textarea,
        }
    }
}

impl std::fmt::Display for ControlType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw type tokens that force a rich editor.
pub const RICH_TYPES: &[&str] = &["html", "rich", "tinymce", "editor"];

/// Raw type tokens that force a multi-line plain textarea.
pub const TEXTAREA_TYPES: &[&str] = &["textarea", "text-area", "text_area"];

/// Raw type tokens rendered as a single-line input.
pub const SINGLE_LINE_TYPES: &[&str] = &[
    "text",
    "string",
    "number",
    "int",
    "integer",
    "float",
    "decimal",
    "date",
    "datetime",
    "datetime-local",
    "time",
    "email",
    "url",
    "tel",
    "phone",
    "boolean",
    "bool",
    "checkbox",
    "select",
    "dropdown",
];

/// Raw-type tables in the order they are consulted.
const RAW_TYPE_TABLES: &[(&[&str], ControlType)] = &[
    (RICH_TYPES, ControlType::Rich),
    (TEXTAREA_TYPES, ControlType::Textarea),
    (SINGLE_LINE_TYPES, ControlType::Single),
];

/// Resolve a field's control type from its legacy type and optional schema.
///
/// 1. The legacy token is sanitized; an empty token means `textarea`.
/// 2. `array` is returned immediately.
/// 3. Legacy tokens other than `single`, `textarea`, `rich` coerce to `textarea`.
/// 4. The raw type is read from `type`, else `parameters.type`.
/// 5. No raw type: `rich` stays `rich`, everything else is `textarea`.
/// 6. Otherwise the rich, textarea and single-line tables are checked in
///    that order, falling back to the coerced legacy type.
pub fn resolve_control_type(legacy_type: &str, raw: Option<&RawFieldSchema>) -> ControlType {
    let legacy_token = sanitize_key(legacy_type);
    let legacy = if legacy_token.is_empty() {
        ControlType::Textarea
    } else {
        ControlType::from_legacy(&legacy_token)
    };

    if legacy == ControlType::Array {
        return ControlType::Array;
    }

    if legacy.as_str() != legacy_token {
        trace!(legacy_type, coerced = %legacy, "legacy control type coerced");
    }

    let raw_type = raw.map(raw_type_token).unwrap_or_default();
    if raw_type.is_empty() {
        return match legacy {
            ControlType::Rich => ControlType::Rich,
            _ => ControlType::Textarea,
        };
    }

    RAW_TYPE_TABLES
        .iter()
        .find(|(tokens, _)| tokens.contains(&raw_type.as_str()))
        .map(|(_, control)| *control)
        .unwrap_or_else(|| {
            trace!(raw_type = %raw_type, fallback = %legacy, "unrecognized raw field type");
            legacy
        })
}

/// The sanitized raw type token of a schema: `type`, else `parameters.type`.
pub fn raw_type_token(raw: &RawFieldSchema) -> String {
    raw.text("type")
        .or_else(|| raw.parameter_text(&["type"]))
        .map(|t| sanitize_key(&t))
        .unwrap_or_default()
}
