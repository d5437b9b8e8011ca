//! Input-type mapping for single-line controls.

use serde::{Deserialize, Serialize};
use tracing::trace;

/// Concrete control rendered for a field.
///
/// [`map_input_type`] only ever yields the scalar kinds; `Textarea` is the
/// host element for multi-line and rich controls and is chosen by the
/// descriptor, never by the mapper.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputType {
    Text,
    Number,
    Email,
    Url,
    Tel,
    Date,
    #[serde(rename = "datetime-local")]
    DateTimeLocal,
    Time,
    Checkbox,
    Select,
    Textarea,
}

impl InputType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Number => "number",
            Self::Email => "email",
            Self::Url => "url",
            Self::Tel => "tel",
            Self::Date => "date",
            Self::DateTimeLocal => "datetime-local",
            Self::Time => "time",
            Self::Checkbox => "checkbox",
            Self::Select => "select",
            Self::Textarea => "textarea",
        }
    }

    /// Whether placeholder, pattern and maxlength make sense for this input.
    pub fn allows_placeholder(self) -> bool {
        !matches!(self, Self::Checkbox | Self::Select)
    }

    /// Whether `min`/`max` bounds apply.
    pub fn accepts_bounds(self) -> bool {
        matches!(
            self,
            Self::Number | Self::Date | Self::DateTimeLocal | Self::Time
        )
    }

    /// Whether a `step` attribute applies.
    pub fn accepts_step(self) -> bool {
        self == Self::Number
    }

    fn from_field_type(token: &str) -> Option<Self> {
        Some(match token {
            "text" | "string" => Self::Text,
            "number" | "int" | "integer" | "float" | "decimal" | "numeric" => Self::Number,
            "email" => Self::Email,
            "url" | "link" => Self::Url,
            "tel" | "phone" => Self::Tel,
            "date" => Self::Date,
            "datetime" | "datetime-local" | "datetime_local" => Self::DateTimeLocal,
            "time" => Self::Time,
            "checkbox" | "boolean" | "bool" => Self::Checkbox,
            "select" | "dropdown" | "choice" => Self::Select,
            _ => return None,
        })
    }

    fn from_data_type(token: &str) -> Option<Self> {
        Some(match token {
            "string" | "text" => Self::Text,
            "int" | "integer" | "float" | "double" | "decimal" | "number" => Self::Number,
            "bool" | "boolean" => Self::Checkbox,
            "date" => Self::Date,
            "datetime" | "timestamp" => Self::DateTimeLocal,
            "time" => Self::Time,
            "email" => Self::Email,
            "url" | "uri" => Self::Url,
            _ => return None,
        })
    }
}

impl std::fmt::Display for InputType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Map a field type and a normalized data type onto an input type.
///
/// The field type is the more specific signal and is checked first; the data
/// type is consulted on a miss; `text` is the final fallback. Lookups are
/// case-insensitive.
pub fn map_input_type(field_type: &str, data_type: &str) -> InputType {
    let field_token = field_type.trim().to_ascii_lowercase();
    if let Some(input) = InputType::from_field_type(&field_token) {
        return input;
    }

    let data_token = data_type.trim().to_ascii_lowercase();
    if let Some(input) = InputType::from_data_type(&data_token) {
        return input;
    }

    trace!(field_type, data_type, "no input type mapping, using text");
    InputType::Text
}
