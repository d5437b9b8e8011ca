//! Field descriptors: everything a form renderer and a value validator need
//! to know about one schema field, derived in a single call.

use docfill_common::{is_truthy, sanitize_text_field, sanitize_textarea_field, Pretty};
use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};
use tracing::debug;

use crate::attributes::{build_attributes, AttributeSet};
use crate::class::{build_class, join_classes, BASE_CLASS};
use crate::control::{raw_type_token, resolve_control_type, ControlType};
use crate::input::{map_input_type, InputType};
use crate::options::{get_placeholder, parse_options, OptionSet};
use crate::schema::{scalar_text, RawFieldSchema, DATA_TYPE_KEYS, DESCRIPTION_KEYS, TITLE_KEYS};

/// Renderable description of a field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    pub slug: String,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub control: ControlType,
    /// `None` for array controls, which have no scalar input.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input: Option<InputType>,
    pub attributes: AttributeSet,
    pub options: OptionSet,
    pub placeholder: String,
    pub class: String,
}

/// Resolve a schema record into a [`FieldDescriptor`].
pub fn describe_field(legacy_type: &str, raw: &RawFieldSchema) -> FieldDescriptor {
    let slug = raw.slug();
    let control = resolve_control_type(legacy_type, Some(raw));

    let label = raw
        .text("title")
        .or_else(|| raw.parameter_text(TITLE_KEYS))
        .map(|t| sanitize_text_field(&t))
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| slug.clone());
    let description = raw
        .text("description")
        .or_else(|| raw.parameter_text(DESCRIPTION_KEYS))
        .map(|d| sanitize_text_field(&d))
        .filter(|d| !d.is_empty());

    let input = match control {
        ControlType::Array => None,
        ControlType::Textarea | ControlType::Rich => Some(InputType::Textarea),
        ControlType::Single => {
            let data_type = raw.parameter_text(DATA_TYPE_KEYS).unwrap_or_default();
            Some(map_input_type(&raw_type_token(raw), &data_type))
        }
    };

    let descriptor = match input {
        Some(input) => FieldDescriptor {
            slug,
            label,
            description,
            control,
            input: Some(input),
            attributes: build_attributes(raw, input),
            options: if input == InputType::Select {
                parse_options(raw)
            } else {
                OptionSet::new()
            },
            placeholder: get_placeholder(raw),
            class: build_class(input),
        },
        None => FieldDescriptor {
            slug,
            label,
            description,
            control,
            input: None,
            attributes: AttributeSet::new(),
            options: OptionSet::new(),
            placeholder: String::new(),
            class: join_classes([BASE_CLASS, "field-input-array"]),
        },
    };

    debug!("described field {}: {}", descriptor.slug, Pretty(&descriptor));
    descriptor
}

impl FieldDescriptor {
    /// The validation/normalization view of this field.
    pub fn validation(&self) -> ValidationDescriptor {
        ValidationDescriptor {
            slug: self.slug.clone(),
            control: self.control,
            input: self.input,
            required: self.attributes.contains("required"),
            readonly: self.attributes.contains("readonly"),
            pattern: self.attributes.get("pattern").map(str::to_string),
            min: self.attributes.get("min").map(str::to_string),
            max: self.attributes.get("max").map(str::to_string),
            max_length: self
                .attributes
                .get("maxlength")
                .and_then(|l| l.parse().ok()),
            allowed: self.options.values().map(str::to_string).collect(),
        }
    }
}

/// Constraints and normalization rules for submitted values of one field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationDescriptor {
    pub slug: String,
    pub control: ControlType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input: Option<InputType>,
    pub required: bool,
    pub readonly: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<usize>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub allowed: Vec<String>,
}

impl ValidationDescriptor {
    /// Coerce a submitted value into the shape stored for this field.
    ///
    /// Never fails; values that cannot be coerced become `null` (or `[]`
    /// for array controls).
    pub fn normalize(&self, value: &Value) -> Value {
        match self.control {
            ControlType::Array => match value {
                Value::Array(_) => value.clone(),
                _ => Value::Array(Vec::new()),
            },
            ControlType::Rich => scalar_text(value)
                .map(|s| Value::String(s.trim().to_string()))
                .unwrap_or(Value::Null),
            ControlType::Textarea => scalar_text(value)
                .map(|s| Value::String(sanitize_textarea_field(&s)))
                .unwrap_or(Value::Null),
            ControlType::Single => self.normalize_scalar(value),
        }
    }

    fn normalize_scalar(&self, value: &Value) -> Value {
        match self.input.unwrap_or(InputType::Text) {
            InputType::Checkbox => Value::Bool(is_truthy(value)),
            InputType::Number => normalize_number(value),
            InputType::Select => scalar_text(value)
                .map(|s| sanitize_text_field(&s))
                .filter(|s| self.allowed.contains(s))
                .map(Value::String)
                .unwrap_or(Value::Null),
            _ => scalar_text(value)
                .map(|s| {
                    let text = sanitize_text_field(&s);
                    match self.max_length {
                        Some(limit) => text.chars().take(limit).collect(),
                        None => text,
                    }
                })
                .map(Value::String)
                .unwrap_or(Value::Null),
        }
    }
}

fn normalize_number(value: &Value) -> Value {
    match value {
        Value::Number(_) => value.clone(),
        Value::String(s) => {
            let s = s.trim();
            if let Ok(n) = s.parse::<i64>() {
                Value::Number(n.into())
            } else {
                s.parse::<f64>()
                    .ok()
                    .and_then(Number::from_f64)
                    .map(Value::Number)
                    .unwrap_or(Value::Null)
            }
        }
        _ => Value::Null,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn schema(value: Value) -> RawFieldSchema {
        RawFieldSchema::from(value)
    }

    #[test_log::test]
    fn test_describe_select_field() {
        let raw = schema(json!({
            "slug": "priority",
            "type": "dropdown",
            "title": "Priority",
            "description": "<p>How <b>urgent</b></p>",
            "placeholder": "ignored for selects",
            "parameters": {"options": "low:Low|high:High", "required": true}
        }));
        let field = describe_field("single", &raw);

        assert_eq!(field.control, ControlType::Single);
        assert_eq!(field.input, Some(InputType::Select));
        assert_eq!(field.label, "Priority");
        assert_eq!(field.description.as_deref(), Some("How urgent"));
        assert_eq!(field.options.get("high"), Some("High"));
        assert_eq!(field.placeholder, "ignored for selects");
        assert!(!field.attributes.contains("placeholder"));
        assert_eq!(field.attributes.get("required"), Some("required"));
        assert_eq!(field.class, "field-input field-input-select field-choice");
    }

    #[test_log::test]
    fn test_describe_uses_data_type_when_raw_type_is_generic() {
        let raw = schema(json!({
            "slug": "amount",
            "type": "string",
            "parameters": {"data_type": "decimal", "step": 5}
        }));
        let field = describe_field("single", &raw);
        // field type `string` maps directly to text, data type is only a fallback
        assert_eq!(field.input, Some(InputType::Text));

        let untyped = schema(json!({
            "slug": "amount",
            "type": "currency",
            "parameters": {"data_type": "decimal", "step": 5}
        }));
        let field = describe_field("single", &untyped);
        assert_eq!(field.input, Some(InputType::Number));
        assert_eq!(field.attributes.get("step"), Some("5"));
        assert_eq!(field.label, "amount");
    }

    #[test]
    fn test_describe_rich_and_textarea_use_textarea_host() {
        let rich = describe_field("rich", &schema(json!({"slug": "body", "parameters": {"rows": 12}})));
        assert_eq!(rich.control, ControlType::Rich);
        assert_eq!(rich.input, Some(InputType::Textarea));
        assert_eq!(rich.attributes.get("rows"), Some("12"));
        assert!(rich.options.is_empty());

        let notes = describe_field("textarea", &schema(json!({"slug": "notes"})));
        assert_eq!(notes.control, ControlType::Textarea);
        assert_eq!(notes.class, "field-input field-input-textarea large-text");
    }

    #[test]
    fn test_describe_array_is_terminal() {
        let field = describe_field(
            "array",
            &schema(json!({"slug": "items", "type": "number", "placeholder": "x"})),
        );
        assert_eq!(field.control, ControlType::Array);
        assert_eq!(field.input, None);
        assert!(field.attributes.is_empty());
        assert!(field.placeholder.is_empty());
        assert_eq!(field.class, "field-input field-input-array");
    }

    #[test]
    fn test_validation_descriptor_from_attributes() {
        let raw = schema(json!({
            "slug": "code",
            "type": "text",
            "pattern": "[A-Z]+",
            "length": 4,
            "parameters": {"read_only": "on"}
        }));
        let validation = describe_field("single", &raw).validation();
        assert_eq!(validation.pattern.as_deref(), Some("[A-Z]+"));
        assert_eq!(validation.max_length, Some(4));
        assert!(validation.readonly);
        assert!(!validation.required);
        assert!(validation.allowed.is_empty());
    }

    #[test]
    fn test_normalize_scalars() {
        let text = describe_field(
            "single",
            &schema(json!({"slug": "code", "type": "text", "length": 4})),
        )
        .validation();
        assert_eq!(text.normalize(&json!(" <b>ABCDEF</b> ")), json!("ABCD"));
        assert_eq!(text.normalize(&json!(12)), json!("12"));
        assert_eq!(text.normalize(&json!({"x": 1})), Value::Null);

        let checkbox = describe_field("single", &schema(json!({"type": "boolean"}))).validation();
        assert_eq!(checkbox.normalize(&json!("yes")), json!(true));
        assert_eq!(checkbox.normalize(&json!(-1)), json!(false));

        let number = describe_field("single", &schema(json!({"type": "int"}))).validation();
        assert_eq!(number.normalize(&json!(" 42 ")), json!(42));
        assert_eq!(number.normalize(&json!("2.5")), json!(2.5));
        assert_eq!(number.normalize(&json!("many")), Value::Null);
        assert_eq!(number.normalize(&json!(7)), json!(7));
    }

    #[test]
    fn test_normalize_select_rejects_unknown_values() {
        let select = describe_field(
            "single",
            &schema(json!({"type": "select", "parameters": {"options": ["Red", "Blue"]}})),
        )
        .validation();
        assert_eq!(select.allowed, ["Red", "Blue"]);
        assert_eq!(select.normalize(&json!("Blue")), json!("Blue"));
        assert_eq!(select.normalize(&json!("Green")), Value::Null);
    }

    #[test]
    fn test_normalize_multiline_controls() {
        let rich = describe_field("rich", &schema(json!({}))).validation();
        assert_eq!(
            rich.normalize(&json!("  <p>Keep <b>markup</b></p>\n")),
            json!("<p>Keep <b>markup</b></p>")
        );

        let textarea = describe_field("textarea", &schema(json!({}))).validation();
        assert_eq!(
            textarea.normalize(&json!("<p>one</p>\r\ntwo")),
            json!("one\ntwo")
        );

        let array = describe_field("array", &schema(json!({}))).validation();
        assert_eq!(array.normalize(&json!(["a", "b"])), json!(["a", "b"]));
        assert_eq!(array.normalize(&json!("a")), json!([]));
    }

    #[test]
    fn test_descriptor_serializes_with_lowercase_kinds() {
        let field = describe_field("single", &schema(json!({"slug": "when", "type": "datetime"})));
        let value = serde_json::to_value(&field).unwrap();
        assert_eq!(value["control"], json!("single"));
        assert_eq!(value["input"], json!("datetime-local"));
        assert!(value.get("description").is_none());
    }
}
