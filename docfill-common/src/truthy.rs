//! Truthiness of loosely-typed schema flags.
//!
//! Schemas express flags such as `required` or `readonly` as booleans,
//! numbers, or strings depending on who wrote them. [`is_truthy`] is the one
//! place that decides what counts as "on"; every caller shares it.

use serde_json::Value;

/// String spellings that count as true, compared case-insensitively.
const TRUTHY_STRINGS: &[&str] = &["true", "yes", "1", "on"];

/// Interpret a schema value as a boolean flag.
///
/// - Booleans pass through.
/// - Numbers are true iff strictly greater than zero, so `-1` is false and
///   `0.5` is true.
/// - Strings are true iff they equal one of `true`, `yes`, `1`, `on`
///   (case-insensitive, surrounding whitespace ignored).
/// - Everything else (`null`, arrays, objects) is false.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f > 0.0),
        Value::String(s) => {
            let s = s.trim();
            TRUTHY_STRINGS.iter().any(|t| s.eq_ignore_ascii_case(t))
        }
        _ => false,
    }
}
