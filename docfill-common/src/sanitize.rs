//! Sanitizers for schema tokens, user-facing text and HTML attribute parts.
//!
//! These mirror the conservative filters a form host applies before values
//! reach markup: tokens are reduced to a fixed alphabet, text loses its tags,
//! and integers are coerced from whatever leading digits are present.

use regex::Regex;
use serde_json::Value;
use std::sync::OnceLock;

static SCRIPT_STYLE_RE: OnceLock<Regex> = OnceLock::new();
static TAG_RE: OnceLock<Regex> = OnceLock::new();
static INLINE_WS_RE: OnceLock<Regex> = OnceLock::new();

fn script_style_re() -> &'static Regex {
    SCRIPT_STYLE_RE.get_or_init(|| {
        Regex::new(r"(?is)<(script|style)\b[^>]*>.*?</(script|style)\s*>")
            .expect("script/style pattern is valid")
    })
}

fn tag_re() -> &'static Regex {
    TAG_RE.get_or_init(|| Regex::new(r"<[^>]*>").expect("tag pattern is valid"))
}

fn inline_ws_re() -> &'static Regex {
    INLINE_WS_RE.get_or_init(|| Regex::new(r"[ \t]{2,}").expect("whitespace pattern is valid"))
}

/// Reduce a token to lowercase `[a-z0-9_-]`.
///
/// Used for type tokens and slugs so that `"Text-Area"`, `" text-area "`
/// and `"TEXT-AREA"` all compare equal.
pub fn sanitize_key(input: &str) -> String {
    input
        .chars()
        .map(|c| c.to_ascii_lowercase())
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '_' || *c == '-')
        .collect()
}

/// Reduce a CSS class to lowercase `[a-z0-9_-]`.
pub fn sanitize_html_class(input: &str) -> String {
    sanitize_key(input)
}

/// Reduce an HTML attribute name to lowercase `[a-z0-9_-:]`.
pub fn sanitize_attr_name(input: &str) -> String {
    input
        .chars()
        .map(|c| c.to_ascii_lowercase())
        .filter(|c| {
            c.is_ascii_lowercase() || c.is_ascii_digit() || matches!(c, '_' | '-' | ':')
        })
        .collect()
}

/// Remove all tags, dropping `<script>` and `<style>` elements with their content.
pub fn strip_tags(input: &str) -> String {
    let without_scripts = script_style_re().replace_all(input, "");
    tag_re().replace_all(&without_scripts, "").into_owned()
}

/// Plain single-line text: tags stripped, line breaks and tabs folded into
/// single spaces, trimmed.
pub fn sanitize_text_field(input: &str) -> String {
    let stripped = strip_tags(input);
    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Plain multi-line text: tags stripped, CR/CRLF normalized to LF, runs of
/// spaces or tabs collapsed, trimmed. Line breaks survive.
pub fn sanitize_textarea_field(input: &str) -> String {
    let stripped = strip_tags(input).replace("\r\n", "\n").replace('\r', "\n");
    inline_ws_re()
        .replace_all(&stripped, " ")
        .trim()
        .to_string()
}

/// Coerce a schema value to an integer the way loosely-typed form hosts do.
///
/// Strings contribute their leading sign and digits (`"12px"` is 12,
/// `"abc"` is 0), floats truncate toward zero, `true` is 1, and anything
/// else is 0.
pub fn parse_int(value: &Value) -> i64 {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_u64().map(|u| i64::try_from(u).unwrap_or(i64::MAX)))
            .or_else(|| n.as_f64().map(|f| f.trunc() as i64))
            .unwrap_or(0),
        Value::String(s) => parse_int_str(s),
        Value::Bool(true) => 1,
        _ => 0,
    }
}

fn parse_int_str(input: &str) -> i64 {
    let trimmed = input.trim_start();
    let (negative, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let mut result: i64 = 0;
    for b in digits.bytes().take_while(u8::is_ascii_digit) {
        result = result.saturating_mul(10).saturating_add(i64::from(b - b'0'));
    }

    if negative {
        -result
    } else {
        result
    }
}
