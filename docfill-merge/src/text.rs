//! Block detection and plain-text degradation of rich values.

use regex::Regex;
use std::sync::OnceLock;

/// Elements whose presence means a value cannot sit inside an inline slot.
pub const BLOCK_TAGS: &[&str] = &[
    "table",
    "ul",
    "ol",
    "p",
    "div",
    "h1",
    "h2",
    "h3",
    "h4",
    "h5",
    "h6",
    "blockquote",
    "pre",
];

static BLOCK_OPEN_RE: OnceLock<Regex> = OnceLock::new();
static LINE_BREAK_TAG_RE: OnceLock<Regex> = OnceLock::new();
static TAG_RE: OnceLock<Regex> = OnceLock::new();
static BLANK_LINES_RE: OnceLock<Regex> = OnceLock::new();

fn block_open_re() -> &'static Regex {
    BLOCK_OPEN_RE.get_or_init(|| {
        let pattern = format!(r"(?i)<(?:{})(?:[\s/>]|$)", BLOCK_TAGS.join("|"));
        Regex::new(&pattern).expect("block tag pattern is valid")
    })
}

fn line_break_tag_re() -> &'static Regex {
    LINE_BREAK_TAG_RE.get_or_init(|| {
        Regex::new(r"(?i)<(?:p|div|br|li|h[1-6])\b[^>]*>").expect("line break pattern is valid")
    })
}

fn tag_re() -> &'static Regex {
    TAG_RE.get_or_init(|| Regex::new(r"<[^>]*>").expect("tag pattern is valid"))
}

fn blank_lines_re() -> &'static Regex {
    BLANK_LINES_RE.get_or_init(|| Regex::new(r"\n{3,}").expect("blank line pattern is valid"))
}

/// Whether `html` opens any block-level element (case-insensitive).
pub fn contains_block(html: &str) -> bool {
    block_open_re().is_match(html)
}

/// Degrade rich HTML to plain text.
///
/// Entities are decoded, openings of `p`, `div`, `br`, `li` and `h1`–`h6`
/// become line breaks, remaining tags are removed, CR/CRLF become LF, runs of
/// three or more line breaks shrink to two, and the result is trimmed.
///
/// The pass is repeated until the text stops changing, so the function is
/// idempotent even for doubly-encoded input such as `&amp;lt;p&amp;gt;`.
pub fn strip_to_text(html: &str) -> String {
    let mut current = strip_pass(html);
    // Every changing pass shortens the text, so this bound is never reached
    // before the fixed point.
    for _ in 0..=current.len() {
        let next = strip_pass(&current);
        if next == current {
            break;
        }
        current = next;
    }
    current
}

fn strip_pass(html: &str) -> String {
    let decoded = html_escape::decode_html_entities(html);
    let broken = line_break_tag_re().replace_all(&decoded, "\n");
    let stripped = tag_re().replace_all(&broken, "");
    let normalized = stripped.replace("\r\n", "\n").replace('\r', "\n");
    blank_lines_re()
        .replace_all(&normalized, "\n\n")
        .trim()
        .to_string()
}
