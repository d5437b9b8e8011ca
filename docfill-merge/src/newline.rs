//! Newline normalization shared by lookup keys and scanned text.

/// Escaped sequences as they appear when an upstream encoder wrote them
/// literally, longest first so `\r\n` is not split into two breaks.
const ESCAPED_BREAKS: &[&str] = &["\\r\\n", "\\n", "\\r"];

/// Normalize every line-break spelling to `\n`.
///
/// Handles CRLF, lone CR, and the literal two-character escapes `\r\n`,
/// `\n` and `\r` that some template encoders emit instead of control
/// characters.
pub fn normalize_newlines(text: &str) -> String {
    if !text.contains(['\r', '\\']) {
        return text.to_string();
    }

    let mut normalized = text.to_string();
    for escaped in ESCAPED_BREAKS {
        if normalized.contains(escaped) {
            normalized = normalized.replace(escaped, "\n");
        }
    }
    normalized.replace("\r\n", "\n").replace('\r', "\n")
}
