//! Lookup of known rich-text values to search for in template text.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

/// Maps a searchable text key to the raw value that replaces it.
///
/// Keys keep insertion order and are never overwritten once present.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LookupTable {
    entries: IndexMap<String, String>,
}

impl LookupTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `key → raw` unless `key` is already present. Returns `true` on insert.
    pub fn insert_if_absent(&mut self, key: impl Into<String>, raw: impl Into<String>) -> bool {
        match self.entries.entry(key.into()) {
            indexmap::map::Entry::Occupied(_) => false,
            indexmap::map::Entry::Vacant(slot) => {
                slot.insert(raw.into());
                true
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for LookupTable {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut table = Self::new();
        for (key, raw) in iter {
            table.insert_if_absent(key, raw);
        }
        table
    }
}

/// Collect the stored values that look like markup into an identity lookup.
///
/// Non-strings are skipped, strings are trimmed, and only values containing
/// both `<` and `>` survive. This is a cheap gate, not a parser: exactness
/// comes later from literal substring matching.
pub fn build_lookup<'a>(values: impl IntoIterator<Item = &'a Value>) -> LookupTable {
    let mut table = LookupTable::new();
    let mut skipped = 0usize;

    for value in values {
        let Value::String(text) = value else {
            skipped += 1;
            continue;
        };
        let text = text.trim();
        if text.is_empty() || !looks_like_markup(text) {
            skipped += 1;
            continue;
        }
        table.insert_if_absent(text, text);
    }

    debug!(entries = table.len(), skipped, "built rich-text lookup");
    table
}

fn looks_like_markup(text: &str) -> bool {
    text.contains('<') && text.contains('>')
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_keeps_only_markup_like_values() {
        let values = [json!("<p>Hello</p>"), json!("plain text"), json!("<div>Block</div>")];
        let table = build_lookup(&values);

        let entries: Vec<(&str, &str)> = table.iter().collect();
        assert_eq!(
            entries,
            [("<p>Hello</p>", "<p>Hello</p>"), ("<div>Block</div>", "<div>Block</div>")]
        );
    }

    #[test]
    fn test_skips_non_strings_and_blank_values() {
        let values = [
            json!(null),
            json!(42),
            json!(["<p>nested</p>"]),
            json!({"html": "<p>x</p>"}),
            json!("   "),
            json!(""),
        ];
        assert!(build_lookup(&values).is_empty());
    }

    #[test]
    fn test_trims_and_deduplicates() {
        let values = [json!("  <b>x</b>\n"), json!("<b>x</b>")];
        let table = build_lookup(&values);
        assert_eq!(table.len(), 1);
        assert_eq!(table.get("<b>x</b>"), Some("<b>x</b>"));
    }

    #[test]
    fn test_stray_brackets_still_count() {
        let values = [json!("a > b and c < d")];
        assert!(build_lookup(&values).contains_key("a > b and c < d"));
        let only_open = [json!("a < b")];
        assert!(build_lookup(&only_open).is_empty());
    }

    #[test]
    fn test_insert_if_absent_never_overwrites() {
        let mut table = LookupTable::new();
        assert!(table.insert_if_absent("k", "first"));
        assert!(!table.insert_if_absent("k", "second"));
        assert_eq!(table.get("k"), Some("first"));
    }

    #[test]
    fn test_from_iter_keeps_first() {
        let table: LookupTable = [("a", "1"), ("b", "2"), ("a", "3")].into_iter().collect();
        assert_eq!(table.iter().collect::<Vec<_>>(), [("a", "1"), ("b", "2")]);
    }
}
