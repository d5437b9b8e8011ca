//! Earliest-then-longest fragment search over flattened template text.

use std::borrow::Cow;

use docfill_config::MergeSettings;
use indexmap::IndexMap;
use serde_json::Value;
use tracing::trace;

use crate::lookup::{build_lookup, LookupTable};
use crate::newline::normalize_newlines;
use crate::text::contains_block;
use crate::variants::expand_variants_with;

/// One located fragment.
///
/// `position` is a byte offset into the newline-normalized text that was
/// scanned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FragmentMatch<'a> {
    pub position: usize,
    pub key: Cow<'a, str>,
    pub replacement: Cow<'a, str>,
}

impl FragmentMatch<'_> {
    /// Byte length of the matched key.
    pub fn len(&self) -> usize {
        self.key.len()
    }

    pub fn is_empty(&self) -> bool {
        self.key.is_empty()
    }

    /// Byte offset just past the matched key.
    pub fn end(&self) -> usize {
        self.position + self.key.len()
    }

    /// Whether the replacement carries block-level markup.
    pub fn contains_block(&self) -> bool {
        contains_block(&self.replacement)
    }

    pub fn into_owned(self) -> FragmentMatch<'static> {
        FragmentMatch {
            position: self.position,
            key: Cow::Owned(self.key.into_owned()),
            replacement: Cow::Owned(self.replacement.into_owned()),
        }
    }
}

/// Pre-normalized candidate keys ready for repeated scans.
#[derive(Debug, Clone, Default)]
pub struct FragmentMatcher {
    candidates: IndexMap<String, String>,
}

impl FragmentMatcher {
    /// Normalize the newlines of every key once. Empty keys are dropped and
    /// the first entry wins when two keys normalize to the same text.
    pub fn new(lookup: &LookupTable) -> Self {
        let mut candidates = IndexMap::with_capacity(lookup.len());
        for (key, raw) in lookup.iter() {
            let key = normalize_newlines(key);
            if key.is_empty() {
                continue;
            }
            candidates.entry(key).or_insert_with(|| raw.to_string());
        }
        Self { candidates }
    }

    /// Build a matcher straight from stored field values: markup-looking
    /// values are collected and expanded into their variants.
    pub fn from_values<'a>(
        values: impl IntoIterator<Item = &'a Value>,
        settings: &MergeSettings,
    ) -> Self {
        Self::new(&expand_variants_with(&build_lookup(values), settings))
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    /// Find the next fragment in `text` at or after byte `start`.
    ///
    /// `text` must already be newline-normalized. The earliest occurrence of
    /// any key wins; among keys starting at the same offset the longest wins.
    /// A `start` inside a character moves forward to the next boundary, and a
    /// `start` past the end is a miss.
    pub fn find<'m>(&'m self, text: &str, start: usize) -> Option<FragmentMatch<'m>> {
        let start = ceil_char_boundary(text, start)?;
        let haystack = &text[start..];

        let mut best: Option<(usize, &'m str, &'m str)> = None;
        for (key, raw) in &self.candidates {
            // A key can only beat the current best if it starts no later,
            // so the search never needs to look past best + key length.
            let window = match best {
                Some((offset, _, _)) => haystack
                    .get(..(offset + key.len()).min(haystack.len()))
                    .unwrap_or(haystack),
                None => haystack,
            };
            let Some(offset) = window.find(key.as_str()) else {
                continue;
            };

            let better = match best {
                None => true,
                Some((best_offset, best_key, _)) => {
                    offset < best_offset || (offset == best_offset && key.len() > best_key.len())
                }
            };
            if better {
                best = Some((offset, key.as_str(), raw.as_str()));
            }
        }

        best.map(|(offset, key, raw)| {
            trace!(position = start + offset, key_len = key.len(), "fragment matched");
            FragmentMatch {
                position: start + offset,
                key: Cow::Borrowed(key),
                replacement: Cow::Borrowed(raw),
            }
        })
    }
}

/// Find the next fragment of `lookup` in `text` at or after byte `start`.
///
/// `text` is newline-normalized before scanning and the returned position
/// refers to the normalized text. `None` means no key occurs.
pub fn find_next(text: &str, lookup: &LookupTable, start: usize) -> Option<FragmentMatch<'static>> {
    let text = normalize_newlines(text);
    FragmentMatcher::new(lookup)
        .find(&text, start)
        .map(FragmentMatch::into_owned)
}

fn ceil_char_boundary(text: &str, index: usize) -> Option<usize> {
    if index > text.len() {
        return None;
    }
    (index..=text.len()).find(|i| text.is_char_boundary(*i))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lookup(entries: &[(&str, &str)]) -> LookupTable {
        entries.iter().copied().collect()
    }

    #[test]
    fn test_finds_paragraph_at_offset() {
        let table = lookup(&[("<p>paragraph</p>", "<p>paragraph</p>")]);
        let found = find_next("Some text <p>paragraph</p> more text", &table, 0).unwrap();
        assert_eq!(found.position, 10);
        assert_eq!(found.key, "<p>paragraph</p>");
        assert_eq!(found.replacement, "<p>paragraph</p>");
        assert_eq!(found.end(), 26);
    }

    #[test]
    fn test_longest_key_wins_at_same_position() {
        let table = lookup(&[("<p>A</p>", "short"), ("<p>A</p><p>B</p>", "long")]);
        let found = find_next("x <p>A</p><p>B</p> y", &table, 0).unwrap();
        assert_eq!(found.position, 2);
        assert_eq!(found.replacement, "long");
        assert_eq!(found.len(), "<p>A</p><p>B</p>".len());
    }

    #[test]
    fn test_longest_key_wins_regardless_of_insertion_order() {
        let table = lookup(&[("<p>A</p><p>B</p>", "long"), ("<p>A</p>", "short")]);
        let found = find_next("<p>A</p><p>B</p>", &table, 0).unwrap();
        assert_eq!(found.replacement, "long");
    }

    #[test]
    fn test_earliest_position_beats_length() {
        let table = lookup(&[("<b>zz</b> and more", "long"), ("<i>a</i>", "short")]);
        let found = find_next("<i>a</i> then <b>zz</b> and more", &table, 0).unwrap();
        assert_eq!(found.position, 0);
        assert_eq!(found.replacement, "short");
    }

    #[test]
    fn test_start_skips_earlier_occurrences() {
        let table = lookup(&[("<b>x</b>", "bold")]);
        let text = "<b>x</b> and <b>x</b>";
        assert_eq!(find_next(text, &table, 0).unwrap().position, 0);
        assert_eq!(find_next(text, &table, 1).unwrap().position, 13);
        assert!(find_next(text, &table, 14).is_none());
        assert!(find_next(text, &table, text.len()).is_none());
        assert!(find_next(text, &table, text.len() + 5).is_none());
    }

    #[test]
    fn test_miss_and_empty_lookup() {
        let table = lookup(&[("<p>absent</p>", "x")]);
        assert!(find_next("nothing here", &table, 0).is_none());
        assert!(find_next("<p>x</p>", &LookupTable::new(), 0).is_none());
    }

    #[test]
    fn test_text_and_keys_are_newline_normalized() {
        let table = lookup(&[("<p>a</p>\r\n<p>b</p>", "raw")]);
        let found = find_next(r"pre <p>a</p>\n<p>b</p>", &table, 0).unwrap();
        assert_eq!(found.position, 4);
        assert_eq!(found.key, "<p>a</p>\n<p>b</p>");

        let crlf_text = find_next("pre <p>a</p>\r\n<p>b</p>", &table, 0).unwrap();
        assert_eq!(crlf_text.position, 4);
    }

    #[test]
    fn test_empty_keys_are_ignored() {
        let matcher = FragmentMatcher::new(&lookup(&[("", "never"), ("<b>x</b>", "bold")]));
        assert_eq!(matcher.len(), 1);
        assert_eq!(matcher.find("<b>x</b>", 0).unwrap().replacement, "bold");
    }

    #[test]
    fn test_duplicate_normalized_keys_keep_first() {
        let matcher = FragmentMatcher::new(&lookup(&[("<p>\r\n</p>", "first"), ("<p>\n</p>", "second")]));
        assert_eq!(matcher.len(), 1);
        assert_eq!(matcher.find("<p>\n</p>", 0).unwrap().replacement, "first");
    }

    #[test]
    fn test_start_inside_multibyte_char_rounds_up() {
        let table = lookup(&[("<b>é</b>", "bold")]);
        let text = "é<b>é</b>";
        let found = find_next(text, &table, 1).unwrap();
        assert_eq!(found.position, 2);
    }

    #[test]
    fn test_from_values_finds_encoded_and_collapsed_forms() {
        let values = [serde_json::json!("<p>Hello\n  <b>world</b></p>"), serde_json::json!("plain")];
        let matcher = FragmentMatcher::from_values(&values, &MergeSettings::default());

        let encoded = "x &lt;p&gt;Hello\n  &lt;b&gt;world&lt;/b&gt;&lt;/p&gt; y";
        let found = matcher.find(encoded, 0).unwrap();
        assert_eq!(found.position, 2);
        assert_eq!(found.replacement, "<p>Hello\n  <b>world</b></p>");

        let collapsed = "<p>Hello <b>world</b></p>";
        let found = matcher.find(collapsed, 0).unwrap();
        assert_eq!(found.position, 0);
        assert_eq!(found.len(), collapsed.len());
    }

    #[test]
    fn test_match_reports_block_content() {
        let table = lookup(&[("<x>", "<div>Block</div>"), ("<y>", "<em>inline</em>")]);
        assert!(find_next("<x>", &table, 0).unwrap().contains_block());
        assert!(!find_next("<y>", &table, 0).unwrap().contains_block());
    }
}
