//! Alternate spellings of lookup keys.
//!
//! A template engine may hand back a stored value with its line breaks
//! normalized, its markup entity-encoded, or its whitespace squeezed. Each
//! lookup entry is expanded into those spellings so the matcher can find the
//! value whichever form the template holds.

use docfill_config::MergeSettings;
use regex::Regex;
use std::sync::OnceLock;
use tracing::debug;

use crate::lookup::LookupTable;
use crate::newline::normalize_newlines;

static WHITESPACE_RUN_RE: OnceLock<Regex> = OnceLock::new();
static INTER_TAG_WS_RE: OnceLock<Regex> = OnceLock::new();

fn whitespace_run_re() -> &'static Regex {
    WHITESPACE_RUN_RE.get_or_init(|| Regex::new(r"\s{2,}").expect("whitespace pattern is valid"))
}

fn inter_tag_ws_re() -> &'static Regex {
    INTER_TAG_WS_RE.get_or_init(|| Regex::new(r">\s+<").expect("inter-tag pattern is valid"))
}

/// Expand every entry with all variants enabled.
pub fn expand_variants(lookup: &LookupTable) -> LookupTable {
    expand_variants_with(lookup, &MergeSettings::default())
}

/// Expand every entry of `lookup` into its variant keys.
///
/// For each `(html, raw)`, in this order:
/// 1. the entry itself;
/// 2. the newline-normalized key, mapped to the newline-normalized raw value;
/// 3. the entity-encoded normalized key, when enabled and distinct;
/// 4. the whitespace-collapsed normalized key, when enabled and distinct.
///
/// Existing keys are never overwritten, so an earlier entry keeps its value.
pub fn expand_variants_with(lookup: &LookupTable, settings: &MergeSettings) -> LookupTable {
    let mut expanded = LookupTable::new();

    for (html, raw) in lookup.iter() {
        expanded.insert_if_absent(html, raw);

        let normalized = normalize_newlines(html);
        let normalized_raw = normalize_newlines(raw);
        expanded.insert_if_absent(normalized.as_str(), normalized_raw.as_str());

        if settings.entity_variants {
            let encoded = encode_entities(&normalized);
            if encoded != normalized {
                expanded.insert_if_absent(encoded, normalized_raw.as_str());
            }
        }

        if settings.collapsed_variants {
            let collapsed = collapse_whitespace(&normalized);
            if collapsed != normalized {
                expanded.insert_if_absent(collapsed, normalized_raw.as_str());
            }
        }
    }

    debug!(
        source = lookup.len(),
        expanded = expanded.len(),
        "expanded lookup variants"
    );
    expanded
}

/// Escape `& < > " '` the way markup looks once embedded as XML text.
pub fn encode_entities(html: &str) -> String {
    html_escape::encode_quoted_attribute(html).into_owned()
}

/// Drop line breaks, squeeze whitespace runs to one space and remove
/// whitespace sitting directly between two tags.
pub fn collapse_whitespace(html: &str) -> String {
    let without_breaks = html.replace('\n', "");
    let squeezed = whitespace_run_re().replace_all(&without_breaks, " ");
    inter_tag_ws_re().replace_all(&squeezed, "><").into_owned()
}
