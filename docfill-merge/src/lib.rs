//! Rich-text fragment merge
//!
//! `docfill-merge` finds previously stored rich-text values inside the
//! flattened text of a document template and substitutes them, whichever
//! textual form the template engine left them in.
//!
//! # Pipeline
//!
//! 1. [`build_lookup`] keeps the stored values that look like markup.
//! 2. [`expand_variants`] adds newline-normalized, entity-encoded and
//!    whitespace-collapsed spellings of each value.
//! 3. [`FragmentMatcher`] scans the template for the earliest occurrence of
//!    any spelling, preferring the longest key at a shared offset.
//! 4. [`merge_fragments`] drives the scan and hands every match to a
//!    [`FragmentEmitter`]; [`PlainTextEmitter`] degrades markup with
//!    [`strip_to_text`] for slots that cannot host it.
//!
//! ```
//! use docfill_config::MergeSettings;
//! use docfill_merge::{merge_fragments, FragmentMatcher, PlainTextEmitter};
//! use serde_json::json;
//!
//! let stored = [json!("<p>Quarterly <b>report</b></p>"), json!("plain")];
//! let settings = MergeSettings::default();
//! let matcher = FragmentMatcher::from_values(&stored, &settings);
//!
//! let template = "Title: &lt;p&gt;Quarterly &lt;b&gt;report&lt;/b&gt;&lt;/p&gt;";
//! let outcome = merge_fragments(template, &matcher, &mut PlainTextEmitter, &settings);
//! assert_eq!(outcome.output, "Title: Quarterly report");
//! assert_eq!(outcome.replacements, 1);
//! ```

pub mod lookup;
pub mod matcher;
pub mod merge;
pub mod newline;
pub mod text;
pub mod variants;

pub use lookup::{build_lookup, LookupTable};
pub use matcher::{find_next, FragmentMatch, FragmentMatcher};
pub use merge::{merge_fragments, FragmentEmitter, MergeOutcome, PlainTextEmitter};
pub use newline::normalize_newlines;
pub use text::{contains_block, strip_to_text, BLOCK_TAGS};
pub use variants::{collapse_whitespace, encode_entities, expand_variants, expand_variants_with};
