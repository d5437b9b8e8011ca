//! Replace every located fragment in a flattened template body.

use docfill_config::MergeSettings;
use serde::Serialize;
use tracing::{debug, warn};

use crate::matcher::{FragmentMatch, FragmentMatcher};
use crate::newline::normalize_newlines;
use crate::text::strip_to_text;

/// Produces the markup that replaces one matched fragment.
pub trait FragmentEmitter {
    fn emit(&mut self, found: &FragmentMatch<'_>) -> String;
}

impl<F> FragmentEmitter for F
where
    F: FnMut(&FragmentMatch<'_>) -> String,
{
    fn emit(&mut self, found: &FragmentMatch<'_>) -> String {
        self(found)
    }
}

/// Emits the plain-text form of the replacement, for slots that cannot hold
/// markup.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainTextEmitter;

impl FragmentEmitter for PlainTextEmitter {
    fn emit(&mut self, found: &FragmentMatch<'_>) -> String {
        strip_to_text(&found.replacement)
    }
}

/// Result of one merge pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MergeOutcome {
    pub output: String,
    pub replacements: usize,
    /// Set when the pass stopped at the replacement limit with fragments
    /// possibly left in place.
    pub truncated: bool,
}

/// Scan `text` from the start and substitute each fragment `matcher` finds.
///
/// `text` is newline-normalized first. Text between matches is copied
/// verbatim and the scan resumes just past each matched key, so replacement
/// output is never rescanned.
pub fn merge_fragments<E>(
    text: &str,
    matcher: &FragmentMatcher,
    emitter: &mut E,
    settings: &MergeSettings,
) -> MergeOutcome
where
    E: FragmentEmitter + ?Sized,
{
    let text = normalize_newlines(text);
    let mut output = String::with_capacity(text.len());
    let mut cursor = 0usize;
    let mut replacements = 0usize;
    let mut truncated = false;

    while let Some(found) = matcher.find(&text, cursor) {
        if replacements >= settings.max_replacements {
            warn!(
                limit = settings.max_replacements,
                position = found.position,
                "replacement limit reached, leaving remaining fragments in place"
            );
            truncated = true;
            break;
        }

        output.push_str(&text[cursor..found.position]);
        output.push_str(&emitter.emit(&found));
        cursor = found.end();
        replacements += 1;
    }
    output.push_str(&text[cursor..]);

    debug!(
        replacements,
        truncated,
        input_len = text.len(),
        output_len = output.len(),
        "merged fragments"
    );
    MergeOutcome {
        output,
        replacements,
        truncated,
    }
}
