//! Offset-safe text rewriting and whitespace normalization.

use tracing::warn;

use crate::domain::{PlaceholderMap, Span};

/// Collapse runs of whitespace to single spaces and trim the ends.
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Replace each resolved span with its category's placeholder token.
///
/// `spans` must be ascending and non-overlapping (a `ResolvedSpanSet`).
/// Replacement tokens may differ in length from the original range, so
/// splices are applied in descending start order: offsets of spans not yet
/// applied are never shifted. Spans violating the offset invariants are
/// dropped with a warning rather than crashing the rewrite.
pub fn rewrite(text: &str, spans: &[Span], placeholders: &PlaceholderMap) -> String {
    let mut out = text.to_string();

    for span in spans.iter().rev() {
        if !span.is_valid_for(text) {
            warn!(
                kind = %span.kind,
                start = span.start,
                end = span.end,
                "dropping span with invalid offsets"
            );
            continue;
        }
        out.replace_range(span.start..span.end, placeholders.token_for(span.kind));
    }

    collapse_whitespace(&out)
}
