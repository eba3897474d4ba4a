//! Overlap resolution for detected spans.
//!
//! The resolver turns the aggregated, possibly conflicting span sequence
//! into a non-overlapping one with a single left-to-right sweep.

use crate::domain::Span;

/// Merge overlapping or touching spans into a non-overlapping sequence.
///
/// Expects `spans` sorted by `start` ascending (ties by descending score).
/// The sweep keeps one loop-local accumulator: a span strictly past the
/// accumulator's end closes it and opens a new one; anything else merges
/// into it, widening the range to `min(start)..max(end)` and keeping the
/// maximum score. On a merge the surviving kind is that of the
/// highest-scoring contributor; score ties keep the kind already
/// accumulated, i.e. the earlier-sorted span.
///
/// The output satisfies `resolved[i].end < resolved[i+1].start` for all
/// adjacent pairs, so running the resolver on its own output is a no-op.
pub fn resolve_overlaps(spans: Vec<Span>) -> Vec<Span> {
    let mut resolved: Vec<Span> = Vec::with_capacity(spans.len());

    for span in spans {
        match resolved.last_mut() {
            Some(current) if span.start <= current.end => {
                current.end = current.end.max(span.end);
                if span.score > current.score {
                    current.score = span.score;
                    current.kind = span.kind;
                }
            }
            _ => resolved.push(span),
        }
    }

    resolved
}
