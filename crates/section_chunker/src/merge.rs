// src/merge.rs

use tracing::trace;

use crate::section::Section;
use crate::token_counter::TokenCounter;

/// Fold sections shorter than `min_tokens` words into the section after them.
///
/// Single forward pass. A section that absorbed a short predecessor is
/// emitted as-is even if it is still short; only untouched sections are
/// checked against the threshold. A short last section passes through.
pub fn merge_short_sections(sections: Vec<Section>, min_tokens: usize) -> Vec<Section> {
    let total = sections.len();
    let mut merged = Vec::with_capacity(total);
    let mut pending: Option<Section> = None;

    for (i, section) in sections.into_iter().enumerate() {
        if let Some(short) = pending.take() {
            trace!(from = %short.heading, into = %section.heading, "merging short section");
            merged.push(short.fold_into(section));
            continue;
        }

        let has_next = i + 1 < total;
        if has_next && TokenCounter::is_below(&section.content, min_tokens) {
            pending = Some(section);
        } else {
            merged.push(section);
        }
    }

    merged
}
