// crates/geosuggest-core/src/rank.rs

//! # Deduplicator + Ranker

use crate::model::Suggestion;
use crate::text::char_len;
use std::cmp::Ordering;
use std::collections::HashSet;

/// Collapse suggestions naming the same place.
///
/// Two suggestions are the same place when their folded `name` and their
/// `district` are equal. The first occurrence wins; since merged input is in
/// `source_priority` order, the more authoritative source is kept.
pub fn dedupe(suggestions: Vec<Suggestion>) -> Vec<Suggestion> {
    let mut seen = HashSet::with_capacity(suggestions.len());
    suggestions
        .into_iter()
        .filter(|s| seen.insert(s.dedup_key()))
        .collect()
}

/// Total order used by [`rank`]. Each key only breaks ties of the previous:
/// district category first, lower `source_priority`, higher `importance`,
/// shorter `name` (in chars).
pub fn compare(a: &Suggestion, b: &Suggestion) -> Ordering {
    b.is_district()
        .cmp(&a.is_district())
        .then_with(|| a.source_priority.cmp(&b.source_priority))
        .then_with(|| b.importance.total_cmp(&a.importance))
        .then_with(|| char_len(&a.name).cmp(&char_len(&b.name)))
}

/// Stable sort by [`compare`], truncated to `limit`.
pub fn rank(mut suggestions: Vec<Suggestion>, limit: usize) -> Vec<Suggestion> {
    suggestions.sort_by(compare);
    suggestions.truncate(limit);
    suggestions
}
