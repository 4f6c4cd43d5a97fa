//! View index computation.
//!
//! The view is a pure function of the records, their decisions, the active
//! filter and the search term. It carries no state of its own, so callers
//! simply recompute it after any of those inputs change.

use crate::types::{Decision, Filter, Record};

/// Returns the original indices of the records visible under `filter` and
/// `search_term`, in strictly ascending order.
///
/// A search term that is blank after trimming imposes no restriction. Otherwise
/// a record matches when its file path or response contains the term, ignoring
/// case; missing fields never match.
///
/// `records` and `decisions` must be the same length.
pub fn compute_view(
    records: &[Record],
    decisions: &[Decision],
    filter: Filter,
    search_term: &str,
) -> Vec<usize> {
    debug_assert_eq!(records.len(), decisions.len());

    let needle = (!search_term.trim().is_empty()).then(|| search_term.to_lowercase());

    decisions
        .iter()
        .enumerate()
        .filter(|(_, decision)| filter.matches(**decision))
        .filter(|(i, _)| match &needle {
            Some(needle) => records[*i].contains_lowercase(needle),
            None => true,
        })
        .map(|(i, _)| i)
        .collect()
}
