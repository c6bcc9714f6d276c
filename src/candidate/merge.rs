//! Combining candidate sources into one ranked list
//!
//! The tap (if any) is seeded first, then saved places, then search hits.
//! Each incoming saved place or search hit is checked against everything
//! already kept; a duplicate pair keeps the higher-authority entry. The list
//! is then stably sorted by distance, so equal distances keep source order:
//! tap, saved, search.

use crate::candidate::dedupe::{preferred, same_entity};
use crate::candidate::LocationCandidate;
use tracing::debug;

/// Merge the three sources into a fresh, deduplicated, distance-ranked list
///
/// Inputs are small (tens of items) so duplicates are found with a plain
/// pairwise scan.
pub fn merge(
    tapped: Option<LocationCandidate>,
    saved: Vec<LocationCandidate>,
    search: Vec<LocationCandidate>,
) -> Vec<LocationCandidate> {
    let mut result: Vec<LocationCandidate> = Vec::with_capacity(1 + saved.len() + search.len());

    if let Some(tapped) = tapped {
        result.push(tapped.with_distance(0.0));
    }
    for candidate in saved.into_iter().chain(search) {
        keep_unique(&mut result, candidate);
    }

    result.sort_by(|a, b| a.distance_meters.total_cmp(&b.distance_meters));
    result
}

/// Add `candidate` unless it duplicates a kept entry, replacing that entry
/// when `candidate` has higher authority
fn keep_unique(result: &mut Vec<LocationCandidate>, candidate: LocationCandidate) {
    let matches: Vec<usize> = result
        .iter()
        .enumerate()
        .filter(|(_, existing)| same_entity(existing, &candidate))
        .map(|(idx, _)| idx)
        .collect();

    let Some(&first) = matches.first() else {
        result.push(candidate);
        return;
    };

    if matches.len() > 1 {
        debug!(
            candidate = %candidate.id,
            matches = matches.len(),
            "Ambiguous duplicate, keeping highest-priority existing entry"
        );
    }

    let existing = &result[first];
    if std::ptr::eq(preferred(existing, &candidate), existing) {
        debug!(dropped = %candidate.id, kept = %existing.id, "Dropping duplicate candidate");
    } else {
        debug!(dropped = %existing.id, kept = %candidate.id, "Replacing duplicate candidate");
        result[first] = candidate;
    }
}
