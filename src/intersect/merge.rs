//! Merging of per-pass results into one result per input feature.

use geojson::Feature;

use super::{empty_results, IntersectResult};

/// True if an equivalent tag is already present, comparing
/// case-insensitively.
pub(crate) fn contains_tag(tags: &[String], candidate: &str) -> bool {
    let candidate = candidate.to_lowercase();
    tags.iter().any(|tag| tag.to_lowercase() == candidate)
}

/// Push a tag unless an equivalent one was already recorded. The first-seen
/// casing is the one that sticks.
pub(crate) fn add_distinct_tag(tags: &mut Vec<String>, candidate: &str) {
    if !contains_tag(tags, candidate) {
        tags.push(candidate.to_string());
    }
}

/// Merge pass results into one entry per input feature.
///
/// Every pass must hand back exactly one result per input feature in input
/// order; merging zips on that slot. Tags union case-insensitively with the
/// first-seen casing kept; the intersects-with lists concatenate without
/// deduplication.
pub(crate) fn merge_results(
    to_check: &[Feature],
    passes: Vec<Vec<IntersectResult>>,
) -> Vec<IntersectResult> {
    let mut merged = empty_results(to_check);

    for pass in passes {
        debug_assert_eq!(pass.len(), merged.len());
        for (slot, partial) in pass.into_iter().enumerate() {
            let result = &mut merged[slot];
            for tag in partial.tags {
                add_distinct_tag(&mut result.tags, &tag);
            }
            result.intersects_with.extend(partial.intersects_with);
        }
    }

    merged
}
