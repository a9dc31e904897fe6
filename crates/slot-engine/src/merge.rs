//! Collapse busy intervals into a minimal sorted list.
//!
//! Sorts by start time, then folds left, extending the current interval while
//! the next one overlaps or touches it.

use crate::interval::TimeInterval;

/// Merge overlapping or adjacent intervals.
///
/// Returns intervals sorted by start where every consecutive pair is
/// separated by a strictly positive gap (`a.end < b.start`). The union of
/// covered instants is unchanged. Duplicates are harmless.
pub fn merge_intervals(intervals: &[TimeInterval]) -> Vec<TimeInterval> {
    let mut sorted = intervals.to_vec();
    sorted.sort_by_key(|i| (i.start(), i.end()));

    let mut merged: Vec<TimeInterval> = Vec::with_capacity(sorted.len());
    for next in sorted {
        if let Some(current) = merged.last_mut() {
            // Touching, not only overlapping, so back-to-back meetings collapse too.
            if current.touches(&next) {
                current.extend_to(next.end());
                continue;
            }
        }
        merged.push(next);
    }

    merged
}
