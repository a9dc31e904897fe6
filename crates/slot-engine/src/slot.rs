//! Earliest-slot search over a merged busy list.
//!
//! The cursor starts at the clamped window start and only ever moves forward:
//! past each busy interval it collides with, and past closing time to the next
//! day's opening. The first candidate that fits before the next busy interval
//! is therefore the earliest feasible slot.

use chrono::{DateTime, Duration, Utc};
use tracing::debug;

use crate::hours::BusinessHours;
use crate::interval::TimeInterval;

/// Find the earliest `duration`-long slot free of every busy interval.
///
/// `merged_busy` must be sorted and pairwise separated, as returned by
/// [`merge_intervals`](crate::merge::merge_intervals). The slot starts no
/// earlier than `earliest_start`, ends no later than `latest_end` (both
/// clamped to business hours) and lies inside a single business day.
///
/// Returns `None` when no such slot exists. That is an expected outcome, not
/// a fault: it covers windows shorter than `duration` as well as fully booked
/// ones.
pub fn find_earliest_slot(
    merged_busy: &[TimeInterval],
    duration: Duration,
    earliest_start: DateTime<Utc>,
    latest_end: DateTime<Utc>,
    hours: &BusinessHours,
) -> Option<TimeInterval> {
    let search_start = hours.clamp(earliest_start);
    let search_end = hours.clamp(latest_end);

    if duration <= Duration::zero()
        || search_start >= search_end
        || search_start + duration > search_end
    {
        debug!(
            %search_start,
            %search_end,
            duration_minutes = duration.num_minutes(),
            "search window cannot hold slot"
        );
        return None;
    }

    let mut cursor = search_start;
    for busy in merged_busy {
        let candidate = hours.place(cursor, duration)?;
        if candidate.end() > search_end {
            return None;
        }
        if candidate.end() <= busy.start() {
            return Some(candidate);
        }

        // Busy intervals that end before the candidate (e.g. an evening
        // commitment when the candidate rolled to the next morning) leave the
        // cursor where it is.
        cursor = candidate.start().max(busy.end());
        if cursor >= search_end {
            return None;
        }
    }

    // Trailing gap after the last busy interval.
    let candidate = hours.place(cursor, duration)?;
    (candidate.end() <= search_end).then_some(candidate)
}

/// List the gaps between merged busy intervals inside `[window_start, window_end)`.
///
/// Busy intervals are clipped to the window. Returns the gaps sorted by start;
/// an empty busy list yields the whole window, an inverted window yields
/// nothing. Business hours are not applied here.
pub fn free_gaps(
    merged_busy: &[TimeInterval],
    window_start: DateTime<Utc>,
    window_end: DateTime<Utc>,
) -> Vec<TimeInterval> {
    let mut gaps = Vec::new();
    let mut cursor = window_start;

    for busy in merged_busy {
        if !busy.intersects_window(window_start, window_end) {
            continue;
        }
        if let Ok(gap) = TimeInterval::new(cursor, busy.start()) {
            gaps.push(gap);
        }
        cursor = cursor.max(busy.end());
    }

    if let Ok(gap) = TimeInterval::new(cursor, window_end) {
        gaps.push(gap);
    }

    gaps
}
