//! Busy-interval collection for a search window.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use slot_engine::TimeInterval;
use tracing::debug;

use crate::model::ParticipantId;
use crate::store::{MeetingStore, StoreError};

/// Fetch every commitment of `participant_ids` overlapping
/// `[window_start, window_end)` and return its interval.
///
/// One interval per meeting, unordered. A meeting shared by several
/// participants may appear more than once; merging normalizes that.
pub async fn collect_busy_intervals(
    store: &dyn MeetingStore,
    participant_ids: &BTreeSet<ParticipantId>,
    window_start: DateTime<Utc>,
    window_end: DateTime<Utc>,
) -> Result<Vec<TimeInterval>, StoreError> {
    let meetings = store
        .find_overlapping_meetings(participant_ids, window_start, window_end)
        .await?;

    let busy: Vec<TimeInterval> = meetings
        .into_iter()
        .map(|m| m.interval)
        .filter(|i| i.intersects_window(window_start, window_end))
        .collect();

    debug!(
        participants = participant_ids.len(),
        busy = busy.len(),
        "collected busy intervals"
    );
    Ok(busy)
}
