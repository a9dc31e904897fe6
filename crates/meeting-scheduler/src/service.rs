//! Meeting scheduler - validation, busy collection, slot search and booking.

use std::collections::BTreeSet;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use slot_engine::{find_earliest_slot, free_gaps, merge_intervals, BusinessHours, TimeInterval};
use tracing::{info, instrument, warn};

use crate::collector::collect_busy_intervals;
use crate::error::{Result, SchedulerError};
use crate::locks::ParticipantLocks;
use crate::model::{ParticipantId, ScheduleOutcome, ScheduledMeeting, SchedulingRequest};
use crate::store::{MeetingStore, ParticipantDirectory};

/// Merged busy time and free gaps of a participant set inside a window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Availability {
    pub busy: Vec<TimeInterval>,
    pub free: Vec<TimeInterval>,
}

pub struct MeetingScheduler {
    directory: Arc<dyn ParticipantDirectory>,
    store: Arc<dyn MeetingStore>,
    hours: BusinessHours,
    locks: ParticipantLocks,
}

impl MeetingScheduler {
    /// Create a scheduler using `hours` for every call that does not pass its own.
    pub fn new(
        directory: Arc<dyn ParticipantDirectory>,
        store: Arc<dyn MeetingStore>,
        hours: BusinessHours,
    ) -> Self {
        Self {
            directory,
            store,
            hours,
            locks: ParticipantLocks::new(),
        }
    }

    pub fn business_hours(&self) -> &BusinessHours {
        &self.hours
    }

    /// Book the earliest common slot for `request` using the scheduler's
    /// business hours.
    ///
    /// # Errors
    /// Malformed requests fail with the matching `SchedulerError` variant
    /// before anything is locked or stored. Store failures surface as
    /// `SchedulerError::Store`. No meeting is stored on any error.
    pub async fn schedule(&self, request: &SchedulingRequest) -> Result<ScheduleOutcome> {
        self.schedule_with_hours(request, &self.hours).await
    }

    /// Like [`schedule`](Self::schedule) with per-call business hours.
    ///
    /// # Errors
    /// See [`schedule`](Self::schedule).
    #[instrument(
        skip_all,
        fields(
            participants = request.participant_ids.len(),
            duration_minutes = request.duration_minutes,
            earliest_start = %request.earliest_start,
            latest_end = %request.latest_end,
        )
    )]
    pub async fn schedule_with_hours(
        &self,
        request: &SchedulingRequest,
        hours: &BusinessHours,
    ) -> Result<ScheduleOutcome> {
        validate_request(request)?;
        self.ensure_participants_exist(&request.participant_ids)
            .await?;

        let _guard = self.locks.acquire(&request.participant_ids).await;

        let busy = collect_busy_intervals(
            self.store.as_ref(),
            &request.participant_ids,
            request.earliest_start,
            request.latest_end,
        )
        .await?;
        let merged = merge_intervals(&busy);

        let Some(slot) = find_earliest_slot(
            &merged,
            request.duration(),
            request.earliest_start,
            request.latest_end,
            hours,
        ) else {
            info!(busy_blocks = merged.len(), "no slot available");
            return Ok(ScheduleOutcome::NoSlot);
        };

        let participant_ids: Vec<ParticipantId> =
            request.participant_ids.iter().cloned().collect();
        let id = self
            .store
            .insert_meeting(slot, &participant_ids)
            .await
            .inspect_err(|e| warn!(error = %e, "failed to store meeting"))?;

        info!(meeting_id = %id, start = %slot.start(), end = %slot.end(), "meeting scheduled");
        Ok(ScheduleOutcome::Scheduled(ScheduledMeeting {
            id,
            interval: slot,
            participant_ids,
        }))
    }

    /// Merged busy blocks and free gaps for `participant_ids` inside
    /// `[window_start, window_end)`. Business hours are not applied.
    ///
    /// # Errors
    /// Same request validation as scheduling, minus the duration check.
    #[instrument(skip_all, fields(participants = participant_ids.len()))]
    pub async fn availability(
        &self,
        participant_ids: &BTreeSet<ParticipantId>,
        window_start: DateTime<Utc>,
        window_end: DateTime<Utc>,
    ) -> Result<Availability> {
        validate_participants(participant_ids)?;
        validate_window(window_start, window_end)?;
        self.ensure_participants_exist(participant_ids).await?;

        let busy =
            collect_busy_intervals(self.store.as_ref(), participant_ids, window_start, window_end)
                .await?;
        let merged = merge_intervals(&busy);
        let free = free_gaps(&merged, window_start, window_end);

        // Report busy time as seen from inside the window.
        let busy = merged
            .iter()
            .filter_map(|b| {
                TimeInterval::new(b.start().max(window_start), b.end().min(window_end)).ok()
            })
            .collect();

        Ok(Availability { busy, free })
    }

    async fn ensure_participants_exist(&self, ids: &BTreeSet<ParticipantId>) -> Result<()> {
        if self.directory.participants_exist(ids).await? {
            return Ok(());
        }
        let listed = ids
            .iter()
            .map(ParticipantId::as_str)
            .collect::<Vec<_>>()
            .join(", ");
        warn!(participants = %listed, "request names unknown participants");
        Err(SchedulerError::InvalidParticipants(listed))
    }
}

/// Checks that need no I/O, in order: participants, duration, window.
///
/// A duration longer than the window is not an error here; the search simply
/// finds no slot.
fn validate_request(request: &SchedulingRequest) -> Result<()> {
    validate_participants(&request.participant_ids)?;
    if request.duration_minutes == 0 {
        return Err(SchedulerError::InvalidDuration(request.duration_minutes));
    }
    validate_window(request.earliest_start, request.latest_end)
}

fn validate_participants(ids: &BTreeSet<ParticipantId>) -> Result<()> {
    if ids.is_empty() {
        return Err(SchedulerError::EmptyParticipants);
    }
    Ok(())
}

fn validate_window(earliest_start: DateTime<Utc>, latest_end: DateTime<Utc>) -> Result<()> {
    if earliest_start >= latest_end {
        return Err(SchedulerError::InvalidTimeWindow {
            earliest_start,
            latest_end,
        });
    }
    Ok(())
}
