//! Collaborator interfaces for participant lookup and meeting storage.
//!
//! The scheduler only depends on these traits; any database or service can
//! stand behind them. [`InMemoryStore`](crate::memory::InMemoryStore)
//! implements both for tests and the command-line tool.

use std::collections::BTreeSet;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use slot_engine::TimeInterval;
use thiserror::Error;

use crate::model::{MeetingId, ParticipantId, ScheduledMeeting};

/// Failures reported by a store collaborator. The scheduler propagates them
/// unchanged and never retries.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("store unavailable: {0}")]
    Unavailable(String),

    #[error("booking conflict: {0}")]
    Conflict(String),
}

/// Lookup of known participants.
#[async_trait]
pub trait ParticipantDirectory: Send + Sync {
    /// True iff every id resolves to a known participant.
    async fn participants_exist(&self, ids: &BTreeSet<ParticipantId>) -> Result<bool, StoreError>;
}

/// Storage of committed meetings.
#[async_trait]
pub trait MeetingStore: Send + Sync {
    /// Meetings with `start < window_end && end > window_start` that involve at
    /// least one of `participant_ids`. Order is unspecified.
    async fn find_overlapping_meetings(
        &self,
        participant_ids: &BTreeSet<ParticipantId>,
        window_start: DateTime<Utc>,
        window_end: DateTime<Utc>,
    ) -> Result<Vec<ScheduledMeeting>, StoreError>;

    /// Persist a new meeting and return its id.
    async fn insert_meeting(
        &self,
        interval: TimeInterval,
        participant_ids: &[ParticipantId],
    ) -> Result<MeetingId, StoreError>;
}
