//! Identifiers, requests and results of a scheduling call.

use std::collections::BTreeSet;
use std::fmt;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use slot_engine::TimeInterval;

/// Opaque identifier of a participant known to the directory.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParticipantId(String);

impl ParticipantId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ParticipantId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for ParticipantId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Identifier assigned by the store when a meeting is inserted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MeetingId(pub u64);

impl fmt::Display for MeetingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A request to book `duration_minutes` for every participant somewhere in
/// `[earliest_start, latest_end]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchedulingRequest {
    pub participant_ids: BTreeSet<ParticipantId>,
    pub duration_minutes: u32,
    pub earliest_start: DateTime<Utc>,
    pub latest_end: DateTime<Utc>,
}

impl SchedulingRequest {
    pub fn new<I, P>(
        participant_ids: I,
        duration_minutes: u32,
        earliest_start: DateTime<Utc>,
        latest_end: DateTime<Utc>,
    ) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<ParticipantId>,
    {
        Self {
            participant_ids: participant_ids.into_iter().map(Into::into).collect(),
            duration_minutes,
            earliest_start,
            latest_end,
        }
    }

    pub fn duration(&self) -> Duration {
        Duration::minutes(i64::from(self.duration_minutes))
    }
}

/// A committed meeting. Meetings own the list of their participants;
/// a participant's meetings are found by querying the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledMeeting {
    pub id: MeetingId,
    pub interval: TimeInterval,
    pub participant_ids: Vec<ParticipantId>,
}

impl ScheduledMeeting {
    pub fn involves(&self, participant: &ParticipantId) -> bool {
        self.participant_ids.contains(participant)
    }

    pub fn involves_any(&self, participants: &BTreeSet<ParticipantId>) -> bool {
        self.participant_ids.iter().any(|p| participants.contains(p))
    }
}

/// Result of a well-formed scheduling call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScheduleOutcome {
    /// A slot was found and the meeting has been stored.
    Scheduled(ScheduledMeeting),
    /// No slot inside the window satisfies every constraint. Nothing was stored.
    NoSlot,
}

impl ScheduleOutcome {
    pub fn meeting(&self) -> Option<&ScheduledMeeting> {
        match self {
            ScheduleOutcome::Scheduled(meeting) => Some(meeting),
            ScheduleOutcome::NoSlot => None,
        }
    }

    pub fn is_no_slot(&self) -> bool {
        matches!(self, ScheduleOutcome::NoSlot)
    }
}
