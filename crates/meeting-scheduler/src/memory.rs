//! In-process store backing both collaborator traits.
//!
//! Participants live in an ordered map keyed by id; meetings in a vector that
//! holds each meeting's participant list. There is no back-reference from a
//! participant to its meetings: [`InMemoryStore::meetings_for`] filters.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use slot_engine::TimeInterval;
use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::model::{MeetingId, ParticipantId, ScheduledMeeting};
use crate::store::{MeetingStore, ParticipantDirectory, StoreError};

/// A person who can be invited to meetings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    pub id: ParticipantId,
    #[serde(default)]
    pub name: String,
}

/// Serializable contents of an [`InMemoryStore`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreSnapshot {
    #[serde(default)]
    pub participants: Vec<Participant>,
    #[serde(default)]
    pub meetings: Vec<ScheduledMeeting>,
}

#[derive(Debug)]
pub struct InMemoryStore {
    participants: RwLock<BTreeMap<ParticipantId, Participant>>,
    meetings: RwLock<Vec<ScheduledMeeting>>,
    next_id: AtomicU64,
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::from_snapshot(StoreSnapshot::default())
    }
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from a snapshot. New meeting ids continue after the
    /// highest id in the snapshot.
    pub fn from_snapshot(snapshot: StoreSnapshot) -> Self {
        let next_id = snapshot
            .meetings
            .iter()
            .map(|m| m.id.0 + 1)
            .max()
            .unwrap_or(1);
        let participants = snapshot
            .participants
            .into_iter()
            .map(|p| (p.id.clone(), p))
            .collect();

        Self {
            participants: RwLock::new(participants),
            meetings: RwLock::new(snapshot.meetings),
            next_id: AtomicU64::new(next_id),
        }
    }

    pub async fn snapshot(&self) -> StoreSnapshot {
        StoreSnapshot {
            participants: self.participants.read().await.values().cloned().collect(),
            meetings: self.meetings.read().await.clone(),
        }
    }

    /// Insert or replace a participant.
    pub async fn add_participant(&self, participant: Participant) {
        self.participants
            .write()
            .await
            .insert(participant.id.clone(), participant);
    }

    pub async fn participant(&self, id: &ParticipantId) -> Option<Participant> {
        self.participants.read().await.get(id).cloned()
    }

    /// Remove a participant. Their existing meetings are left untouched.
    pub async fn remove_participant(&self, id: &ParticipantId) -> Option<Participant> {
        self.participants.write().await.remove(id)
    }

    /// All meetings involving `participant`, sorted by start.
    pub async fn meetings_for(&self, participant: &ParticipantId) -> Vec<ScheduledMeeting> {
        let mut found: Vec<ScheduledMeeting> = self
            .meetings
            .read()
            .await
            .iter()
            .filter(|m| m.involves(participant))
            .cloned()
            .collect();
        found.sort_by_key(|m| m.interval);
        found
    }

    pub async fn meeting_count(&self) -> usize {
        self.meetings.read().await.len()
    }
}

#[async_trait]
impl ParticipantDirectory for InMemoryStore {
    async fn participants_exist(&self, ids: &BTreeSet<ParticipantId>) -> Result<bool, StoreError> {
        let participants = self.participants.read().await;
        Ok(ids.iter().all(|id| participants.contains_key(id)))
    }
}

#[async_trait]
impl MeetingStore for InMemoryStore {
    async fn find_overlapping_meetings(
        &self,
        participant_ids: &BTreeSet<ParticipantId>,
        window_start: DateTime<Utc>,
        window_end: DateTime<Utc>,
    ) -> Result<Vec<ScheduledMeeting>, StoreError> {
        let meetings = self.meetings.read().await;
        Ok(meetings
            .iter()
            .filter(|m| m.interval.intersects_window(window_start, window_end))
            .filter(|m| m.involves_any(participant_ids))
            .cloned()
            .collect())
    }

    async fn insert_meeting(
        &self,
        interval: TimeInterval,
        participant_ids: &[ParticipantId],
    ) -> Result<MeetingId, StoreError> {
        let mut meetings = self.meetings.write().await;

        // Check and insert under the same write lock.
        if let Some(clash) = meetings.iter().find(|m| {
            m.interval.overlaps(&interval) && participant_ids.iter().any(|p| m.involves(p))
        }) {
            warn!(existing = %clash.id, start = %interval.start(), "rejecting double booking");
            return Err(StoreError::Conflict(format!(
                "overlaps meeting {} ({} - {})",
                clash.id,
                clash.interval.start(),
                clash.interval.end()
            )));
        }

        let id = MeetingId(self.next_id.fetch_add(1, Ordering::Relaxed));
        meetings.push(ScheduledMeeting {
            id,
            interval,
            participant_ids: participant_ids.to_vec(),
        });
        debug!(meeting_id = %id, "meeting stored");
        Ok(id)
    }
}
