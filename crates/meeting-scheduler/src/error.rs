//! Error types for meeting-scheduler operations.

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::store::StoreError;

/// Why a scheduling call failed.
///
/// Finding no free slot is not listed here; see
/// [`ScheduleOutcome::NoSlot`](crate::model::ScheduleOutcome::NoSlot).
#[derive(Error, Debug)]
pub enum SchedulerError {
    #[error("No participants given")]
    EmptyParticipants,

    #[error("Unknown participants in request: {0}")]
    InvalidParticipants(String),

    #[error("Invalid time window: earliest start {earliest_start} is not before latest end {latest_end}")]
    InvalidTimeWindow {
        earliest_start: DateTime<Utc>,
        latest_end: DateTime<Utc>,
    },

    #[error("Invalid duration: {0} minutes")]
    InvalidDuration(u32),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl SchedulerError {
    /// True for errors caused by the request itself rather than by the store
    /// or the process configuration. These are never worth retrying.
    pub fn is_invalid_request(&self) -> bool {
        matches!(
            self,
            SchedulerError::EmptyParticipants
                | SchedulerError::InvalidParticipants(_)
                | SchedulerError::InvalidTimeWindow { .. }
                | SchedulerError::InvalidDuration(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, SchedulerError>;
