//! Error types for slot-engine operations.

use chrono::{DateTime, NaiveTime, Utc};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("Invalid interval: start {start} is not before end {end}")]
    InvalidInterval {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },

    #[error("Invalid business hours: start of day {start} is not before end of day {end}")]
    InvalidBusinessHours { start: NaiveTime, end: NaiveTime },
}

pub type Result<T> = std::result::Result<T, EngineError>;
