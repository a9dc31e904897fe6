//! Daily business-hours window.
//!
//! All instants are interpreted in UTC; a calendar day is a UTC date. The
//! window is shared by every participant of a scheduling call and is passed
//! in explicitly rather than read from process-wide state.

use chrono::{DateTime, Days, NaiveDate, NaiveTime, Utc};

use crate::error::{EngineError, Result};
use crate::interval::TimeInterval;

/// The daily `[start_of_day, end_of_day]` window in which meetings may be held.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BusinessHours {
    start_of_day: NaiveTime,
    end_of_day: NaiveTime,
}

impl BusinessHours {
    /// # Errors
    /// Returns `EngineError::InvalidBusinessHours` unless `start_of_day < end_of_day`.
    pub fn new(start_of_day: NaiveTime, end_of_day: NaiveTime) -> Result<Self> {
        if start_of_day >= end_of_day {
            return Err(EngineError::InvalidBusinessHours {
                start: start_of_day,
                end: end_of_day,
            });
        }
        Ok(Self {
            start_of_day,
            end_of_day,
        })
    }

    pub fn start_of_day(&self) -> NaiveTime {
        self.start_of_day
    }

    pub fn end_of_day(&self) -> NaiveTime {
        self.end_of_day
    }

    /// Length of one business day.
    pub fn day_length(&self) -> chrono::Duration {
        self.end_of_day - self.start_of_day
    }

    /// Move `instant` forward to the nearest instant inside business hours.
    ///
    /// Before the start of day it snaps to the same day's opening; after the
    /// end of day it snaps to the next day's opening. Instants inside the
    /// window, including exactly `end_of_day`, are returned unchanged.
    pub fn clamp(&self, instant: DateTime<Utc>) -> DateTime<Utc> {
        let date = instant.date_naive();
        let time = instant.time();
        if time < self.start_of_day {
            self.opening(date)
        } else if time > self.end_of_day {
            match date.checked_add_days(Days::new(1)) {
                Some(next) => self.opening(next),
                None => instant,
            }
        } else {
            instant
        }
    }

    /// True iff `start` and `end` fall on the same calendar day and the range
    /// sits between the start and end of that day's business hours.
    ///
    /// A range crossing midnight or running past closing is rejected; it is
    /// never split.
    pub fn contains(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> bool {
        start.date_naive() == end.date_naive()
            && start.time() >= self.start_of_day
            && end.time() <= self.end_of_day
    }

    pub fn contains_interval(&self, interval: &TimeInterval) -> bool {
        self.contains(interval.start(), interval.end())
    }

    /// Earliest `duration`-long interval inside business hours starting at or
    /// after `cursor`.
    ///
    /// When the clamped cursor leaves too little of its day, the slot moves
    /// to the next day's opening. Returns `None` when the duration is not
    /// positive or longer than a whole business day.
    pub fn place(
        &self,
        cursor: DateTime<Utc>,
        duration: chrono::Duration,
    ) -> Option<TimeInterval> {
        if duration > self.day_length() {
            return None;
        }
        let start = self.clamp(cursor);
        let candidate = TimeInterval::starting_at(start, duration).ok()?;
        if self.contains_interval(&candidate) {
            return Some(candidate);
        }

        let next_day = start.date_naive().checked_add_days(Days::new(1))?;
        let candidate = TimeInterval::starting_at(self.opening(next_day), duration).ok()?;
        self.contains_interval(&candidate).then_some(candidate)
    }

    fn opening(&self, date: NaiveDate) -> DateTime<Utc> {
        date.and_time(self.start_of_day).and_utc()
    }
}

impl Default for BusinessHours {
    /// 09:00 to 17:00.
    fn default() -> Self {
        Self {
            start_of_day: NaiveTime::MIN + chrono::Duration::hours(9),
            end_of_day: NaiveTime::MIN + chrono::Duration::hours(17),
        }
    }
}
