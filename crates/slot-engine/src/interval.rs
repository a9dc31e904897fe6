//! Half-open time intervals.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};

/// A half-open time range `[start, end)` with `start < end`.
///
/// Used both for existing commitments and for proposed meeting slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "RawInterval", into = "RawInterval")]
pub struct TimeInterval {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl TimeInterval {
    /// Create an interval, rejecting empty or inverted ranges.
    ///
    /// # Errors
    /// Returns `EngineError::InvalidInterval` if `start >= end`.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self> {
        if start >= end {
            return Err(EngineError::InvalidInterval { start, end });
        }
        Ok(Self { start, end })
    }

    /// Create an interval of `duration` starting at `start`.
    ///
    /// # Errors
    /// Returns `EngineError::InvalidInterval` if `duration` is not positive.
    pub fn starting_at(start: DateTime<Utc>, duration: Duration) -> Result<Self> {
        Self::new(start, start + duration)
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    /// True when the two ranges share at least one instant.
    ///
    /// Back-to-back intervals (`a.end == b.start`) do not overlap.
    pub fn overlaps(&self, other: &TimeInterval) -> bool {
        self.start < other.end && self.end > other.start
    }

    /// True when the two ranges overlap or are directly adjacent, i.e. they
    /// can be merged into one interval without covering any new instant.
    pub fn touches(&self, other: &TimeInterval) -> bool {
        self.start <= other.end && other.start <= self.end
    }

    pub fn contains_instant(&self, instant: DateTime<Utc>) -> bool {
        self.start <= instant && instant < self.end
    }

    /// True when `[start, end)` intersects this interval. Used to decide
    /// whether a commitment is relevant to a search window.
    pub fn intersects_window(
        &self,
        window_start: DateTime<Utc>,
        window_end: DateTime<Utc>,
    ) -> bool {
        self.start < window_end && self.end > window_start
    }

    /// Push the end of this interval out to `end` if that is later.
    pub(crate) fn extend_to(&mut self, end: DateTime<Utc>) {
        self.end = self.end.max(end);
    }
}

#[derive(Serialize, Deserialize)]
struct RawInterval {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl TryFrom<RawInterval> for TimeInterval {
    type Error = EngineError;

    fn try_from(raw: RawInterval) -> Result<Self> {
        TimeInterval::new(raw.start, raw.end)
    }
}

impl From<TimeInterval> for RawInterval {
    fn from(interval: TimeInterval) -> Self {
        RawInterval {
            start: interval.start,
            end: interval.end,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(hour: u32, min: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 2, hour, min, 0).unwrap()
    }

    #[test]
    fn rejects_empty_and_inverted_ranges() {
        assert!(TimeInterval::new(at(9, 0), at(9, 0)).is_err());
        assert!(TimeInterval::new(at(10, 0), at(9, 0)).is_err());
        assert!(TimeInterval::starting_at(at(9, 0), Duration::zero()).is_err());
    }

    #[test]
    fn adjacent_intervals_touch_but_do_not_overlap() {
        let a = TimeInterval::new(at(9, 0), at(10, 0)).unwrap();
        let b = TimeInterval::new(at(10, 0), at(11, 0)).unwrap();
        assert!(!a.overlaps(&b));
        assert!(a.touches(&b));
        assert!(b.touches(&a));
    }

    #[test]
    fn end_instant_is_excluded() {
        let a = TimeInterval::new(at(9, 0), at(10, 0)).unwrap();
        assert!(a.contains_instant(at(9, 0)));
        assert!(!a.contains_instant(at(10, 0)));
    }

    #[test]
    fn deserializing_inverted_interval_fails() {
        let json = r#"{"start":"2026-03-02T10:00:00Z","end":"2026-03-02T09:00:00Z"}"#;
        assert!(serde_json::from_str::<TimeInterval>(json).is_err());
    }
}
