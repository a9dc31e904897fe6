//! Scheduler configuration.
//!
//! Business hours are read once at process start from a TOML file, optionally
//! overridden from the environment, and then passed by value into the
//! [`MeetingScheduler`](crate::service::MeetingScheduler).
//!
//! ```toml
//! [business_hours]
//! start = "09:00"
//! end = "17:00"
//! ```

use std::fs;
use std::path::Path;

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use slot_engine::BusinessHours;

use crate::error::{Result, SchedulerError};

/// Environment variable overriding `business_hours.start`.
pub const DAY_START_ENV: &str = "SLOTFIND_DAY_START";
/// Environment variable overriding `business_hours.end`.
pub const DAY_END_ENV: &str = "SLOTFIND_DAY_END";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchedulerConfig {
    #[serde(default)]
    pub business_hours: BusinessHoursConfig,
}

/// Opening and closing time as `HH:MM` (or `HH:MM:SS`) strings, in UTC.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusinessHoursConfig {
    #[serde(default = "default_start")]
    pub start: String,
    #[serde(default = "default_end")]
    pub end: String,
}

fn default_start() -> String {
    "09:00".to_string()
}

fn default_end() -> String {
    "17:00".to_string()
}

impl Default for BusinessHoursConfig {
    fn default() -> Self {
        Self {
            start: default_start(),
            end: default_end(),
        }
    }
}

impl SchedulerConfig {
    /// Load configuration from a TOML file.
    ///
    /// # Errors
    /// Returns `SchedulerError::Config` if the file cannot be read or parsed.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| {
            SchedulerError::Config(format!(
                "Failed to read config file {}: {}",
                path.as_ref().display(),
                e
            ))
        })?;
        Self::from_toml_str(&content)
    }

    /// # Errors
    /// Returns `SchedulerError::Config` if `content` is not valid TOML for this schema.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content)
            .map_err(|e| SchedulerError::Config(format!("Failed to parse config: {}", e)))
    }

    /// Apply `SLOTFIND_DAY_START` / `SLOTFIND_DAY_END` from the process environment.
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides_from(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary key lookup (the environment in production).
    pub fn with_overrides_from<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(start) = lookup(DAY_START_ENV) {
            self.business_hours.start = start;
        }
        if let Some(end) = lookup(DAY_END_ENV) {
            self.business_hours.end = end;
        }
        self
    }

    /// Parse and validate the configured business hours.
    ///
    /// # Errors
    /// Returns `SchedulerError::Config` for unparseable times or when the
    /// start is not before the end.
    pub fn business_hours(&self) -> Result<BusinessHours> {
        let start = parse_time_of_day(&self.business_hours.start)?;
        let end = parse_time_of_day(&self.business_hours.end)?;
        BusinessHours::new(start, end).map_err(|e| SchedulerError::Config(e.to_string()))
    }
}

fn parse_time_of_day(value: &str) -> Result<NaiveTime> {
    let value = value.trim();
    NaiveTime::parse_from_str(value, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M:%S"))
        .map_err(|e| SchedulerError::Config(format!("Invalid time of day '{}': {}", value, e)))
}
