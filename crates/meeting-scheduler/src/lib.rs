//! # meeting-scheduler
//!
//! Books a meeting into the earliest slot that every participant has free.
//!
//! The scheduler validates a [`SchedulingRequest`], checks the participants
//! against a [`ParticipantDirectory`], pulls their existing commitments from a
//! [`MeetingStore`], and hands the busy intervals to `slot-engine` for the
//! search. A found slot is persisted before being returned.
//!
//! A well-formed request that simply has no room is not an error: it comes
//! back as [`ScheduleOutcome::NoSlot`]. Malformed requests and store failures
//! are [`SchedulerError`]s.
//!
//! ## Modules
//!
//! - [`model`] — Identifiers, requests, meetings and outcomes
//! - [`store`] — Collaborator traits for participant lookup and meeting storage
//! - [`memory`] — In-process store implementing both traits
//! - [`collector`] — Busy-interval collection for a search window
//! - [`locks`] — Per-participant serialization of concurrent bookings
//! - [`service`] — `MeetingScheduler`, the orchestrator
//! - [`config`] — TOML/env configuration of business hours
//! - [`error`] — Error types

pub mod collector;
pub mod config;
pub mod error;
pub mod locks;
pub mod memory;
pub mod model;
pub mod service;
pub mod store;

pub use config::SchedulerConfig;
pub use error::SchedulerError;
pub use memory::{InMemoryStore, Participant, StoreSnapshot};
pub use model::{MeetingId, ParticipantId, ScheduleOutcome, ScheduledMeeting, SchedulingRequest};
pub use service::{Availability, MeetingScheduler};
pub use store::{MeetingStore, ParticipantDirectory, StoreError};

pub use slot_engine::{BusinessHours, TimeInterval};
