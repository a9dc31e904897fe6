//! # slot-engine
//!
//! Deterministic earliest-common-slot search for meeting schedulers.
//!
//! Given the busy intervals of every participant, the engine merges them into
//! a minimal sorted busy list and scans forward from the start of a search
//! window for the first gap long enough to hold a meeting, never proposing a
//! slot that leaves the daily business-hours window.
//!
//! Everything here is pure and synchronous: no I/O, no shared state.
//!
//! ## Modules
//!
//! - [`interval`] — `TimeInterval`, a validated half-open `[start, end)` range
//! - [`merge`] — Collapse overlapping or touching intervals
//! - [`hours`] — `BusinessHours`, clamping and containment checks
//! - [`slot`] — Earliest-slot search and free-gap listing
//! - [`error`] — Error types

pub mod error;
pub mod hours;
pub mod interval;
pub mod merge;
pub mod slot;

pub use error::EngineError;
pub use hours::BusinessHours;
pub use interval::TimeInterval;
pub use merge::merge_intervals;
pub use slot::{find_earliest_slot, free_gaps};
