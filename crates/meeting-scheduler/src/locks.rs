//! Per-participant serialization of bookings.
//!
//! Reading busy intervals and inserting the new meeting must not interleave
//! with another booking for an overlapping participant set, or both could
//! see the same gap and double-book it. Each participant gets an async mutex;
//! a booking holds the mutexes of all its participants for the whole
//! read-then-insert sequence. Disjoint participant sets proceed in parallel.
//!
//! This only serializes callers sharing one [`ParticipantLocks`], i.e. one
//! process. Stores shared across processes must reject overlaps themselves.

use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use tokio::sync::{Mutex, OwnedMutexGuard};

use crate::model::ParticipantId;

#[derive(Debug, Default)]
pub struct ParticipantLocks {
    registry: Mutex<HashMap<ParticipantId, Arc<Mutex<()>>>>,
}

/// Holds the locks of a participant set until dropped.
#[derive(Debug)]
pub struct ParticipantGuard {
    _guards: Vec<OwnedMutexGuard<()>>,
}

impl ParticipantLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lock every participant in `ids`.
    ///
    /// Locks are taken in ascending id order (the set's iteration order), so
    /// two callers can never wait on each other in a cycle.
    pub async fn acquire(&self, ids: &BTreeSet<ParticipantId>) -> ParticipantGuard {
        let mutexes: Vec<Arc<Mutex<()>>> = {
            let mut registry = self.registry.lock().await;
            // Drop entries nobody holds or waits on.
            registry.retain(|_, mutex| Arc::strong_count(mutex) > 1);
            ids.iter()
                .map(|id| Arc::clone(registry.entry(id.clone()).or_default()))
                .collect()
        };

        let mut guards = Vec::with_capacity(mutexes.len());
        for mutex in mutexes {
            guards.push(mutex.lock_owned().await);
        }
        ParticipantGuard { _guards: guards }
    }

    /// Number of participants currently tracked.
    pub async fn tracked(&self) -> usize {
        self.registry.lock().await.len()
    }
}
