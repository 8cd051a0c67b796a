use std::{
    collections::HashMap,
    sync::{Arc, Mutex as StdMutex, PoisonError},
};

use tokio::sync::{Mutex, OwnedMutexGuard};
use uuid::Uuid;

type LockMap = HashMap<Uuid, Arc<Mutex<()>>>;

/// Per-event exclusive locks.
///
/// A mutation holds the guard for its whole read-validate-write sequence, so two
/// writers on the same event never interleave. Writers on different events do not
/// contend. An event's entry lives only while someone holds or waits for its lock.
#[derive(Debug, Default)]
pub struct EventLocks {
    locks: Arc<StdMutex<LockMap>>,
}

/// Holds one event's lock; the map entry is dropped with the last holder.
#[derive(Debug)]
pub struct EventLockGuard {
    event_id: Uuid,
    guard: Option<OwnedMutexGuard<()>>,
    locks: Arc<StdMutex<LockMap>>,
}

impl EventLocks {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn acquire(&self, event_id: Uuid) -> EventLockGuard {
        let lock = {
            let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
            locks.entry(event_id).or_default().clone()
        };

        // Built before awaiting so a cancelled waiter still cleans up its entry.
        let mut held = EventLockGuard {
            event_id,
            guard: None,
            locks: Arc::clone(&self.locks),
        };
        held.guard = Some(lock.lock_owned().await);
        held
    }

    /// Number of events that currently have a lock entry.
    pub fn tracked_events(&self) -> usize {
        self.locks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

impl Drop for EventLockGuard {
    fn drop(&mut self) {
        // The guard owns a clone of the mutex Arc; release it before counting.
        drop(self.guard.take());

        let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(lock) = locks.get(&self.event_id) {
            if Arc::strong_count(lock) == 1 {
                locks.remove(&self.event_id);
            }
        }
    }
}
