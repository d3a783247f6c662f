//! Queue collaborator traits and the exclusive queue lock.
//!
//! The build queue is guarded by one exclusive lock in the surrounding
//! system. Rather than documenting "callers must hold the queue lock",
//! the lock is part of the API: queue contents are only reachable through
//! a [`QueueGuard`], and the policy entry points take the guard by
//! reference. A decision made without the lock is unrepresentable.

use std::ops::Deref;
use std::sync::{Mutex, MutexGuard};

use crate::types::{NodeSnapshot, RunDecision};

/// A pending unit of work awaiting execution.
pub trait WorkItem {
    /// Stable identifier, used for logging.
    fn id(&self) -> &str;

    /// Whether `node` can take this item, given its assignable labels and
    /// whatever other constraints the queue substrate owns.
    fn can_run_on(&self, node: &NodeSnapshot) -> RunDecision;
}

/// Read surface of the build queue.
pub trait QueueSource {
    type Item: WorkItem;

    /// Snapshot of the currently buildable items — ready to run, not
    /// blocked by unmet dependencies — in queue order.
    fn buildable_items(&self) -> Vec<Self::Item>;
}

/// The queue's exclusive lock.
///
/// Wraps the queue source; [`QueueLock::lock`] is the only way to reach
/// it. Hold the guard for the whole decision so capacity counting and
/// demand matching observe one consistent queue.
#[derive(Debug)]
pub struct QueueLock<Q> {
    inner: Mutex<Q>,
}

impl<Q> QueueLock<Q> {
    pub fn new(queue: Q) -> Self {
        Self {
            inner: Mutex::new(queue),
        }
    }

    /// Acquire the exclusive lock, blocking until available.
    pub fn lock(&self) -> QueueGuard<'_, Q> {
        // The queue source behind the lock is only read through this
        // guard, so a poisoned lock still holds consistent data.
        QueueGuard(self.inner.lock().unwrap_or_else(|e| e.into_inner()))
    }
}

/// Proof that the queue's exclusive lock is held.
pub struct QueueGuard<'a, Q>(MutexGuard<'a, Q>);

impl<Q> Deref for QueueGuard<'_, Q> {
    type Target = Q;

    fn deref(&self) -> &Q {
        &self.0
    }
}
