//! gridwake-state — cluster-state surface for the gridwake policy.
//!
//! Defines the read-only view the admission-control policy evaluates
//! against: node snapshots with power state, labels, and idle executor
//! counts, plus the collaborator traits the surrounding cluster substrate
//! implements (`FleetView`, `FleetControl`, `QueueSource`, `WorkItem`).
//!
//! # Architecture
//!
//! The policy never owns fleet or queue state. It reads one consistent
//! snapshot per decision: `FleetView::snapshot` serializes fleet
//! enumeration internally, and queue access only exists behind a
//! [`QueueGuard`], so every decision is made under the queue's exclusive
//! lock by construction.

pub mod fleet;
pub mod queue;
pub mod types;

pub use fleet::{FleetControl, FleetView, MemoryFleet};
pub use queue::{QueueGuard, QueueLock, QueueSource, WorkItem};
pub use types::*;
