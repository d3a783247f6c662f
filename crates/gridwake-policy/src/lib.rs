//! gridwake-policy — demand-driven admission control for labeled nodes.
//!
//! Decides, per offline candidate node, whether it should be brought
//! online right now and whether operator-initiated activation is allowed.
//! Two checks drive every decision:
//!
//! - Capacity: is the candidate's label already at its configured ceiling
//!   of simultaneously Online-or-Connecting nodes?
//! - Demand: is there a buildable queue item that no currently idle node
//!   can serve, but the candidate can?
//!
//! # Architecture
//!
//! ```text
//! RetentionPolicy::check(candidate, fleet, control, queue guard)
//!   ├── capacity::count_active   (label occupancy over one snapshot)
//!   ├── demand::has_unmet_demand (greedy one-pass matcher)
//!   └── FleetControl::request_connect (fire-and-forget activation)
//! ```
//!
//! The policy holds no mutable state; every call re-reads fleet and queue
//! snapshots under the caller-held queue guard.

pub mod capacity;
pub mod demand;
pub mod error;
pub mod retention;

pub use capacity::count_active;
pub use demand::has_unmet_demand;
pub use error::{PolicyError, PolicyResult};
pub use retention::{CHECK_INTERVAL, RetentionPolicy};
