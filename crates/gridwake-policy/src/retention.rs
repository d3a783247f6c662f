//! Retention decision engine — the public policy surface.
//!
//! One `RetentionPolicy` binds a label to its capacity ceiling and is
//! evaluated against a specific offline candidate node. The engine is
//! stateless between calls: every evaluation re-reads fleet and queue
//! snapshots under the caller-held queue guard.

use std::time::Duration;

use tracing::{debug, info, warn};

use gridwake_state::{
    FleetControl, FleetView, LabelId, NodeId, NodePower, QueueGuard, QueueSource,
};

use crate::capacity::count_active;
use crate::demand::has_unmet_demand;
use crate::error::{PolicyError, PolicyResult};

/// How soon the driver should re-run `check` for a candidate. Activation
/// failures surface as the node simply still being Offline next tick, so
/// the interval doubles as the implicit retry cadence.
pub const CHECK_INTERVAL: Duration = Duration::from_secs(60);

/// Admission policy for one label: at most `ceiling` nodes carrying the
/// label may be Online or Connecting at once, and an offline candidate is
/// activated only for demand no idle node can absorb.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetentionPolicy {
    label: LabelId,
    ceiling: u32,
}

impl RetentionPolicy {
    /// Build a policy for `label` with the given ceiling.
    ///
    /// The label name is resolved against the fleet's registry; an
    /// unresolved name is a configuration error and the policy is not
    /// created.
    pub fn new(fleet: &dyn FleetView, label: &str, ceiling: u32) -> PolicyResult<Self> {
        let label = fleet
            .resolve_label(label)
            .ok_or_else(|| PolicyError::UnknownLabel(label.to_string()))?;
        Ok(Self { label, ceiling })
    }

    pub fn label(&self) -> &LabelId {
        &self.label
    }

    pub fn ceiling(&self) -> u32 {
        self.ceiling
    }

    /// Whether an operator may activate a node under this policy.
    ///
    /// A pure quota check: true iff the label is under its ceiling. Queue
    /// content never affects the answer, but the decision still happens
    /// under the queue guard so it observes the same consistent view as
    /// the periodic check.
    pub fn is_manual_launch_allowed<Q>(
        &self,
        fleet: &dyn FleetView,
        _queue: &QueueGuard<'_, Q>,
    ) -> bool {
        let nodes = fleet.snapshot();
        count_active(&nodes, &self.label) < self.ceiling as usize
    }

    /// Periodic policy entry point for one offline candidate.
    ///
    /// If the candidate is Offline, its label is under the ceiling, and
    /// some buildable item is serviceable only by the candidate, a
    /// fire-and-forget connect request is issued. Always returns
    /// [`CHECK_INTERVAL`]; there is nothing to await and no retry state —
    /// the next tick re-evaluates from scratch.
    pub fn check<Q: QueueSource>(
        &self,
        candidate: &NodeId,
        fleet: &dyn FleetView,
        control: &dyn FleetControl,
        queue: &QueueGuard<'_, Q>,
    ) -> Duration {
        let nodes = fleet.snapshot();

        let Some(node) = nodes.iter().find(|n| n.id == *candidate) else {
            warn!(node = %candidate, "candidate not present in fleet snapshot");
            return CHECK_INTERVAL;
        };

        if node.power != NodePower::Offline {
            return CHECK_INTERVAL;
        }

        let occupancy = count_active(&nodes, &self.label);
        if occupancy >= self.ceiling as usize {
            debug!(
                label = %self.label,
                occupancy,
                ceiling = self.ceiling,
                "label at capacity ceiling, activation suppressed"
            );
            return CHECK_INTERVAL;
        }

        let items = queue.buildable_items();
        if has_unmet_demand(node, &nodes, &items) {
            info!(
                node = %node.id,
                label = %self.label,
                occupancy,
                ceiling = self.ceiling,
                "activating offline node for unmet queue demand"
            );
            control.request_connect(&node.id);
        }

        CHECK_INTERVAL
    }
}
