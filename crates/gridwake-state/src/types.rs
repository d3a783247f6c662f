//! Domain types for the gridwake cluster-state surface.
//!
//! These types describe one point-in-time observation of a worker node.
//! The fleet substrate produces them; the policy only reads them.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Unique identifier for a node in the fleet.
pub type NodeId = String;

/// Resolved identifier for a capability label.
pub type LabelId = String;

// ── Node ──────────────────────────────────────────────────────────

/// Power/connectivity state of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodePower {
    Offline,
    Connecting,
    Online,
}

impl NodePower {
    /// Online or Connecting — the states that count toward label occupancy.
    pub fn is_active(self) -> bool {
        matches!(self, NodePower::Online | NodePower::Connecting)
    }
}

/// Point-in-time observation of a single node.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NodeSnapshot {
    pub id: NodeId,
    pub power: NodePower,
    /// Capability labels assigned to this node.
    pub labels: BTreeSet<LabelId>,
    /// Total executor slots on this node.
    pub executors: u32,
    /// Executor slots currently idle.
    pub idle_executors: u32,
    /// Whether the node is accepting new work (online nodes can be
    /// administratively paused).
    pub accepting_tasks: bool,
}

impl NodeSnapshot {
    pub fn is_active(&self) -> bool {
        self.power.is_active()
    }

    /// At least one executor slot is idle.
    pub fn is_partially_idle(&self) -> bool {
        self.idle_executors > 0
    }

    pub fn has_label(&self, label: &LabelId) -> bool {
        self.labels.contains(label)
    }
}

// ── Work items ────────────────────────────────────────────────────

/// Result of evaluating a work item's placement predicate against a node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum RunDecision {
    /// The node can take the item.
    Satisfied,
    /// The node cannot take the item, with the blocking reason.
    Unsatisfied { reason: String },
}

impl RunDecision {
    pub fn unsatisfied(reason: impl Into<String>) -> Self {
        RunDecision::Unsatisfied {
            reason: reason.into(),
        }
    }

    pub fn is_satisfied(&self) -> bool {
        matches!(self, RunDecision::Satisfied)
    }
}
