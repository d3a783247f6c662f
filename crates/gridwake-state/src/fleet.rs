//! Fleet collaborator traits and the in-memory fleet.
//!
//! The policy is handed a fleet provider at construction instead of
//! reaching into a process-wide registry, so tests substitute
//! deterministic fixtures.

use std::collections::BTreeSet;
use std::sync::Mutex;

use crate::types::{LabelId, NodeId, NodePower, NodeSnapshot};

/// Read-only view of the fleet.
pub trait FleetView: Send + Sync {
    /// One consistent enumeration of all nodes.
    ///
    /// Implementations must serialize this against concurrent fleet
    /// mutation — the fleet registry may be lockable independently of the
    /// queue, and a decision must not observe a half-applied change.
    /// Snapshot order is the order the demand matcher scans idle nodes in.
    fn snapshot(&self) -> Vec<NodeSnapshot>;

    /// Resolve a label name against the label registry.
    ///
    /// `None` means the name is unknown, which callers treat as a
    /// configuration error.
    fn resolve_label(&self, name: &str) -> Option<LabelId>;
}

/// Side-effect surface of the fleet substrate.
pub trait FleetControl: Send + Sync {
    /// Ask the substrate to bring a node online.
    ///
    /// Non-blocking fire-and-forget: the request's outcome is observed
    /// only through later snapshots. A node that fails to come online is
    /// simply still Offline on the next tick.
    fn request_connect(&self, node: &NodeId);
}

#[derive(Debug, Default)]
struct MemoryFleetInner {
    nodes: Vec<NodeSnapshot>,
    labels: BTreeSet<LabelId>,
    connect_requests: Vec<NodeId>,
}

/// In-memory fleet substrate for tests and single-process embedding.
///
/// Holds nodes in insertion order (which therefore pins the matcher's
/// scan order), a label registry, and a record of every connect request
/// issued against it.
#[derive(Debug, Default)]
pub struct MemoryFleet {
    inner: Mutex<MemoryFleetInner>,
}

impl MemoryFleet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a label name in the registry.
    pub fn register_label(&self, name: &str) -> LabelId {
        let mut inner = self.lock_inner();
        inner.labels.insert(name.to_string());
        name.to_string()
    }

    /// Insert a node, or replace the node with the same id.
    pub fn upsert_node(&self, node: NodeSnapshot) {
        let mut inner = self.lock_inner();
        match inner.nodes.iter_mut().find(|n| n.id == node.id) {
            Some(slot) => *slot = node,
            None => inner.nodes.push(node),
        }
    }

    /// Flip a node's power state in place. Unknown ids are ignored.
    pub fn set_power(&self, id: &NodeId, power: NodePower) {
        let mut inner = self.lock_inner();
        if let Some(node) = inner.nodes.iter_mut().find(|n| n.id == *id) {
            node.power = power;
        }
    }

    /// Every connect request issued so far, in order.
    pub fn connect_requests(&self) -> Vec<NodeId> {
        self.lock_inner().connect_requests.clone()
    }

    fn lock_inner(&self) -> std::sync::MutexGuard<'_, MemoryFleetInner> {
        // A panic mid-mutation can only have been in one of the small
        // mutators above; the data is still structurally sound.
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl FleetView for MemoryFleet {
    fn snapshot(&self) -> Vec<NodeSnapshot> {
        self.lock_inner().nodes.clone()
    }

    fn resolve_label(&self, name: &str) -> Option<LabelId> {
        let inner = self.lock_inner();
        inner.labels.get(name).cloned()
    }
}

impl FleetControl for MemoryFleet {
    fn request_connect(&self, node: &NodeId) {
        self.lock_inner().connect_requests.push(node.clone());
    }
}
