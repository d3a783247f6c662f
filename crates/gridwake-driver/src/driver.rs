//! Retention driver — the periodic invocation loop.
//!
//! The driver holds the assembled (candidate, policy) pairs and applies
//! them on a timer. One tick acquires the queue guard once and checks
//! every candidate under it, so a whole pass observes one consistent
//! queue; the fleet substrate may still mutate between candidates, which
//! the per-decision snapshot absorbs.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tracing::{debug, info};

use gridwake_policy::{CHECK_INTERVAL, RetentionPolicy};
use gridwake_state::{FleetControl, FleetView, NodeId, QueueLock, QueueSource};

use crate::config::DriverConfig;
use crate::error::DriverResult;

/// Periodically evaluates every managed candidate against its policy.
#[derive(Debug)]
pub struct RetentionDriver<F, Q> {
    fleet: Arc<F>,
    queue: Arc<QueueLock<Q>>,
    /// Managed candidates: (node, policy), in configuration order.
    policies: Vec<(NodeId, RetentionPolicy)>,
}

impl<F, Q> RetentionDriver<F, Q>
where
    F: FleetView + FleetControl,
    Q: QueueSource,
{
    /// Assemble a driver from configuration.
    ///
    /// Every configured label is resolved against the fleet's registry
    /// up front; the first unresolvable label aborts assembly.
    pub fn from_config(
        config: &DriverConfig,
        fleet: Arc<F>,
        queue: Arc<QueueLock<Q>>,
    ) -> DriverResult<Self> {
        let mut policies = Vec::with_capacity(config.policies.len());
        for pc in &config.policies {
            let policy = RetentionPolicy::new(fleet.as_ref(), &pc.label, pc.max_nodes)?;
            debug!(
                node = %pc.node,
                label = %pc.label,
                ceiling = pc.max_nodes,
                "retention policy assembled"
            );
            policies.push((pc.node.clone(), policy));
        }
        Ok(Self {
            fleet,
            queue,
            policies,
        })
    }

    /// Number of managed candidates.
    pub fn managed(&self) -> usize {
        self.policies.len()
    }

    /// Gate an operator-initiated activation of `node`.
    ///
    /// Takes the queue lock itself, then delegates to the node's policy.
    /// A node with no configured policy has no ceiling to be under and is
    /// refused.
    pub fn is_manual_launch_allowed(&self, node: &NodeId) -> bool {
        let Some((_, policy)) = self.policies.iter().find(|(id, _)| id == node) else {
            return false;
        };
        let guard = self.queue.lock();
        policy.is_manual_launch_allowed(self.fleet.as_ref(), &guard)
    }

    /// One pass over all managed candidates under the queue lock.
    ///
    /// Returns the shortest re-check interval any policy requested.
    pub fn tick(&self) -> Duration {
        let guard = self.queue.lock();
        let mut next = CHECK_INTERVAL;
        for (node, policy) in &self.policies {
            let interval =
                policy.check(node, self.fleet.as_ref(), self.fleet.as_ref(), &guard);
            next = next.min(interval);
        }
        next
    }

    /// Run the periodic evaluation loop until shutdown.
    pub async fn run(&self, mut shutdown: watch::Receiver<bool>) {
        info!(candidates = self.policies.len(), "retention driver started");

        loop {
            let next = self.tick();
            tokio::select! {
                _ = tokio::time::sleep(next) => {}
                _ = shutdown.changed() => {
                    info!("retention driver shutting down");
                    break;
                }
            }
        }
    }
}
