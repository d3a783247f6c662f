//! Queue demand matching — the greedy one-pass heuristic.
//!
//! Answers: does the queue hold a buildable item that no currently idle
//! node can serve, but the candidate can? One such item is enough to
//! justify activating the candidate, so the scan short-circuits on the
//! first hit.

use tracing::debug;

use gridwake_state::{NodeSnapshot, WorkItem};

/// One idle node in the working pool with its remaining unclaimed slots.
struct IdleEntry<'a> {
    node: &'a NodeSnapshot,
    remaining: u32,
}

/// Whether any buildable item is serviceable only by `candidate`.
///
/// Greedy, single pass in queue order, no backtracking:
///
/// 1. Build a working pool of idle capacity over nodes that are
///    Online-or-Connecting, accepting tasks, and partially idle. The
///    candidate is excluded (it is Offline by precondition, but excluded
///    by id regardless).
/// 2. Each item is absorbed by the first pool node that can take it; that
///    node's remaining slot count drops by one and the entry is removed
///    at zero, so an idle slot is never claimed twice in one pass.
/// 3. An item no pool node can take but the candidate can is unmet
///    demand: return true without scanning further items.
/// 4. An item nobody in scope can take is skipped; it justifies nothing
///    and is not an error.
///
/// Which pool node absorbs an item when several qualify is "first in
/// snapshot order". The heuristic does not re-rank the pool by remaining
/// capacity mid-pass. Callers control determinism through the order of
/// `fleet`.
pub fn has_unmet_demand<I: WorkItem>(
    candidate: &NodeSnapshot,
    fleet: &[NodeSnapshot],
    items: &[I],
) -> bool {
    let mut pool: Vec<IdleEntry<'_>> = fleet
        .iter()
        .filter(|node| {
            node.id != candidate.id
                && node.is_active()
                && node.accepting_tasks
                && node.is_partially_idle()
        })
        .map(|node| IdleEntry {
            node,
            remaining: node.idle_executors,
        })
        .collect();

    for item in items {
        let absorbed = pool
            .iter()
            .position(|entry| item.can_run_on(entry.node).is_satisfied());

        match absorbed {
            Some(i) => {
                pool[i].remaining -= 1;
                if pool[i].remaining == 0 {
                    pool.remove(i);
                }
            }
            None => {
                if item.can_run_on(candidate).is_satisfied() {
                    debug!(
                        item = item.id(),
                        candidate = %candidate.id,
                        "buildable item serviceable only by offline candidate"
                    );
                    return true;
                }
                // Unserviceable by any node in scope; skip.
            }
        }
    }

    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridwake_state::{NodePower, RunDecision};
    use std::cell::Cell;
    use std::collections::BTreeSet;

    fn make_node(id: &str, power: NodePower, labels: &[&str], idle: u32) -> NodeSnapshot {
        NodeSnapshot {
            id: id.to_string(),
            power,
            labels: labels.iter().map(|l| l.to_string()).collect::<BTreeSet<_>>(),
            executors: idle.max(2),
            idle_executors: idle,
            accepting_tasks: true,
        }
    }

    /// Item that requires one label and counts predicate evaluations.
    struct LabelItem {
        id: String,
        label: String,
        evals: Cell<usize>,
    }

    impl LabelItem {
        fn new(id: &str, label: &str) -> Self {
            Self {
                id: id.to_string(),
                label: label.to_string(),
                evals: Cell::new(0),
            }
        }
    }

    impl WorkItem for LabelItem {
        fn id(&self) -> &str {
            &self.id
        }

        fn can_run_on(&self, node: &NodeSnapshot) -> RunDecision {
            self.evals.set(self.evals.get() + 1);
            if node.has_label(&self.label) {
                RunDecision::Satisfied
            } else {
                RunDecision::unsatisfied(format!("node lacks label {}", self.label))
            }
        }
    }

    fn candidate() -> NodeSnapshot {
        make_node("cand", NodePower::Offline, &["gpu"], 0)
    }

    #[test]
    fn empty_queue_is_no_demand() {
        let fleet = vec![candidate()];
        let items: Vec<LabelItem> = vec![];

        assert!(!has_unmet_demand(&candidate(), &fleet, &items));
    }

    #[test]
    fn idle_node_covers_the_item() {
        let fleet = vec![
            make_node("a", NodePower::Online, &["gpu"], 1),
            candidate(),
        ];
        let items = vec![LabelItem::new("j1", "gpu")];

        // Covered by "a" even though the candidate could also serve it.
        assert!(!has_unmet_demand(&candidate(), &fleet, &items));
    }

    #[test]
    fn only_candidate_can_serve() {
        let fleet = vec![
            make_node("a", NodePower::Online, &["arm64"], 2),
            candidate(),
        ];
        let items = vec![LabelItem::new("j1", "gpu")];

        assert!(has_unmet_demand(&candidate(), &fleet, &items));
    }

    #[test]
    fn short_circuits_after_first_unmet_item() {
        let fleet = vec![candidate()];
        let items = vec![LabelItem::new("j1", "gpu"), LabelItem::new("j2", "gpu")];

        assert!(has_unmet_demand(&candidate(), &fleet, &items));
        // The second item was never evaluated against anything.
        assert_eq!(items[1].evals.get(), 0);
    }

    #[test]
    fn single_idle_slot_absorbs_at_most_one_item() {
        // "a" has one idle slot and two gpu items are queued: the first is
        // absorbed, the second falls through to the candidate.
        let fleet = vec![
            make_node("a", NodePower::Online, &["gpu"], 1),
            candidate(),
        ];
        let items = vec![LabelItem::new("j1", "gpu"), LabelItem::new("j2", "gpu")];

        assert!(has_unmet_demand(&candidate(), &fleet, &items));
    }

    #[test]
    fn two_idle_slots_absorb_two_items() {
        let fleet = vec![
            make_node("a", NodePower::Online, &["gpu"], 2),
            candidate(),
        ];
        let items = vec![LabelItem::new("j1", "gpu"), LabelItem::new("j2", "gpu")];

        assert!(!has_unmet_demand(&candidate(), &fleet, &items));
    }

    #[test]
    fn unserviceable_items_are_skipped() {
        // Nobody in scope has the "windows" label; the item justifies
        // nothing but later items are still evaluated.
        let fleet = vec![
            make_node("a", NodePower::Online, &["gpu"], 1),
            candidate(),
        ];
        let items = vec![LabelItem::new("j1", "windows"), LabelItem::new("j2", "gpu")];

        assert!(!has_unmet_demand(&candidate(), &fleet, &items));
        assert!(items[1].evals.get() > 0);
    }

    #[test]
    fn paused_and_offline_nodes_never_pool() {
        let mut paused = make_node("a", NodePower::Online, &["gpu"], 3);
        paused.accepting_tasks = false;
        let fleet = vec![
            paused,
            make_node("b", NodePower::Offline, &["gpu"], 3),
            candidate(),
        ];
        let items = vec![LabelItem::new("j1", "gpu")];

        assert!(has_unmet_demand(&candidate(), &fleet, &items));
    }

    #[test]
    fn zero_idle_nodes_never_pool() {
        let fleet = vec![
            make_node("a", NodePower::Online, &["gpu"], 0),
            candidate(),
        ];
        let items = vec![LabelItem::new("j1", "gpu")];

        assert!(has_unmet_demand(&candidate(), &fleet, &items));
    }

    #[test]
    fn candidate_is_excluded_from_the_pool() {
        // Even if the snapshot lists the candidate as active and idle, its
        // own slots must not cover demand it would be activated for.
        let mut active_cand = candidate();
        active_cand.power = NodePower::Online;
        active_cand.idle_executors = 4;
        let fleet = vec![active_cand];
        let items = vec![LabelItem::new("j1", "gpu")];

        assert!(has_unmet_demand(&candidate(), &fleet, &items));
    }

    #[test]
    fn candidate_unable_to_serve_anything_is_no_demand() {
        let fleet = vec![candidate()];
        let items = vec![LabelItem::new("j1", "arm64")];

        assert!(!has_unmet_demand(&candidate(), &fleet, &items));
    }

    #[test]
    fn first_pool_node_in_snapshot_order_absorbs() {
        // Both "a" and "b" qualify; "a" comes first in the snapshot, so
        // after one item "b" still has its slot and covers the second.
        let fleet = vec![
            make_node("a", NodePower::Online, &["gpu"], 1),
            make_node("b", NodePower::Online, &["gpu"], 1),
            candidate(),
        ];
        let items = vec![LabelItem::new("j1", "gpu"), LabelItem::new("j2", "gpu")];

        assert!(!has_unmet_demand(&candidate(), &fleet, &items));
    }
}
