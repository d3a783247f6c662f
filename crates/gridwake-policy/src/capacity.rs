//! Label occupancy counting.

use gridwake_state::{LabelId, NodeSnapshot};

/// Count the nodes in `fleet` that carry `label` and are Online or
/// Connecting.
///
/// Offline nodes never count, whatever their label set. Pure function
/// over one snapshot: repeated calls within a decision see the same
/// result because the caller evaluates against one `Vec` of snapshots.
pub fn count_active(fleet: &[NodeSnapshot], label: &LabelId) -> usize {
    fleet
        .iter()
        .filter(|node| node.is_active() && node.has_label(label))
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridwake_state::NodePower;
    use std::collections::BTreeSet;

    fn make_node(id: &str, power: NodePower, labels: &[&str]) -> NodeSnapshot {
        NodeSnapshot {
            id: id.to_string(),
            power,
            labels: labels.iter().map(|l| l.to_string()).collect::<BTreeSet<_>>(),
            executors: 2,
            idle_executors: 0,
            accepting_tasks: true,
        }
    }

    #[test]
    fn counts_online_and_connecting_only() {
        let fleet = vec![
            make_node("a", NodePower::Online, &["gpu"]),
            make_node("b", NodePower::Connecting, &["gpu"]),
            make_node("c", NodePower::Offline, &["gpu"]),
        ];

        assert_eq!(count_active(&fleet, &"gpu".to_string()), 2);
    }

    #[test]
    fn offline_label_sets_are_irrelevant() {
        // An offline node carrying the label contributes nothing.
        let fleet = vec![make_node("a", NodePower::Offline, &["gpu", "arm64"])];

        assert_eq!(count_active(&fleet, &"gpu".to_string()), 0);
        assert_eq!(count_active(&fleet, &"arm64".to_string()), 0);
    }

    #[test]
    fn only_matching_labels_count() {
        let fleet = vec![
            make_node("a", NodePower::Online, &["gpu"]),
            make_node("b", NodePower::Online, &["arm64"]),
            make_node("c", NodePower::Online, &["gpu", "arm64"]),
        ];

        assert_eq!(count_active(&fleet, &"gpu".to_string()), 2);
        assert_eq!(count_active(&fleet, &"arm64".to_string()), 2);
    }

    #[test]
    fn empty_fleet_counts_zero() {
        assert_eq!(count_active(&[], &"gpu".to_string()), 0);
    }
}
