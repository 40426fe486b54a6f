//! How a node is restored after a pod fails to fit on it.

use serde::{Deserialize, Serialize};

use podgrid_core::{Capacity, Node};

/// Rollback strategy for an abandoned placement attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RollbackPolicy {
    /// Put back the remainder captured just before the attempt.
    ///
    /// Capacity consumed by earlier placements on the node stays consumed.
    #[default]
    Snapshot,
    /// Reset the node to its initial capacity.
    ///
    /// Forgets every earlier placement on that node; only sound when each
    /// node is tried against a single pod.
    #[serde(rename = "reset", alias = "reset_to_initial")]
    ResetToInitial,
}

impl RollbackPolicy {
    /// Undo a failed attempt on `node`. `before` is the remainder taken
    /// with [`Node::available`] before the first container was allocated.
    pub fn apply(self, node: &mut Node, before: Capacity) {
        match self {
            RollbackPolicy::Snapshot => node.restore(before),
            RollbackPolicy::ResetToInitial => node.reset(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn partially_used() -> (Node, Capacity) {
        let mut node = Node::new("n1", 4.0, 8.0);
        node.allocate(2.0, 3.0).unwrap();
        let before = node.available();
        node.allocate(1.0, 1.0).unwrap();
        (node, before)
    }

    #[test]
    fn snapshot_keeps_earlier_placements() {
        let (mut node, before) = partially_used();
        RollbackPolicy::Snapshot.apply(&mut node, before);
        assert_eq!(node.available(), Capacity::new(2.0, 5.0));
    }

    #[test]
    fn reset_returns_to_initial() {
        let (mut node, before) = partially_used();
        RollbackPolicy::ResetToInitial.apply(&mut node, before);
        assert_eq!(node.available(), Capacity::new(4.0, 8.0));
    }

    #[test]
    fn defaults_to_snapshot() {
        assert_eq!(RollbackPolicy::default(), RollbackPolicy::Snapshot);
    }

    #[test]
    fn parses_short_and_long_names() {
        #[derive(Deserialize)]
        struct Wrapper {
            rollback: RollbackPolicy,
        }

        let w: Wrapper = toml::from_str(r#"rollback = "reset""#).unwrap();
        assert_eq!(w.rollback, RollbackPolicy::ResetToInitial);
        let w: Wrapper = toml::from_str(r#"rollback = "reset_to_initial""#).unwrap();
        assert_eq!(w.rollback, RollbackPolicy::ResetToInitial);
        let w: Wrapper = toml::from_str(r#"rollback = "snapshot""#).unwrap();
        assert_eq!(w.rollback, RollbackPolicy::Snapshot);
    }
}
