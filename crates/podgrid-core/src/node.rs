//! Nodes — capacity providers for the placement engine.
//!
//! A node has a fixed initial CPU/memory capacity and a mutable available
//! remainder. Between operations the remainder always satisfies
//! `0 <= available <= initial` on both dimensions:
//!
//! - [`Node::allocate`] debits only when both dimensions fit, and refuses
//!   negative or non-finite demand outright.
//! - [`Node::reset`] and [`Node::restore`] assign values instead of
//!   refunding, so repeated attempts never accumulate float drift.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use serde::Serialize;
use tracing::trace;

use crate::error::{AllocationError, AllocationResult};
use crate::resource::{Capacity, Resource};

/// A node shared between the cluster and any external holder.
pub type SharedNode = Rc<RefCell<Node>>;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Node {
    id: String,
    initial: Capacity,
    available: Capacity,
    active: bool,
}

impl Node {
    pub fn new(id: impl Into<String>, initial_cpu: f64, initial_mem: f64) -> Self {
        let initial = Capacity::new(initial_cpu, initial_mem);
        Self {
            id: id.into(),
            initial,
            available: initial,
            active: false,
        }
    }

    /// Wrap this node for shared ownership.
    pub fn into_shared(self) -> SharedNode {
        Rc::new(RefCell::new(self))
    }

    pub fn initial_cpu(&self) -> f64 {
        self.initial.cpu
    }

    pub fn initial_mem(&self) -> f64 {
        self.initial.mem
    }

    pub fn available_cpu(&self) -> f64 {
        self.available.cpu
    }

    pub fn available_mem(&self) -> f64 {
        self.available.mem
    }

    /// Fixed capacity the node was built with.
    pub fn capacity(&self) -> Capacity {
        self.initial
    }

    /// Snapshot of the current remainder.
    pub fn available(&self) -> Capacity {
        self.available
    }

    /// Debit `cpu`/`mem` if both fit; otherwise leave the node untouched.
    ///
    /// An exact fit succeeds and drives the remainder to zero.
    pub fn allocate(&mut self, cpu: f64, mem: f64) -> AllocationResult<()> {
        let requested = Capacity::new(cpu, mem);

        if !requested.is_valid_demand() {
            return Err(AllocationError::InvalidDemand {
                node: self.id.clone(),
                requested,
            });
        }

        if !self.available.fits(&requested) {
            return Err(AllocationError::Insufficient {
                node: self.id.clone(),
                requested,
                available: self.available,
            });
        }

        self.available.cpu -= cpu;
        self.available.mem -= mem;
        trace!(node = %self.id, cpu, mem, remaining = %self.available, "allocated");
        Ok(())
    }

    /// Restore the remainder to the initial capacity.
    pub fn reset(&mut self) {
        self.available = self.initial;
    }

    /// Put back a remainder previously taken with [`Node::available`].
    ///
    /// The value is clamped to `[0, initial]` so a snapshot from another
    /// node can never break the capacity invariant.
    pub fn restore(&mut self, snapshot: Capacity) {
        self.available = Capacity::new(
            clamp_quantity(snapshot.cpu, self.initial.cpu),
            clamp_quantity(snapshot.mem, self.initial.mem),
        );
    }
}

fn clamp_quantity(value: f64, max: f64) -> f64 {
    if value.is_nan() {
        max
    } else {
        value.clamp(0.0, max.max(0.0))
    }
}

impl Resource for Node {
    fn id(&self) -> &str {
        &self.id
    }

    fn cpu(&self) -> f64 {
        self.initial.cpu
    }

    fn mem(&self) -> f64 {
        self.initial.mem
    }

    fn is_active(&self) -> bool {
        self.active
    }

    fn start(&mut self) {
        self.active = true;
    }

    fn stop(&mut self) {
        self.active = false;
    }

    fn metrics(&self) -> String {
        format!(
            "[Server: {}: {:.6} Initial Cpu, {:.6} Initial Memory, {:.6} Available Cpu, {:.6} Available Mem]",
            self.id, self.initial.cpu, self.initial.mem, self.available.cpu, self.available.mem
        )
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.metrics())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_within_bounds(node: &Node) {
        assert!(node.available_cpu() >= 0.0 && node.available_cpu() <= node.initial_cpu());
        assert!(node.available_mem() >= 0.0 && node.available_mem() <= node.initial_mem());
    }

    #[test]
    fn initial_values() {
        let n = Node::new("node1", 4.0, 8.0);
        assert_eq!(n.initial_cpu(), 4.0);
        assert_eq!(n.initial_mem(), 8.0);
        assert_eq!(n.available_cpu(), 4.0);
        assert_eq!(n.available_mem(), 8.0);
        assert!(!n.is_active());
    }

    #[test]
    fn allocate_reduces_available() {
        let mut n = Node::new("node2", 10.0, 20.0);
        n.allocate(3.5, 5.5).unwrap();
        assert_eq!(n.available_cpu(), 10.0 - 3.5);
        assert_eq!(n.available_mem(), 20.0 - 5.5);
    }

    #[test]
    fn allocate_fails_when_either_dimension_short() {
        let mut n = Node::new("nodeC", 1.0, 1.0);

        let err = n.allocate(2.0, 0.5).unwrap_err();
        assert!(matches!(err, AllocationError::Insufficient { .. }));
        assert!(n.allocate(0.5, 2.0).is_err());

        assert_eq!(n.available(), Capacity::new(1.0, 1.0));
    }

    #[test]
    fn exact_fit_drains_to_zero() {
        let mut n = Node::new("n", 3.0, 6.0);
        n.allocate(3.0, 6.0).unwrap();
        assert_eq!(n.available(), Capacity::ZERO);
        assert!(n.allocate(0.000001, 0.0).is_err());
        n.allocate(0.0, 0.0).unwrap();
    }

    #[test]
    fn allocate_just_above_limits_fails() {
        let mut n = Node::new("srv3", 5.0, 10.0);
        assert!(n.allocate(5.00000000001, 10.0000000001).is_err());
        assert!(n.allocate(5.0, 10.0000000001).is_err());
    }

    #[test]
    fn allocate_just_below_limits_succeeds() {
        let mut n = Node::new("srv4", 5.0, 10.0);
        n.allocate(4.999999, 9.9999999).unwrap();
        assert_within_bounds(&n);
    }

    #[test]
    fn negative_and_non_finite_demand_refused() {
        let mut n = Node::new("n", 2.0, 2.0);

        let err = n.allocate(-1.0, 0.0).unwrap_err();
        assert!(matches!(err, AllocationError::InvalidDemand { .. }));
        assert!(n.allocate(f64::NAN, 0.0).is_err());
        assert!(n.allocate(0.0, f64::INFINITY).is_err());

        assert_eq!(n.available(), Capacity::new(2.0, 2.0));
    }

    #[test]
    fn reset_is_exact_and_idempotent() {
        let mut n = Node::new("n", 1.0, 1.0);
        for _ in 0..3 {
            n.allocate(0.1, 0.3).unwrap();
        }
        n.reset();
        assert_eq!(n.available(), Capacity::new(1.0, 1.0));
        n.reset();
        assert_eq!(n.available(), Capacity::new(1.0, 1.0));
    }

    #[test]
    fn restore_returns_to_snapshot() {
        let mut n = Node::new("n", 4.0, 8.0);
        n.allocate(2.0, 3.0).unwrap();
        let before = n.available();

        n.allocate(1.5, 1.5).unwrap();
        n.restore(before);

        assert_eq!(n.available(), Capacity::new(2.0, 5.0));
    }

    #[test]
    fn restore_clamps_foreign_snapshot() {
        let mut n = Node::new("n", 4.0, 8.0);
        n.restore(Capacity::new(100.0, -3.0));
        assert_eq!(n.available(), Capacity::new(4.0, 0.0));
        assert_within_bounds(&n);
    }

    #[test]
    fn bounds_hold_across_mixed_operations() {
        let mut n = Node::new("n", 2.5, 3.5);
        let demands = [(1.0, 1.0), (2.0, 0.1), (0.7, 1.2), (5.0, 5.0), (0.8, 1.3), (0.1, 0.1)];
        for (i, (cpu, mem)) in demands.iter().enumerate() {
            let _ = n.allocate(*cpu, *mem);
            assert_within_bounds(&n);
            if i == 3 {
                n.reset();
                assert_within_bounds(&n);
            }
        }
    }

    #[test]
    fn metrics_contain_all_fields() {
        let mut n = Node::new("srv", 3.0, 6.0);
        n.allocate(1.0, 2.0).unwrap();
        assert_eq!(
            n.metrics(),
            "[Server: srv: 3.000000 Initial Cpu, 6.000000 Initial Memory, \
             2.000000 Available Cpu, 4.000000 Available Mem]"
        );
        assert_eq!(n.to_string(), n.metrics());
    }

    #[test]
    fn serializes_capacity_pairs() {
        let mut n = Node::new("n1", 4.0, 8.0);
        n.allocate(1.0, 2.0).unwrap();
        let json = serde_json::to_value(&n).unwrap();
        assert_eq!(json["id"], "n1");
        assert_eq!(json["initial"]["cpu"], 4.0);
        assert_eq!(json["available"]["mem"], 6.0);
        assert_eq!(json["active"], false);
    }

    #[test]
    fn shared_node_sees_mutations() {
        let shared = Node::new("n", 2.0, 2.0).into_shared();
        let observer = Rc::clone(&shared);
        shared.borrow_mut().allocate(1.0, 1.0).unwrap();
        assert_eq!(observer.borrow().available(), Capacity::new(1.0, 1.0));
    }
}
