//! The capability contract shared by containers and nodes.
//!
//! A [`Resource`] has an identity, a CPU and memory quantity, and an active
//! flag toggled by `start`/`stop`. For a container the quantities are
//! *demand*; for a node they are *capacity*.

use std::fmt;
use std::ops::{Add, AddAssign};

use serde::{Deserialize, Serialize};

/// A CPU/memory pair.
///
/// Used both as a demand (what a container asks for) and as a remainder
/// (what a node still has free).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Capacity {
    pub cpu: f64,
    pub mem: f64,
}

impl Capacity {
    pub const ZERO: Capacity = Capacity { cpu: 0.0, mem: 0.0 };

    pub fn new(cpu: f64, mem: f64) -> Self {
        Self { cpu, mem }
    }

    /// Both dimensions of `demand` are at most this capacity.
    pub fn fits(&self, demand: &Capacity) -> bool {
        demand.cpu <= self.cpu && demand.mem <= self.mem
    }

    /// Both quantities are finite and non-negative.
    pub fn is_valid_demand(&self) -> bool {
        self.cpu.is_finite() && self.mem.is_finite() && self.cpu >= 0.0 && self.mem >= 0.0
    }
}

impl Add for Capacity {
    type Output = Capacity;

    fn add(self, rhs: Capacity) -> Capacity {
        Capacity::new(self.cpu + rhs.cpu, self.mem + rhs.mem)
    }
}

impl AddAssign for Capacity {
    fn add_assign(&mut self, rhs: Capacity) {
        self.cpu += rhs.cpu;
        self.mem += rhs.mem;
    }
}

impl fmt::Display for Capacity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6} cpu, {:.6} mem", self.cpu, self.mem)
    }
}

/// Identity, quantities, and lifecycle of a schedulable entity.
pub trait Resource {
    fn id(&self) -> &str;

    /// CPU quantity fixed at construction.
    fn cpu(&self) -> f64;

    /// Memory quantity fixed at construction.
    fn mem(&self) -> f64;

    fn is_active(&self) -> bool;

    /// Mark the resource active.
    fn start(&mut self);

    /// Mark the resource inactive.
    fn stop(&mut self);

    /// Deterministic one-line rendering of identity, quantities, and state.
    fn metrics(&self) -> String;

    fn quantity(&self) -> Capacity {
        Capacity::new(self.cpu(), self.mem())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fits_is_inclusive_on_both_dimensions() {
        let free = Capacity::new(2.0, 5.0);
        assert!(free.fits(&Capacity::new(2.0, 5.0)));
        assert!(free.fits(&Capacity::new(1.0, 1.0)));
        assert!(!free.fits(&Capacity::new(2.5, 1.0)));
        assert!(!free.fits(&Capacity::new(1.0, 5.5)));
    }

    #[test]
    fn nan_never_fits() {
        let free = Capacity::new(2.0, 5.0);
        assert!(!free.fits(&Capacity::new(f64::NAN, 1.0)));
        assert!(!Capacity::new(f64::NAN, 1.0).is_valid_demand());
    }

    #[test]
    fn negative_demand_is_invalid() {
        assert!(!Capacity::new(-1.0, 1.0).is_valid_demand());
        assert!(!Capacity::new(1.0, f64::INFINITY).is_valid_demand());
        assert!(Capacity::ZERO.is_valid_demand());
    }

    #[test]
    fn sums_component_wise() {
        let mut total = Capacity::new(1.0, 2.0) + Capacity::new(0.5, 0.5);
        total += Capacity::new(1.0, 1.0);
        assert_eq!(total, Capacity::new(2.5, 3.5));
    }
}
