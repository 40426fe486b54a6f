//! podgrid-core — the resource model for podgrid.
//!
//! Containers carry CPU/memory *demand*, nodes carry CPU/memory *capacity*,
//! and pods group containers into a single placement unit. The placement
//! engine itself lives in `podgrid-placement`.
//!
//! # Components
//!
//! - **`resource`** — the `Resource` contract and the `Capacity` pair
//! - **`container`** — workload unit with an image reference
//! - **`pod`** — labelled, ordered group of containers
//! - **`node`** — capacity provider with allocate/reset/restore
//! - **`error`** — allocation failures

pub mod container;
pub mod error;
pub mod node;
pub mod pod;
pub mod resource;

pub use container::Container;
pub use error::{AllocationError, AllocationResult};
pub use node::{Node, SharedNode};
pub use pod::Pod;
pub use resource::{Capacity, Resource};
