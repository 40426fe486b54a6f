//! Allocation error types.

use thiserror::Error;

use crate::resource::Capacity;

/// Result type alias for allocation operations.
pub type AllocationResult<T> = Result<T, AllocationError>;

/// Errors raised when capacity cannot be granted.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AllocationError {
    #[error("node {node}: insufficient resources (requested {requested}, available {available})")]
    Insufficient {
        node: String,
        requested: Capacity,
        available: Capacity,
    },

    #[error("node {node}: invalid demand {requested}")]
    InvalidDemand { node: String, requested: Capacity },

    #[error("no node available for pod {pod}")]
    NoNodeAvailable { pod: String },
}

impl AllocationError {
    /// Whether the failure came from a single node refusing a demand.
    ///
    /// Node-level failures are recoverable by trying another node; only
    /// [`AllocationError::NoNodeAvailable`] is final for a pod.
    pub fn is_node_level(&self) -> bool {
        matches!(
            self,
            AllocationError::Insufficient { .. } | AllocationError::InvalidDemand { .. }
        )
    }
}
