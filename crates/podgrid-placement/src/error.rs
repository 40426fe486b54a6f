//! Placement and configuration error types.

use std::path::PathBuf;

use thiserror::Error;

use podgrid_core::{AllocationError, Pod};

/// A pod that no node could host, handed back to the caller untouched.
#[derive(Debug, Error)]
#[error("{reason}")]
pub struct Rejected {
    pod: Pod,
    reason: AllocationError,
}

impl Rejected {
    pub(crate) fn no_node_available(pod: Pod) -> Self {
        let reason = AllocationError::NoNodeAvailable {
            pod: pod.name().to_string(),
        };
        Self { pod, reason }
    }

    pub fn pod(&self) -> &Pod {
        &self.pod
    }

    pub fn reason(&self) -> &AllocationError {
        &self.reason
    }

    /// Take the pod back.
    pub fn into_pod(self) -> Pod {
        self.pod
    }
}

/// Errors that can occur while loading or validating a cluster config.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid cluster config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("failed to serialize cluster config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("cluster config defines no nodes")]
    NoNodes,

    #[error("duplicate node id: {0}")]
    DuplicateNode(String),

    #[error("node {id}: capacity must be finite and non-negative (cpu {cpu}, mem {mem})")]
    InvalidCapacity { id: String, cpu: f64, mem: f64 },
}

pub type ConfigResult<T> = Result<T, ConfigError>;
