//! podgrid placement engine — first-fit scheduling with rollback.
//!
//! The [`Cluster`] owns a pool of shared nodes and the pods placed onto
//! them. Each pod is placed whole on a single node or handed back to the
//! caller; a node that admits only part of a pod is rolled back before the
//! next node is tried.
//!
//! # Components
//!
//! - **`cluster`** — The placement engine and its serializable snapshot
//! - **`rollback`** — Undo strategy for abandoned attempts
//! - **`config`** — cluster.toml parsing and cluster construction
//! - **`error`** — Rejections and config errors

pub mod cluster;
pub mod config;
pub mod error;
pub mod rollback;

pub use cluster::{Cluster, ClusterSnapshot};
pub use config::{ClusterConfig, ClusterSection, NodeConfig};
pub use error::{ConfigError, ConfigResult, Rejected};
pub use rollback::RollbackPolicy;
