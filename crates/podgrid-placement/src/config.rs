//! cluster.toml configuration parser.
//!
//! ```toml
//! [cluster]
//! name = "My cluster"
//! rollback = "snapshot"
//!
//! [[nodes]]
//! id = "Server1"
//! cpu = 4.0
//! mem = 8.0
//! ```

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use podgrid_core::Node;

use crate::cluster::Cluster;
use crate::error::{ConfigError, ConfigResult};
use crate::rollback::RollbackPolicy;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClusterConfig {
    pub cluster: ClusterSection,
    #[serde(default)]
    pub nodes: Vec<NodeConfig>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClusterSection {
    pub name: String,
    #[serde(default)]
    pub rollback: RollbackPolicy,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeConfig {
    pub id: String,
    pub cpu: f64,
    pub mem: f64,
}

impl Default for ClusterConfig {
    /// Three nodes: two (4 CPU, 8 memory) and one (2 CPU, 4 memory).
    fn default() -> Self {
        let node = |id: &str, cpu, mem| NodeConfig {
            id: id.to_string(),
            cpu,
            mem,
        };
        ClusterConfig {
            cluster: ClusterSection {
                name: "My cluster".to_string(),
                rollback: RollbackPolicy::default(),
            },
            nodes: vec![
                node("Server1", 4.0, 8.0),
                node("Server2", 4.0, 8.0),
                node("Server3", 2.0, 4.0),
            ],
        }
    }
}

impl ClusterConfig {
    pub fn from_file(path: &Path) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&content)?;
        debug!(path = %path.display(), nodes = config.nodes.len(), "cluster config loaded");
        Ok(config)
    }

    /// Parse and validate.
    pub fn from_toml_str(content: &str) -> ConfigResult<Self> {
        let config: ClusterConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml_string(&self) -> ConfigResult<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn write_to(&self, path: &Path) -> ConfigResult<()> {
        let content = self.to_toml_string()?;
        std::fs::write(path, content).map_err(|source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        })
    }

    /// At least one node, unique ids, finite non-negative capacities.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.nodes.is_empty() {
            return Err(ConfigError::NoNodes);
        }

        let mut seen = HashSet::new();
        for node in &self.nodes {
            if !seen.insert(node.id.as_str()) {
                return Err(ConfigError::DuplicateNode(node.id.clone()));
            }
            let valid = |q: f64| q.is_finite() && q >= 0.0;
            if !valid(node.cpu) || !valid(node.mem) {
                return Err(ConfigError::InvalidCapacity {
                    id: node.id.clone(),
                    cpu: node.cpu,
                    mem: node.mem,
                });
            }
        }
        Ok(())
    }

    /// Build an empty cluster with every configured node, in file order.
    pub fn build_cluster(&self) -> Cluster {
        let mut cluster = Cluster::with_rollback(&self.cluster.name, self.cluster.rollback);
        for node in &self.nodes {
            cluster.add_node(Node::new(&node.id, node.cpu, node.mem).into_shared());
        }
        cluster
    }
}
