//! Pod manifest ingestion.
//!
//! A manifest is a JSON array of pods:
//!
//! ```json
//! [
//!   {
//!     "name": "web",
//!     "labels": { "app": "web" },
//!     "containers": [
//!       { "id": "nginx", "cpu": 0.5, "mem": 1.0, "image": "nginx:1.25" }
//!     ]
//!   }
//! ]
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use podgrid_core::{Container, Pod};

#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("cannot open manifest {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid manifest: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("pod {pod}, container {container}: demand must be finite and non-negative (cpu {cpu}, mem {mem})")]
    InvalidDemand {
        pod: String,
        container: String,
        cpu: f64,
        mem: f64,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PodManifest {
    pub name: String,
    #[serde(default)]
    pub labels: BTreeMap<String, String>,
    #[serde(default)]
    pub containers: Vec<ContainerManifest>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContainerManifest {
    pub id: String,
    pub cpu: f64,
    pub mem: f64,
    pub image: String,
}

impl PodManifest {
    fn validate(&self) -> Result<(), ManifestError> {
        let valid = |q: f64| q.is_finite() && q >= 0.0;
        match self.containers.iter().find(|c| !valid(c.cpu) || !valid(c.mem)) {
            Some(c) => Err(ManifestError::InvalidDemand {
                pod: self.name.clone(),
                container: c.id.clone(),
                cpu: c.cpu,
                mem: c.mem,
            }),
            None => Ok(()),
        }
    }
}

impl From<ContainerManifest> for Container {
    fn from(c: ContainerManifest) -> Self {
        Container::new(c.id, c.cpu, c.mem, c.image)
    }
}

impl From<PodManifest> for Pod {
    fn from(manifest: PodManifest) -> Self {
        let mut pod = Pod::new(manifest.name);
        for (key, value) in manifest.labels {
            pod.set_label(key, value);
        }
        for container in manifest.containers {
            pod.add_container(container.into());
        }
        pod
    }
}

/// Parse and validate manifest text into pods, preserving file order.
pub fn parse_manifest(content: &str) -> Result<Vec<Pod>, ManifestError> {
    let manifests: Vec<PodManifest> = serde_json::from_str(content)?;
    manifests
        .into_iter()
        .map(|m| {
            m.validate()?;
            Ok(Pod::from(m))
        })
        .collect()
}

pub fn load_manifest(path: &Path) -> Result<Vec<Pod>, ManifestError> {
    let content = std::fs::read_to_string(path).map_err(|source| ManifestError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let pods = parse_manifest(&content)?;
    debug!(path = %path.display(), pods = pods.len(), "manifest loaded");
    Ok(pods)
}
