use std::path::Path;

use tracing::info;

use podgrid_placement::{Cluster, ClusterConfig, Rejected};

use crate::manifest;
use crate::output::{self, OutputFormat};

/// Build the cluster and place every pod from the manifest.
pub fn run(pods_path: &Path, config_path: Option<&Path>) -> anyhow::Result<(Cluster, Vec<Rejected>)> {
    let config = match config_path {
        Some(path) => ClusterConfig::from_file(path)?,
        None => ClusterConfig::default(),
    };

    let pods = manifest::load_manifest(pods_path)?;
    info!(pods = pods.len(), nodes = config.nodes.len(), "deploying pods");

    let mut cluster = config.build_cluster();
    let rejected = cluster.deploy_pods(pods);
    Ok((cluster, rejected))
}

pub fn deploy(
    pods_path: &Path,
    config_path: Option<&Path>,
    format: OutputFormat,
    output_path: Option<&Path>,
) -> anyhow::Result<()> {
    let (cluster, rejected) = run(pods_path, config_path)?;

    for rejection in &rejected {
        eprintln!("Error deploying pod: {rejection}");
    }

    let rendered = output::render(&cluster, format)?;
    output::emit(&rendered, output_path)
}
