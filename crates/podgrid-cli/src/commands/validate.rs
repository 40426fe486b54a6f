use std::path::Path;

use podgrid_core::{Capacity, Pod};

use crate::manifest;

/// Pod count and aggregate demand of a manifest.
#[derive(Debug, Clone, PartialEq)]
pub struct ManifestSummary {
    pub pods: usize,
    pub containers: usize,
    pub demand: Capacity,
}

impl ManifestSummary {
    pub fn of(pods: &[Pod]) -> Self {
        Self {
            pods: pods.len(),
            containers: pods.iter().map(Pod::len).sum(),
            demand: pods.iter().fold(Capacity::ZERO, |acc, p| acc + p.demand()),
        }
    }
}

pub fn validate(path: &Path) -> anyhow::Result<()> {
    let pods = manifest::load_manifest(path)?;
    let summary = ManifestSummary::of(&pods);

    println!(
        "✓ {} pods, {} containers ({:.6} CPU, {:.6} Memory requested)",
        summary.pods, summary.containers, summary.demand.cpu, summary.demand.mem
    );
    Ok(())
}
