//! Rendering cluster state for the console or a file.

use std::path::Path;

use anyhow::Context;
use clap::ValueEnum;

use podgrid_placement::Cluster;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Plain-text metrics.
    Text,
    /// Pretty-printed JSON snapshot.
    Json,
}

pub fn render(cluster: &Cluster, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Text => Ok(cluster.metrics()),
        OutputFormat::Json => {
            let mut json = serde_json::to_string_pretty(&cluster.snapshot())?;
            json.push('\n');
            Ok(json)
        }
    }
}

/// Write `content` to `path`, or to stdout when no path is given.
pub fn emit(content: &str, path: Option<&Path>) -> anyhow::Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("failed to write metrics to {}", path.display()))?;
            println!("✓ Metrics written to {}", path.display());
        }
        None => print!("{content}"),
    }
    Ok(())
}
