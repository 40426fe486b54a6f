use std::path::Path;

use podgrid_placement::ClusterConfig;

/// Write the default cluster layout as a starting cluster.toml.
pub fn init(path: &Path, force: bool) -> anyhow::Result<()> {
    if path.exists() && !force {
        anyhow::bail!("{} already exists (use --force to overwrite)", path.display());
    }

    ClusterConfig::default().write_to(path)?;
    println!("✓ Generated {}", path.display());
    Ok(())
}
