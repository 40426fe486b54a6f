use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;
mod manifest;
mod output;

use output::OutputFormat;

#[derive(Parser)]
#[command(
    name = "podgrid",
    about = "podgrid — first-fit pod placement simulator",
    version,
    propagate_version = true,
)]
struct Cli {
    /// Log every placement attempt and rollback.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Deploy pods from a JSON manifest and print the cluster metrics.
    ///
    /// Without --config the cluster is Server1 (4 CPU, 8 mem),
    /// Server2 (4 CPU, 8 mem) and Server3 (2 CPU, 4 mem).
    Deploy {
        /// Pod manifest (JSON array of pods)
        #[arg(short, long)]
        pods: PathBuf,
        /// Cluster definition (cluster.toml)
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Output format: text or json
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,
        /// Write metrics to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Generate a cluster.toml with the default node layout
    InitConfig {
        #[arg(short, long, default_value = "cluster.toml")]
        path: PathBuf,
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
    /// Parse a pod manifest and summarize it without deploying
    Validate {
        #[arg(short, long)]
        pods: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let directive = if cli.verbose { "podgrid=debug" } else { "podgrid=info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(directive.parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Deploy {
            pods,
            config,
            format,
            output,
        } => commands::deploy::deploy(&pods, config.as_deref(), format, output.as_deref()),
        Commands::InitConfig { path, force } => commands::init::init(&path, force),
        Commands::Validate { pods } => commands::validate::validate(&pods),
    }
}
