use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use pogo_sync::SyncConfig;

#[derive(Parser, Debug)]
#[command(
    name = "pogo-sync",
    about = "Builds the creature catalog from PokeAPI, or the offline dataset when the network is unavailable"
)]
struct Cli {
    /// Path to sync configuration file
    #[arg(short, long, default_value = "config/pogo-sync.toml")]
    config: String,

    /// Skip the network and use the built-in dataset
    #[arg(long)]
    offline: bool,

    /// Output path, overrides `output_path`
    #[arg(short, long)]
    output: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config_str = std::fs::read_to_string(&cli.config)
        .with_context(|| format!("Failed to read config: {}", cli.config))?;
    let mut config: SyncConfig =
        toml::from_str(&config_str).with_context(|| "Failed to parse sync config")?;

    if cli.offline {
        config.offline_only = true;
    }
    if let Some(output) = cli.output {
        config.output_path = output;
    }

    let catalog = pogo_sync::sync(&config)
        .await
        .map_err(|e| anyhow::anyhow!("Sync error: {e}"))?;

    println!(
        "Catalog written: {} ({} creatures)",
        config.output_path,
        catalog.pokemon.len()
    );
    Ok(())
}
