use std::io::Read;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use pogo_engine::Valuator;
use pogo_models::PogoConfig;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "pogo-trade", about = "Creature catalog and trade fairness service")]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/pogo-trade.toml", global = true)]
    config: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP service
    Serve {
        /// Listen address, overrides `server.bind`
        #[arg(long, env = "POGO_BIND")]
        bind: Option<String>,
    },
    /// Evaluate one trade request and print the result
    Evaluate {
        /// Read the request JSON from a file instead of stdin
        #[arg(short, long)]
        input: Option<String>,

        /// Pretty-print the output JSON
        #[arg(long)]
        pretty: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing (respects RUST_LOG env var)
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config_str = std::fs::read_to_string(&cli.config)
        .with_context(|| format!("Failed to read config: {}", cli.config))?;
    let mut config: PogoConfig =
        toml::from_str(&config_str).with_context(|| "Failed to parse config")?;

    match cli.command {
        Command::Serve { bind } => {
            if let Some(bind) = bind {
                config.server.bind = bind;
            }
            serve(config).await
        }
        Command::Evaluate { input, pretty } => evaluate(&config, input.as_deref(), pretty).await,
    }
}

async fn serve(config: PogoConfig) -> Result<()> {
    let listener = TcpListener::bind(&config.server.bind)
        .await
        .with_context(|| format!("Failed to bind {}", config.server.bind))?;
    let app = pogo_trade::build_app(&config);

    let cancel = CancellationToken::new();
    let shutdown = cancel.clone();
    tokio::spawn(async move {
        let _ = tokio::signal::ctrl_c().await;
        tracing::info!("Received shutdown signal");
        shutdown.cancel();
    });

    pogo_trade::server::run(listener, app, cancel)
        .await
        .context("Server error")
}

async fn evaluate(config: &PogoConfig, input: Option<&str>, pretty: bool) -> Result<()> {
    let body = if let Some(input_path) = input {
        std::fs::read(input_path).with_context(|| format!("Failed to read input: {input_path}"))?
    } else {
        let mut buf = Vec::new();
        std::io::stdin()
            .read_to_end(&mut buf)
            .context("Failed to read from stdin")?;
        buf
    };

    let catalog = pogo_catalog::load(config.catalog.path.as_ref())
        .await
        .with_context(|| format!("Failed to load catalog: {}", config.catalog.path))?;

    let valuator = Valuator::new(config.valuation.locale);
    let response = pogo_trade::evaluate_body(&body, &catalog, &valuator)
        .map_err(|e| anyhow::anyhow!("Evaluation failed: {e}"))?;

    let output = if pretty {
        serde_json::to_string_pretty(&response)?
    } else {
        serde_json::to_string(&response)?
    };
    println!("{output}");

    Ok(())
}
