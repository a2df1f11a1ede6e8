//! outcome-layer demo host
//!
//! Serves a demo application through the boundary adapter so every outcome
//! can be exercised with curl.

mod demo;

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use outcome_layer::adapter::AdapterOptions;
use outcome_layer::config::{load_config, AppConfig};
use outcome_layer::observability::{logging, metrics};
use outcome_layer::{handler_fn, GatewayHost, OutcomeAdapter};

#[derive(Parser)]
#[command(name = "outcome-layer")]
#[command(about = "Demo host for typed HTTP outcomes", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override `server.bind_address`.
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => AppConfig::default(),
    };
    if let Some(bind) = cli.bind {
        config.server.bind_address = bind;
    }

    logging::init_logging(&config.observability);
    tracing::info!(
        bind_address = %config.server.bind_address,
        expose_diagnostics = config.adapter.expose_diagnostics,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let adapter = OutcomeAdapter::new(handler_fn(demo::app))
        .with_options(AdapterOptions::from(&config.adapter));

    let listener = TcpListener::bind(&config.server.bind_address).await?;
    let host = GatewayHost::new(adapter, config.server);
    host.run(listener).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
