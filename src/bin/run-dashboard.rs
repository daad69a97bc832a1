//! # Run Dashboard Server
//!
//! Serves the dashboard API in front of the configured orchestrator tenant.

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};

use run_dashboard::config::DEFAULT_CONFIG_FILE;
use run_dashboard::logging::init_structured_logging;
use run_dashboard::{router, AppState, DashboardConfig, HatchetClient, RunHistory};

#[derive(Parser, Debug)]
#[command(name = "run-dashboard")]
#[command(about = "Workflow run dashboard backend")]
#[command(version = env!("CARGO_PKG_VERSION"))]
struct Args {
    /// Configuration file (extension optional); missing default file is not an error
    #[arg(short, long, env = "DASHBOARD_CONFIG")]
    config: Option<PathBuf>,

    /// Address to bind, overriding the configured one
    #[arg(short, long, env = "DASHBOARD_BIND")]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    init_structured_logging();

    let mut config = match &args.config {
        Some(path) => DashboardConfig::load_from(path, true)
            .with_context(|| format!("loading configuration from {}", path.display()))?,
        None => DashboardConfig::load()
            .with_context(|| format!("loading configuration (default file {DEFAULT_CONFIG_FILE})"))?,
    };
    if let Some(bind) = args.bind {
        config.bind_address = bind;
    }

    let client = HatchetClient::new(config.orchestrator.clone())
        .context("creating orchestrator client")?;

    let history = match &config.history_file {
        Some(path) => RunHistory::load(path, config.history_limit),
        None => RunHistory::new(config.history_limit),
    };

    let bind_address = config.bind_address.clone();
    info!(
        bind_address = %bind_address,
        orchestrator = %client.base_url(),
        history_entries = history.len(),
        "Starting run dashboard"
    );

    let state = AppState::new(config, Arc::new(client), history);
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(&bind_address)
        .await
        .with_context(|| format!("binding {bind_address}"))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("serving dashboard")?;

    info!("Run dashboard stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
