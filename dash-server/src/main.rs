//! Web dashboard for SpaceX launch records
//!
//! Serves the dashboard page plus the JSON endpoints it calls on every input
//! change. The dataset is read once at startup.
//!
//! Environment variables (a `.env` file is honoured):
//!   DASH_CONFIG   - config file (default: ~/.config/launch-dash/config.toml)
//!   DASH_HOST     - bind address override
//!   DASH_PORT     - port override (default 8052)
//!   DASH_CSV_PATH - launch records CSV override
//!   RUST_LOG      - log filter override

mod error;
mod routes;
mod state;

use anyhow::{Context, Result};
use launch_dash::config::config::Config;
use launch_dash::dashboard::Dashboard;
use launch_dash::launch::LaunchDataset;
use launch_dash::utils::logging::init_tracing;
use state::AppState;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info};

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(target: "server", "Failed to listen for Ctrl-C: {}", e);
        return;
    }
    info!(target: "server", "Shutting down");
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    let config_path = std::env::var("DASH_CONFIG").ok().map(PathBuf::from);
    let mut config = Config::load(config_path.as_deref())?;
    config.apply_env_overrides();

    let logs = init_tracing(&config.logging.filter);

    let dataset = match LaunchDataset::load_csv(&config.data.csv_path, &config.data.columns) {
        Ok(dataset) => Arc::new(dataset),
        Err(e) => {
            error!(target: "server", "Cannot start without launch data: {:#}", e);
            return Err(e);
        }
    };

    let dashboard = Dashboard::new(dataset, config.dashboard.clone());
    let state = AppState::new(dashboard, logs, config.server.figure_cache_size);
    let app = routes::router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!(
        target: "server",
        "Dashboard listening on http://{}",
        listener.local_addr()?
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}
