//! Road to 1 BTC service

pub mod config;
pub mod price_watcher;

use std::time::Duration;

use anyhow::Context;
use road_api::AppState;

use price_watcher::PriceRefresher;

/// Run the service until Ctrl-C
pub async fn run() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("road_app=debug".parse()?)
                .add_directive("info".parse()?),
        )
        .init();

    tracing::info!("Starting Road to 1 BTC");

    let config = config::load_config()?;
    let state = AppState::with_config(config.clone()).context("failed to initialize state")?;

    let refresher = PriceRefresher::new();
    refresher.start(
        state.clone(),
        Duration::from_secs(config.refresh_interval_secs),
    );

    let served = road_api::serve_until(state, config.api_port, shutdown_signal()).await;

    refresher.stop().await;
    served.with_context(|| format!("API server failed on port {}", config.api_port))?;

    tracing::info!("Road to 1 BTC stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown requested");
}
