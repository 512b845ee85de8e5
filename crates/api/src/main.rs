//! Cost API - cloud cost analysis service
//!
//! Accepts CSV cost data, classifies waste, and serves analysis summaries
//! and cost savings reports over HTTP.

use analyzer_lib::AnalyzerMetrics;
use anyhow::Result;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cost_api::{api, config};

const API_VERSION: &str = env!("CARGO_PKG_VERSION");

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing with JSON output and env filter
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(fmt::layer().json())
        .init();

    info!(version = API_VERSION, "Starting cost-api");

    let config = config::ApiConfig::load()?;
    info!(bind_address = %config.bind_address, port = config.port, "API configured");

    let metrics = AnalyzerMetrics::new();
    let state = Arc::new(api::AppState::new(metrics));

    let server = tokio::spawn(api::serve(config.bind_address.clone(), config.port, state));

    tokio::signal::ctrl_c().await?;
    info!("Shutting down");
    server.abort();

    Ok(())
}
