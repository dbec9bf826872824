//! MT5 Bridge — Entry Point
//!
//! Headless bridge runner: keeps a remote trading-bot API and a local
//! MT5 drop folder in sync until SIGINT.
//!
//! Wiring sequence:
//! 1. Load config.toml + validate
//! 2. Init tracing (JSON structured logging)
//! 3. Create ApiClient (X-API-Key auth + timeout)
//! 4. Probe /api/health once for an early reachability log line
//! 5. Create BridgeController and start it on the configured drop folder
//! 6. Log bridge events (the desktop shell binds these to widgets instead)
//! 7. Wait for SIGINT → graceful stop (cancel→drain→exit)

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tokio::signal;
use tracing::info;

use mt5_bridge::adapters::api::{ApiClient, ApiClientConfig, HttpRemoteEndpoint};
use mt5_bridge::config;
use mt5_bridge::domain::BridgeEvent;
use mt5_bridge::ports::RemoteEndpoint;
use mt5_bridge::usecases::BridgeController;

#[tokio::main]
async fn main() -> Result<()> {
    // ── 1. Load configuration from config.toml ──────────────
    let config = config::loader::load_config("config.toml")
        .context("Failed to load configuration")?;

    // ── 2. Initialize structured JSON logging ───────────────
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::new(&config.bridge.log_level)
            }),
        )
        .json()
        .init();

    info!(
        version = env!("CARGO_PKG_VERSION"),
        base_url = %config.api.base_url,
        drop_folder = %config.bridge.drop_folder.display(),
        "Starting MT5 bridge"
    );

    // ── 3. Create the VPS client + endpoint adapter ─────────
    let client = ApiClient::new(ApiClientConfig {
        base_url: config.api.base_url.clone(),
        api_key: config.api.effective_api_key(),
        timeout: Duration::from_millis(config.api.timeout_ms),
    })
    .context("Failed to create VPS client")?;
    let remote = Arc::new(HttpRemoteEndpoint::new(client));

    // ── 4. One-shot reachability probe ──────────────────────
    info!(reachable = remote.is_healthy().await, "VPS health probe");

    // ── 5. Start the bridge ─────────────────────────────────
    let controller = Arc::new(BridgeController::new(remote, config.bridge.clone()));

    // ── 6. Relay bridge events into the log ─────────────────
    let mut events = controller.subscribe_events();
    tokio::spawn(async move {
        loop {
            match events.recv().await {
                Ok(BridgeEvent::StatusChanged(status)) => {
                    info!(status = %status, "Bridge status");
                }
                Ok(BridgeEvent::Sync { description }) => {
                    info!(sync = %description, "Bridge sync");
                }
                Ok(BridgeEvent::Error(message)) => {
                    info!(error = %message, "Bridge reported error");
                }
                Err(tokio::sync::broadcast::error::RecvError::Lagged(_)) => continue,
                Err(tokio::sync::broadcast::error::RecvError::Closed) => break,
            }
        }
    });

    controller.start(&config.bridge.drop_folder).await;

    // ── 7. Wait for SIGINT, then drain ──────────────────────
    signal::ctrl_c().await.context("Failed to listen for SIGINT")?;
    info!("SIGINT received, initiating graceful shutdown");

    controller.stop().await;

    info!("Shutdown complete");
    Ok(())
}
