//! Axum API server binary.

use std::net::SocketAddr;

use anyhow::Context;
use tracing::{error, info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use tubely_api::{create_router, metrics, ApiConfig, AppState};
use tubely_media::{check_ffmpeg, check_ffprobe};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    init_tracing()?;

    info!("Starting tubely-api");

    let config = ApiConfig::from_env().context("Failed to load configuration")?;
    info!("API config: host={}, port={}", config.host, config.port);

    match check_ffprobe(&config.media.ffprobe_path) {
        Ok(path) => info!("Using ffprobe at {}", path.display()),
        Err(e) => warn!("{}; video uploads will fail", e),
    }
    match check_ffmpeg(&config.media.ffmpeg_path) {
        Ok(path) => info!("Using ffmpeg at {}", path.display()),
        Err(e) => warn!("{}; video uploads will fail", e),
    }

    let state = AppState::new(config.clone())
        .await
        .context("Failed to create application state")?;

    let metrics_handle = if config.metrics_enabled {
        info!("Prometheus metrics enabled at /metrics");
        Some(metrics::init_metrics().context("Failed to install Prometheus recorder")?)
    } else {
        None
    };

    let app = create_router(state, metrics_handle);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .context("Invalid bind address")?;

    info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

/// Colored output for dev, JSON when `LOG_FORMAT=json`.
fn init_tracing() -> anyhow::Result<()> {
    let use_json = std::env::var("LOG_FORMAT")
        .map(|v| v.to_lowercase() == "json")
        .unwrap_or(false);

    let env_filter = EnvFilter::from_default_env().add_directive("tubely=info".parse()?);

    if use_json {
        tracing_subscriber::registry()
            .with(fmt::layer().json())
            .with(env_filter)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_ansi(true)
                    .with_target(true)
                    .with_thread_ids(false),
            )
            .with(env_filter)
            .init();
    }

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
        return;
    }
    info!("Received shutdown signal");
}
