use std::net::SocketAddr;

use tracing::{error, info, warn};

use campuspaths_service::{app, ServiceConfig};
use campuspaths_service_shared::{
    init_logging, init_metrics, AppState, LoggingConfig, MetricsConfig,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging(&LoggingConfig::from_env())?;

    if let Err(e) = init_metrics(&MetricsConfig::from_env()) {
        warn!(error = %e, "metrics recorder not installed, continuing without metrics");
    }

    let config = ServiceConfig::from_env()?;
    info!(data_dir = %config.data_dir.display(), port = config.port, "starting campus paths service");

    let state = AppState::load(&config.data_dir).map_err(|e| {
        error!(error = %e, path = %config.data_dir.display(), "failed to load application state");
        e
    })?;

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(addr = %addr, "listening");

    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("campus paths service stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "failed to listen for shutdown signal");
    }
}
