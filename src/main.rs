use anyhow::{Context, Result};
use tokio::net::TcpListener;
use tracing::{info, warn};

use rustcost_insights::app_state::build_app_state;
use rustcost_insights::core::config::AppConfig;
use rustcost_insights::core::logging::init_tracing;
use rustcost_insights::debug::run_debug;
use rustcost_insights::routes::app_router;

#[tokio::main]
async fn main() -> Result<()> {
    let config = AppConfig::load();
    let _guard = init_tracing(&config)?;

    if config.debug_mode {
        run_debug(&config).await;
        return Ok(());
    }

    let addr = config.socket_addr()?;
    let app = app_router().with_state(build_app_state(&config));

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!("🚀 rustcost-insights listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
    }
}
