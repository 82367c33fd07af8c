use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

use slotkeeper::config::Config;
use slotkeeper::engine::Engine;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env();
    slotkeeper::observability::init(config.metrics_port)?;

    // One store for the life of the process; nothing survives a restart.
    let engine = Arc::new(Engine::with_max_bookings(config.max_bookings));

    let addr = config.addr();
    let listener = TcpListener::bind(&addr).await?;
    info!("slotkeeper listening on http://{addr}");
    info!("  max_bookings: {}", config.max_bookings);
    info!(
        "  metrics: {}",
        config
            .metrics_port
            .map_or("disabled".to_string(), |p| format!("http://0.0.0.0:{p}/metrics"))
    );

    if let Err(e) = slotkeeper::http::serve(engine, listener, shutdown_signal()).await {
        tracing::error!("server error: {e}");
        return Err(e.into());
    }

    info!("slotkeeper stopped");
    Ok(())
}

/// Resolves on ctrl-c, or SIGTERM on unix.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("failed to listen for ctrl-c: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                tokio::select! {
                    _ = ctrl_c => {}
                    _ = sigterm.recv() => {}
                }
            }
            Err(e) => {
                tracing::warn!("failed to register SIGTERM handler: {e}");
                ctrl_c.await;
            }
        }
    }
    #[cfg(not(unix))]
    {
        ctrl_c.await;
    }

    info!("shutdown signal received, draining requests");
}
