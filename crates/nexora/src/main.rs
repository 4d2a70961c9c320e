use nexora::config::Config;
use nexora::http;
use nexora::lifecycle::{Marketplace, Settings};
use nexora_actor::tracing::setup_tracing;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing::{error, info, Instrument};

#[tokio::main]
async fn main() -> Result<(), String> {
    setup_tracing();

    let config = Config::from_env().map_err(|e| {
        error!(error = %e, "Configuration invalid");
        e.to_string()
    })?;
    info!(?config, "Configuration loaded");

    let settings = Settings::from_config(&config).map_err(|e| e.to_string())?;
    let market = Marketplace::start(settings);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| format!("failed to bind {addr}: {e}"))?;
    info!(%addr, "Listening");

    let span = tracing::info_span!("http");
    let served = http::serve(listener, market.app_state(), shutdown_signal())
        .instrument(span)
        .await;
    if let Err(e) = &served {
        error!(error = %e, "Server stopped with an error");
    }

    market.shutdown().await?;
    served.map_err(|e| e.to_string())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Ctrl-C received, shutting down"),
        Err(e) => error!(error = %e, "Failed to listen for Ctrl-C; shutting down"),
    }
}
