use std::sync::Arc;

use basalt::metrics::Telemetry;
use server_http::{build_router, AppState};
use shared::config::Config;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    // Load environment variables from .env file (if exists)
    let dotenv = dotenvy::dotenv();

    let config = Config::from_env().expect("Invalid configuration");

    // Initialize tracing at the configured level
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(&config.log_level).expect("Invalid BASALT_LOG_LEVEL"))
        .init();

    info!("Starting Basalt HTTP Server...");
    match dotenv {
        Ok(_) => info!("Loaded environment variables from .env file"),
        Err(_) => info!("No .env file found, using system environment variables"),
    }

    config.validate_and_log().expect("Invalid configuration");

    basalt::metrics::describe_metrics();
    let metrics = Arc::new(Telemetry);

    // No degraded mode: a backend that cannot be built aborts startup.
    let backend = storage_engine::new_backend(&config, metrics)
        .await
        .expect("Failed to construct the storage backend");

    let state = AppState::new(backend);
    let router = build_router(state);

    let listener = TcpListener::bind(format!("{}:{}", config.host, config.http_port))
        .await
        .expect("Failed to bind HTTP server");

    info!(
        "HTTP Server listening on http://{}:{}",
        config.host, config.http_port
    );

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("HTTP server error");

    info!("Server shutdown complete");
}

async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C signal"),
        _ = terminate => info!("Received terminate signal"),
    }

    info!("Shutting down gracefully...");
}
