use std::sync::Arc;
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use catalog_service::config::{BackendKind, Config};
use catalog_service::models::catalog::MySqlCatalog;
use catalog_service::models::memory::MemoryCatalog;
use catalog_service::services::reviews::NytReviewClient;
use catalog_service::state::{Backend, Reviews};
use catalog_service::{router, AppState};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("catalog_service=info,tower_http=info")),
        )
        .init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };

    let backend: Backend = match config.backend {
        BackendKind::MySql => {
            info!(
                "Using MySQL backend at {}:{}/{}",
                config.database.host, config.database.port, config.database.database
            );
            Arc::new(MySqlCatalog::new(&config.database))
        }
        BackendKind::Memory => {
            info!("Using in-memory sample catalog");
            Arc::new(MemoryCatalog::with_sample_books())
        }
    };

    if let Err(e) = backend.test_connection().await {
        error!("Failed to connect to catalog backend: {}", e);
        std::process::exit(1);
    }
    info!("Catalog backend connection successful");

    if config.reviews.api_key.is_empty() {
        error!("NYT_API_KEY is not set; review lookups will be rejected upstream");
    }

    let reviews: Reviews = match NytReviewClient::new(&config.reviews) {
        Ok(client) => Arc::new(client),
        Err(e) => {
            error!("Failed to build review client: {}", e);
            std::process::exit(1);
        }
    };

    let state = AppState::new(Arc::clone(&backend), reviews, config.reviews.api_key.clone());
    let app = router(state);

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!("Failed to bind {}: {}", addr, e);
            std::process::exit(1);
        }
    };

    info!("Catalog service starting on {}", addr);

    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!("Server error: {}", e);
    }

    backend.close().await;
    info!("Catalog service stopped");
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
