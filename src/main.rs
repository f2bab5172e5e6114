//! Application entry point and server initialization
//!
//! This module contains the main function that:
//! - Loads environment configuration
//! - Builds the in-memory record store
//! - Starts the HTTP server with graceful shutdown support

use anyhow::Context;
use dotenvy::dotenv;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use url_shortener::config::{Config, DEFAULT_LOG_FILTER};
use url_shortener::route::create_app;
use url_shortener::store::{AppState, RecordStore};

/// Application entry point
///
/// 1. Loads environment variables from a .env file
/// 2. Reads and validates the configuration
/// 3. Builds the record store and application state
/// 4. Starts the HTTP server with graceful shutdown handling
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file if it exists
    dotenv().ok();

    let config = Config::from_env().context("Failed to load configuration")?;
    config.validate()?;

    init_tracing(&config);

    let store = RecordStore::seeded();
    tracing::info!(
        short_urls = store.short_urls().len(),
        movies = store.movies().len(),
        "record store ready"
    );

    let app = create_app(AppState::new(store)).layer(TraceLayer::new_for_http());

    let addr = config.listen_addr();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    tracing::info!("listening on http://{addr}");

    // The server keeps running until it receives SIGTERM or SIGINT
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    Ok(())
}

fn init_tracing(config: &Config) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    if config.json_logs() {
        builder.json().init();
    } else {
        builder.init();
    }
}

/// Handles graceful shutdown signals
///
/// Returns when either SIGINT (Ctrl+C) or, on Unix, SIGTERM is received.
/// Open connections are allowed to complete before the process exits.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    // On non-Unix systems (Windows), only handle Ctrl+C
    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("shutdown signal received, stopping server");
}
