//! ShopHub Storefront - local-first e-commerce service.
//!
//! This binary serves the JSON API the storefront UI talks to.
//!
//! # Architecture
//!
//! - Axum web framework
//! - Flat JSON-file record store standing in for a backend database
//! - Cookie sessions (in-memory) carrying the cart and the logged-in user
//!
//! State mutations are synchronous request-at-a-time transitions over the
//! record store; there is no background work.

#![cfg_attr(not(test), forbid(unsafe_code))]

use shophub_storefront::config::StorefrontConfig;
use shophub_storefront::state::AppState;
use shophub_storefront::store::Store;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    // Load configuration from environment
    let config = StorefrontConfig::from_env().expect("Failed to load configuration");

    // Initialize tracing with EnvFilter
    // Defaults to info level for our crate if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "shophub_storefront=info,tower_http=debug".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Open the record store
    let store = Store::open(&config.data_dir).expect("Failed to open record store");
    tracing::info!(data_dir = %config.data_dir.display(), "Record store opened");

    // Build application state and router
    let state = AppState::new(config.clone(), store);
    let app = shophub_storefront::app(state);

    // Start server
    let addr = config.socket_addr();
    tracing::info!("storefront listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}
