//! Storefront API server entry point.

use std::error::Error;
use std::net::SocketAddr;
use std::sync::Arc;

use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use storefront_api::bootstrap;
use storefront_api::config::AppConfig;
use storefront_core::clock::SystemClock;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Initialize tracing subscriber.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .json()
        .init();

    tracing::info!("Starting Storefront API server");

    // Read configuration from environment.
    let config = AppConfig::from_env()?;

    // Wire stores, channels, consumers, and services.
    let application = bootstrap::build(&config, Arc::new(SystemClock));

    // TODO: Replace CorsLayer::permissive() with restricted origins for production.
    let app = application
        .router
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    // Start server.
    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .map_err(|e| format!("invalid HOST:PORT combination: {e}"))?;
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app).await?;

    Ok(())
}
