//! NAV Lens - API Server Binary
//!
//! This binary starts the HTTP API server for fund analytics.
//!
//! # Usage
//!
//! ```bash
//! # Run with default configuration
//! cargo run --bin navlens-api
//!
//! # Run with environment variables
//! API_HOST=127.0.0.1 API_PORT=9090 cargo run --bin navlens-api
//! ```
//!
//! # Environment Variables
//!
//! * `API_HOST` - Server host (default: 0.0.0.0)
//! * `API_PORT` - Server port (default: 8080)
//! * `API_LOG_LEVEL` - Log level: trace, debug, info, warn, error (default: info)
//! * `API_PROVIDER_BASE_URL` - Mutual fund data provider (default: https://api.mfapi.in)
//! * `API_PROVIDER_TIMEOUT_SECS` - Provider request timeout (default: 30)
//! * `API_PROVIDER_RETRY_ATTEMPTS` - Attempts per provider call (default: 3)
//! * `API_PROVIDER_MAX_RETRY_DELAY_SECS` - Longest wait between retries (default: 30)
//! * `API_CACHE_TTL_SECS` - Lifetime of cached provider data (default: 43200)
//! * `API_CACHE_CAPACITY` - Maximum cached responses (default: 1000)

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use domain_fund::SchemeDataPort;
use infra_market::{CachedSchemeSource, MfApiClient};
use interface_api::{config::ApiConfig, create_router};
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Main entry point for the API server.
///
/// Initializes logging, loads configuration, builds the provider client
/// and its cache, and starts the HTTP server.
///
/// # Errors
///
/// Returns an error if:
/// - Configuration in the environment is invalid
/// - The provider client cannot be built
/// - Server fails to bind to the configured address
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file if present (useful for local development)
    dotenvy::dotenv().ok();

    let config = ApiConfig::from_env()?;

    init_tracing(&config.log_level);

    tracing::info!(
        host = %config.host,
        port = %config.port,
        provider = %config.provider_base_url,
        "Starting NAV Lens API Server"
    );

    let schemes = build_scheme_source(&config)?;
    let app = create_router(schemes, config.clone());

    let addr: SocketAddr = config
        .server_addr()
        .parse()
        .with_context(|| format!("invalid server address {}", config.server_addr()))?;

    tracing::info!(%addr, "Server listening");

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Initializes the tracing subscriber for structured logging.
///
/// `RUST_LOG` takes precedence over the configured level.
fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .init();
}

/// Builds the provider client wrapped in the response cache
fn build_scheme_source(config: &ApiConfig) -> anyhow::Result<Arc<dyn SchemeDataPort>> {
    let client = MfApiClient::new(config.provider_config()).context("failed to build provider client")?;
    let cache = config.cache_config();

    tracing::info!(
        ttl_secs = cache.ttl.as_secs(),
        capacity = cache.capacity,
        "Provider responses are cached"
    );

    Ok(Arc::new(CachedSchemeSource::new(Arc::new(client), cache)))
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
///
/// In-flight requests complete before the process exits. If a signal
/// handler cannot be installed, that signal is ignored.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}
