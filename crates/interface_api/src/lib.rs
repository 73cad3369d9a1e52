//! HTTP API Layer
//!
//! This crate provides the REST API for fund analytics using Axum.
//!
//! # Architecture
//!
//! - **Handlers**: Scheme data, realized returns, and calculators
//! - **Middleware**: Request ids, tracing, request logging
//! - **DTOs**: Request/Response data transfer objects
//! - **Error Handling**: Consistent error responses
//!
//! Scheme data comes from any `SchemeDataPort`; the server binary wires in
//! the provider client behind a TTL cache.
//!
//! # Example
//!
//! ```rust,ignore
//! use interface_api::create_router;
//!
//! let app = create_router(schemes, config);
//! axum::serve(listener, app).await?;
//! ```

pub mod config;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;

use std::sync::Arc;

use axum::{
    http::HeaderName,
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use domain_fund::SchemeDataPort;
use tower_http::cors::{Any, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

use crate::config::ApiConfig;
use crate::handlers::{calculators, health, schemes};
use crate::middleware::{request_logging_middleware, REQUEST_ID_HEADER};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub schemes: Arc<dyn SchemeDataPort>,
    pub config: ApiConfig,
}

/// Creates the main API router
///
/// # Arguments
///
/// * `schemes` - Source of scheme metadata and NAV history
/// * `config` - API configuration
///
/// # Returns
///
/// Configured Axum router with all routes and middleware
pub fn create_router(schemes: Arc<dyn SchemeDataPort>, config: ApiConfig) -> Router {
    let state = AppState { schemes, config };

    // Public routes
    let public_routes = Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check));

    // Scheme routes
    let scheme_routes = Router::new()
        .route("/:code", get(schemes::get_scheme))
        .route("/:code/returns", get(schemes::get_returns))
        .route("/:code/returns/summary", get(schemes::get_returns_summary))
        .route("/:code/rolling-returns", get(schemes::get_rolling_returns))
        .route("/:code/sip", post(schemes::project_scheme_sip));

    // Calculator routes
    let calculator_routes = Router::new()
        .route("/lump-sum", post(calculators::lump_sum))
        .route("/swp", post(calculators::swp))
        .route("/sip-estimate", post(calculators::sip_estimate));

    let api_routes = Router::new()
        .route("/funds", get(schemes::list_funds))
        .nest("/schemes", scheme_routes)
        .nest("/calculators", calculator_routes);

    let request_id = HeaderName::from_static(REQUEST_ID_HEADER);

    // Combine all routes
    Router::new()
        .merge(public_routes)
        .nest("/api/v1", api_routes)
        .layer(axum_middleware::from_fn(request_logging_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::new(request_id.clone()))
        .layer(SetRequestIdLayer::new(request_id, MakeRequestUuid))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
