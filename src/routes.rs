//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /`          - Service index
//! - `GET  /r/{code}`  - Short link redirect
//! - `GET  /health`    - Health check
//! - `/shorten/*`      - Link management API
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Rate limiting** - Per-IP token bucket on link creation
//! - **Path normalization** - Trailing slash handling, see [`normalize`]

use anyhow::Result;
use axum::Router;
use axum::routing::get;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

use crate::api;
use crate::api::handlers::{health_handler, index_handler, redirect_handler};
use crate::api::middleware::tracing;
use crate::config::RateLimitConfig;
use crate::state::AppState;

/// Constructs the application router with all routes and middleware.
///
/// # Arguments
///
/// - `state` - shared application state injected into all handlers
/// - `rate_limit` - limiter settings for link creation; `None` disables it
///
/// # Errors
///
/// Returns an error if the rate limiter cannot be built from `rate_limit`.
pub fn app_router(state: AppState, rate_limit: Option<&RateLimitConfig>) -> Result<Router> {
    let router = Router::new()
        .route("/", get(index_handler))
        .route("/r/{code}", get(redirect_handler))
        .route("/health", get(health_handler))
        .merge(api::routes::link_routes(rate_limit)?)
        .with_state(state)
        .layer(tracing::layer());

    Ok(router)
}

/// Strips trailing slashes before routing, so `/shorten/` matches `/shorten`.
pub fn normalize(router: Router) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(router)
}
