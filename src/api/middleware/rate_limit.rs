//! Rate limiting middleware using token bucket algorithm.

use anyhow::{Context, Result};
use axum::routing::MethodRouter;
use governor::clock::QuantaInstant;
use governor::middleware::NoOpMiddleware;
use std::sync::Arc;
use tower_governor::{
    GovernorLayer,
    governor::GovernorConfigBuilder,
    key_extractor::{KeyExtractor, PeerIpKeyExtractor, SmartIpKeyExtractor},
};

use crate::config::RateLimitConfig;
use crate::state::AppState;

/// Creates a rate limiter keyed by `extractor`.
///
/// # Limits
///
/// - **Rate**: one token every `config.per_second` seconds
/// - **Burst**: `config.burst_size` requests
///
/// Requests exceeding the limit receive `429 Too Many Requests`.
pub fn layer<K: KeyExtractor>(
    extractor: K,
    config: &RateLimitConfig,
) -> Result<GovernorLayer<K, NoOpMiddleware<QuantaInstant>, axum::body::Body>> {
    let governor_conf = GovernorConfigBuilder::default()
        .key_extractor(extractor)
        .per_second(config.per_second)
        .burst_size(config.burst_size)
        .finish()
        .context("Rate limit period and burst size must be greater than 0")?;

    Ok(GovernorLayer::new(Arc::new(governor_conf)))
}

/// Wraps a method router with the configured per-client limiter.
///
/// # Key Extraction
///
/// With `behind_proxy` the client IP is read from `X-Forwarded-For`,
/// `X-Real-IP` or `Forwarded`, falling back to the peer address. Otherwise
/// only the socket peer address is used, which requires the server to be
/// started with `ConnectInfo`.
///
/// # Example
///
/// ```rust,ignore
/// let create = rate_limit::limit(post(create_link_handler), &config.rate_limit)?;
/// ```
pub fn limit(
    route: MethodRouter<AppState>,
    config: &RateLimitConfig,
) -> Result<MethodRouter<AppState>> {
    let route = if config.behind_proxy {
        route.layer(layer(SmartIpKeyExtractor, config)?)
    } else {
        route.layer(layer(PeerIpKeyExtractor, config)?)
    };

    Ok(route)
}
