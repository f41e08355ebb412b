//! API route configuration.

use anyhow::Result;
use axum::{
    Router,
    routing::{get, post},
};

use crate::api::handlers::{
    create_link_handler, delete_link_handler, get_link_handler, link_stats_handler,
    list_links_handler, update_link_handler,
};
use crate::api::middleware::rate_limit;
use crate::config::RateLimitConfig;
use crate::state::AppState;

/// Link management routes.
///
/// # Endpoints
///
/// - `POST   /shorten`               - Create a short link (rate limited)
/// - `GET    /shorten`               - List links (paginated)
/// - `GET    /shorten/{code}`        - Get a link
/// - `PUT    /shorten/{code}`        - Replace a link's target URL
/// - `DELETE /shorten/{code}`        - Delete a link
/// - `GET    /shorten/{code}/stats`  - Get a link with its access count
///
/// Passing `None` for `rate_limit` leaves link creation unlimited.
pub fn link_routes(rate_limit: Option<&RateLimitConfig>) -> Result<Router<AppState>> {
    let create = match rate_limit {
        Some(config) => rate_limit::limit(post(create_link_handler), config)?,
        None => post(create_link_handler),
    };

    Ok(Router::new()
        .route("/shorten", get(list_links_handler).merge(create))
        .route(
            "/shorten/{code}",
            get(get_link_handler)
                .put(update_link_handler)
                .delete(delete_link_handler),
        )
        .route("/shorten/{code}/stats", get(link_stats_handler)))
}
