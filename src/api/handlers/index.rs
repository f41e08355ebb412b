//! Handler for the service index.

use axum::Json;

use crate::api::dto::index::{EndpointInfo, IndexResponse};

const ENDPOINTS: [(&str, &str, &str); 9] = [
    ("POST", "/shorten", "Create a short link"),
    ("GET", "/shorten", "List short links"),
    ("GET", "/shorten/{code}", "Get a short link"),
    ("PUT", "/shorten/{code}", "Replace the target URL"),
    ("DELETE", "/shorten/{code}", "Delete a short link"),
    ("GET", "/shorten/{code}/stats", "Get a short link with its access count"),
    ("GET", "/r/{code}", "Redirect to the target URL"),
    ("GET", "/health", "Health check"),
    ("GET", "/", "This index"),
];

/// Describes the service and its endpoints.
///
/// # Endpoint
///
/// `GET /`
pub async fn index_handler() -> Json<IndexResponse> {
    Json(IndexResponse {
        service: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
        endpoints: ENDPOINTS
            .iter()
            .map(|&(method, path, description)| EndpointInfo {
                method,
                path,
                description,
            })
            .collect(),
    })
}
