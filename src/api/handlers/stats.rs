//! Handler for per-link statistics.

use axum::{
    Json,
    extract::{Path, State},
};

use crate::api::dto::link::LinkStatsResponse;
use crate::error::AppError;
use crate::state::AppState;

/// Returns a link together with its access counter.
///
/// # Endpoint
///
/// `GET /shorten/{code}/stats`
///
/// # Errors
///
/// Returns 404 Not Found if the short code doesn't exist.
pub async fn link_stats_handler(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Json<LinkStatsResponse>, AppError> {
    let link = state.link_service.stats(&code).await?;

    Ok(Json(link.into()))
}
