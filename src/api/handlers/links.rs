//! Handlers for link management endpoints (create, list, get, update, delete).

use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
};
use serde_json::json;
use validator::Validate;

use crate::api::dto::link::{LinkListResponse, LinkRequest, LinkResponse};
use crate::api::dto::pagination::{PaginationMeta, PaginationParams, offset_limit};
use crate::application::services::link_not_found;
use crate::error::AppError;
use crate::state::AppState;

/// Creates a short link.
///
/// # Endpoint
///
/// `POST /shorten`
///
/// # Request Body
///
/// ```json
/// { "url": "https://example.com/page" }
/// ```
///
/// # Response
///
/// `201 Created`:
///
/// ```json
/// {
///   "id": "1",
///   "url": "https://example.com/page",
///   "shortCode": "aB3xQ9",
///   "createdAt": "2024-05-01T10:00:00.123Z",
///   "updatedAt": "2024-05-01T10:00:00.123Z"
/// }
/// ```
///
/// # Errors
///
/// Returns 400 Bad Request if the body is not JSON, `url` is missing, or
/// `url` is not an absolute `http`/`https` URL.
pub async fn create_link_handler(
    State(state): State<AppState>,
    payload: Result<Json<LinkRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<LinkResponse>), AppError> {
    let url = request_url(payload)?;

    let link = state.link_service.create(&url).await?;

    Ok((StatusCode::CREATED, Json(link.into())))
}

/// Lists links ordered by id.
///
/// # Endpoint
///
/// `GET /shorten?page=1&page_size=25`
///
/// # Errors
///
/// Returns 400 Bad Request if `page` or `page_size` is not a number, `page`
/// is 0, or `page_size` is out of range.
pub async fn list_links_handler(
    State(state): State<AppState>,
    params: Result<Query<PaginationParams>, QueryRejection>,
) -> Result<Json<LinkListResponse>, AppError> {
    let Query(params) = params?;
    let (page, page_size) = params.resolve(state.pagination)?;
    let (offset, limit) = offset_limit(page, page_size);

    let result = state.link_service.list(offset, limit).await?;

    Ok(Json(LinkListResponse {
        pagination: PaginationMeta::new(page, page_size, result.total),
        items: result.items.into_iter().map(Into::into).collect(),
    }))
}

/// Retrieves a link by short code.
///
/// # Endpoint
///
/// `GET /shorten/{code}`
///
/// # Errors
///
/// Returns 404 Not Found if the short code doesn't exist.
pub async fn get_link_handler(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Json<LinkResponse>, AppError> {
    let link = state.link_service.get(&code).await?;

    Ok(Json(link.into()))
}

/// Replaces the target URL of a link.
///
/// # Endpoint
///
/// `PUT /shorten/{code}`
///
/// `id`, `shortCode` and `createdAt` are preserved; `updatedAt` is refreshed.
///
/// # Errors
///
/// Returns 400 Bad Request on an invalid body or URL.
/// Returns 404 Not Found if the short code doesn't exist.
pub async fn update_link_handler(
    State(state): State<AppState>,
    Path(code): Path<String>,
    payload: Result<Json<LinkRequest>, JsonRejection>,
) -> Result<Json<LinkResponse>, AppError> {
    let url = request_url(payload)?;

    let link = state.link_service.update(&code, &url).await?;

    Ok(Json(link.into()))
}

/// Deletes a link.
///
/// # Endpoint
///
/// `DELETE /shorten/{code}`
///
/// The record is removed; its short code may be drawn again later, its id
/// is never reissued.
///
/// # Errors
///
/// Returns 404 Not Found if the short code doesn't exist.
pub async fn delete_link_handler(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<StatusCode, AppError> {
    if !state.link_service.delete(&code).await? {
        return Err(link_not_found(&code));
    }

    Ok(StatusCode::NO_CONTENT)
}

fn request_url(payload: Result<Json<LinkRequest>, JsonRejection>) -> Result<String, AppError> {
    let Json(request) = payload?;
    request.validate()?;

    request
        .url
        .ok_or_else(|| AppError::invalid_input("url is required", json!({ "fields": ["url"] })))
}
