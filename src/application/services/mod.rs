//! Business logic services for the application layer.

pub mod link_service;
pub mod redirect_service;

pub use link_service::{LinkPage, LinkService, LinkSummary};
pub use redirect_service::RedirectService;

use crate::error::AppError;
use serde_json::json;

/// Error returned when a short code has no live link.
pub(crate) fn link_not_found(code: &str) -> AppError {
    AppError::not_found("Short link not found", json!({ "code": code }))
}
