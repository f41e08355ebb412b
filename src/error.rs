//! Application error type and its HTTP rendering.
//!
//! Every layer reports failures through [`AppError`]. Repositories convert
//! `sqlx` errors with `?`, services add validation and lookup failures, and
//! handlers return the error directly so axum renders it via [`IntoResponse`].

use axum::{
    Json,
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};
use std::fmt;

use crate::domain::entities::DuplicateKey;
use crate::utils::db_error::duplicate_key_of;

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorInfo,
}

/// Machine-readable error payload.
#[derive(Debug, Serialize)]
pub struct ErrorInfo {
    pub code: &'static str,
    pub message: String,
    pub details: Value,
}

#[derive(Debug)]
pub enum AppError {
    /// Bad or missing client input, e.g. a URL that is not absolute `http`/`https`.
    InvalidInput { message: String, details: Value },
    /// Unknown short code.
    NotFound { message: String, details: Value },
    /// An insert collided with an existing `id` or `short_code`.
    DuplicateKey {
        key: DuplicateKey,
        message: String,
        details: Value,
    },
    /// The underlying store failed.
    StoreUnavailable { message: String, details: Value },
}

impl AppError {
    pub fn invalid_input(message: impl Into<String>, details: Value) -> Self {
        Self::InvalidInput {
            message: message.into(),
            details,
        }
    }

    pub fn not_found(message: impl Into<String>, details: Value) -> Self {
        Self::NotFound {
            message: message.into(),
            details,
        }
    }

    pub fn duplicate_key(key: DuplicateKey, details: Value) -> Self {
        Self::DuplicateKey {
            key,
            message: format!("Duplicate {}", key),
            details,
        }
    }

    pub fn store_unavailable(message: impl Into<String>, details: Value) -> Self {
        Self::StoreUnavailable {
            message: message.into(),
            details,
        }
    }

    /// Returns the colliding key if this is a [`AppError::DuplicateKey`].
    pub fn duplicate(&self) -> Option<DuplicateKey> {
        match self {
            AppError::DuplicateKey { key, .. } => Some(*key),
            _ => None,
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidInput { .. } => StatusCode::BAD_REQUEST,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::DuplicateKey { .. } => StatusCode::CONFLICT,
            AppError::StoreUnavailable { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn code(&self) -> &'static str {
        match self {
            AppError::InvalidInput { .. } => "invalid_input",
            AppError::NotFound { .. } => "not_found",
            AppError::DuplicateKey { .. } => "duplicate_key",
            AppError::StoreUnavailable { .. } => "store_unavailable",
        }
    }

    fn message(&self) -> &str {
        match self {
            AppError::InvalidInput { message, .. }
            | AppError::NotFound { message, .. }
            | AppError::DuplicateKey { message, .. }
            | AppError::StoreUnavailable { message, .. } => message,
        }
    }

    /// Builds the JSON error payload without consuming the error.
    pub fn to_error_info(&self) -> ErrorInfo {
        let details = match self {
            AppError::InvalidInput { details, .. }
            | AppError::NotFound { details, .. }
            | AppError::DuplicateKey { details, .. }
            | AppError::StoreUnavailable { details, .. } => details.clone(),
        };

        ErrorInfo {
            code: self.code(),
            message: self.message().to_string(),
            details,
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code(), self.message())
    }
}

impl std::error::Error for AppError {}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if let AppError::StoreUnavailable { ref message, .. } = self {
            tracing::error!(error = %message, "Store failure while handling request");
        }

        let status = self.status_code();
        let body = ErrorBody {
            error: self.to_error_info(),
        };

        (status, Json(body)).into_response()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        if let Some(key) = duplicate_key_of(&e) {
            return AppError::duplicate_key(key, json!({}));
        }

        AppError::store_unavailable("Database error", json!({ "reason": e.to_string() }))
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(e: validator::ValidationErrors) -> Self {
        let fields: Vec<String> = e.field_errors().keys().map(|k| k.to_string()).collect();
        let message = e
            .field_errors()
            .values()
            .flat_map(|errors| errors.iter())
            .find_map(|error| error.message.as_ref().map(|m| m.to_string()))
            .unwrap_or_else(|| "Validation failed".to_string());

        AppError::invalid_input(message, json!({ "fields": fields }))
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::invalid_input(
            "Request body must be a JSON object",
            json!({ "reason": rejection.body_text() }),
        )
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::invalid_input(
            "Invalid query parameters",
            json!({ "reason": rejection.body_text() }),
        )
    }
}
