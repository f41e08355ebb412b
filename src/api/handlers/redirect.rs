//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde_json::json;
use url::Url;

use crate::error::AppError;
use crate::state::AppState;

/// Redirects a short code to its target URL.
///
/// # Endpoint
///
/// `GET /r/{code}`
///
/// # Behavior
///
/// - Known code: `302 Found` with the target in `Location`; the link's
///   access counter is incremented before the response is sent
/// - Unknown code: `404` with a plain-text `Not Found` body
///
/// # Errors
///
/// Returns 500 if the link lookup itself fails.
pub async fn redirect_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<Response, AppError> {
    match state.redirect_service.resolve(&code).await {
        Ok(target) => {
            let location = location_header(&target)?;
            Ok((StatusCode::FOUND, [(header::LOCATION, location)]).into_response())
        }
        Err(AppError::NotFound { .. }) => Ok((StatusCode::NOT_FOUND, "Not Found").into_response()),
        Err(e) => Err(e),
    }
}

/// Builds a `Location` value. Targets with non-ASCII or control characters
/// are replaced by their parsed form (punycode host, percent-encoded path).
fn location_header(target: &str) -> Result<HeaderValue, AppError> {
    if target.is_ascii() {
        if let Ok(value) = HeaderValue::from_str(target) {
            return Ok(value);
        }
    }

    Url::parse(target)
        .ok()
        .and_then(|url| HeaderValue::from_str(url.as_str()).ok())
        .ok_or_else(|| {
            AppError::store_unavailable(
                "Stored URL cannot be used as a redirect target",
                json!({ "url": target }),
            )
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_header_passes_ascii_through() {
        let value = location_header("https://example.com/page?q=1").unwrap();
        assert_eq!(value, "https://example.com/page?q=1");
    }

    #[test]
    fn test_location_header_strips_control_characters() {
        let value = location_header("https://example.com/a\nb").unwrap();
        assert_eq!(value, "https://example.com/ab");
    }

    #[test]
    fn test_location_header_encodes_non_ascii() {
        let value = location_header("https://例え.jp/ページ").unwrap();
        let value = value.to_str().unwrap();

        assert!(value.is_ascii());
        assert!(value.starts_with("https://xn--"));
        assert!(value.ends_with("/%E3%83%9A%E3%83%BC%E3%82%B8"));
    }
}
