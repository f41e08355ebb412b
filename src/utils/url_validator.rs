//! Target URL validation.
//!
//! A link target must parse as an absolute URL with an `http` or `https`
//! scheme. The input string is stored as given; parsing only decides
//! whether it is acceptable.

use url::Url;

/// Errors that can occur during URL validation.
#[derive(Debug, thiserror::Error)]
pub enum UrlValidationError {
    #[error("URL is empty")]
    Empty,

    #[error("Invalid URL format: {0}")]
    InvalidFormat(String),

    #[error("Only HTTP and HTTPS protocols are allowed, got '{0}'")]
    UnsupportedProtocol(String),
}

/// Checks that `input` is an absolute `http`/`https` URL.
///
/// Rejects relative references, bare words, and other schemes such as
/// `ftp:`, `javascript:`, `data:` or `file:`.
///
/// # Errors
///
/// Returns [`UrlValidationError::Empty`] for blank input,
/// [`UrlValidationError::InvalidFormat`] when parsing fails and
/// [`UrlValidationError::UnsupportedProtocol`] for non-HTTP(S) schemes.
pub fn validate_url(input: &str) -> Result<Url, UrlValidationError> {
    if input.trim().is_empty() {
        return Err(UrlValidationError::Empty);
    }

    let url = Url::parse(input).map_err(|e| UrlValidationError::InvalidFormat(e.to_string()))?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(UrlValidationError::UnsupportedProtocol(other.to_string())),
    }
}
