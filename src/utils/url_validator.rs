//! Validation of submitted target URLs.
//!
//! Accepted URLs are stored exactly as submitted; nothing is rewritten here, so
//! deduplication compares the caller's original string.

use url::Url;

/// Reasons a submitted URL is rejected.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum UrlValidationError {
    #[error("Invalid URL format: {0}")]
    InvalidFormat(String),

    #[error("Only HTTP and HTTPS protocols are allowed")]
    UnsupportedProtocol,

    #[error("URL must include a host")]
    MissingHost,
}

/// Checks that `input` is an absolute HTTP(S) URL with a host.
///
/// Leading or trailing whitespace is rejected rather than trimmed, because the
/// stored string is later sent verbatim in the `Location` header.
///
/// # Errors
///
/// Returns [`UrlValidationError::InvalidFormat`] for malformed or relative URLs.
/// Returns [`UrlValidationError::UnsupportedProtocol`] for non-HTTP(S) schemes.
/// Returns [`UrlValidationError::MissingHost`] when no host is present.
///
/// # Examples
///
/// ```ignore
/// assert!(validate_url("https://example.com").is_ok());
/// assert!(validate_url("not-a-url").is_err());
/// assert!(validate_url("javascript:alert(1)").is_err());
/// ```
pub fn validate_url(input: &str) -> Result<Url, UrlValidationError> {
    if input.trim() != input {
        return Err(UrlValidationError::InvalidFormat(
            "surrounding whitespace".to_string(),
        ));
    }

    let url = Url::parse(input).map_err(|e| UrlValidationError::InvalidFormat(e.to_string()))?;

    match url.scheme() {
        "http" | "https" => {}
        _ => return Err(UrlValidationError::UnsupportedProtocol),
    }

    match url.host_str() {
        Some(host) if !host.is_empty() => Ok(url),
        _ => Err(UrlValidationError::MissingHost),
    }
}
