//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use url::Url;

use crate::error::AppError;
use crate::state::AppState;

/// Redirects a short code to its original URL and counts the click.
///
/// # Endpoint
///
/// `GET /{code}`
///
/// # Response
///
/// `302 Found` with the stored URL in `Location`.
///
/// # Errors
///
/// Returns 404 Not Found with `{"error": "not found"}` if the code is unknown or
/// expired; both cases get the same response.
pub async fn redirect_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<Response, AppError> {
    let resolution = state.redirect_service.resolve(&code).await?;

    // Only a redirect that can actually be sent counts as a click.
    let location = location_header(&resolution.original_url)?;
    state.redirect_service.record_click(&resolution).await;

    Ok((StatusCode::FOUND, [(header::LOCATION, location)]).into_response())
}

/// Builds the `Location` value, preferring the stored string verbatim.
///
/// Non-ASCII URLs fall back to their percent-encoded, punycode serialization.
fn location_header(original_url: &str) -> Result<HeaderValue, AppError> {
    if original_url.is_ascii()
        && let Ok(value) = HeaderValue::from_str(original_url)
    {
        return Ok(value);
    }

    Url::parse(original_url)
        .ok()
        .and_then(|url| HeaderValue::from_str(url.as_str()).ok())
        .ok_or_else(|| {
            tracing::error!(original_url, "Stored url is not a valid Location header");
            AppError::internal("internal error")
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_header_verbatim() {
        let value = location_header("https://example.org").unwrap();
        assert_eq!(value, "https://example.org");
    }

    #[test]
    fn test_location_header_encodes_non_ascii() {
        let value = location_header("https://münchen.de/straße").unwrap();
        assert_eq!(value, "https://xn--mnchen-3ya.de/stra%C3%9Fe");
    }
}
