//! Handler for URL shortening endpoint.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::{HeaderMap, StatusCode},
};
use validator::Validate;

use crate::api::dto::short_url::{ShortUrlResponse, ShortenRequest};
use crate::error::AppError;
use crate::state::AppState;

/// Creates a short URL, or returns the active one already stored for the same URL.
///
/// # Endpoint
///
/// `POST /shorten`
///
/// # Request Body
///
/// ```json
/// { "url": "https://example.com", "expiry_days": 7 }
/// ```
///
/// # Response
///
/// `201 Created`
///
/// ```json
/// {
///   "code": "aZ3kQ9",
///   "original_url": "https://example.com",
///   "created_at": "2025-01-01T12:00:00Z",
///   "expires_at": "2025-01-08T12:00:00Z",
///   "clicks": 0,
///   "short_url": "http://localhost:8080/aZ3kQ9"
/// }
/// ```
///
/// # Errors
///
/// Returns 400 Bad Request if the body is malformed, `url` is missing, or the URL is invalid.
/// Returns 500 Internal Server Error if no unique code could be generated.
pub async fn shorten_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<ShortenRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ShortUrlResponse>), AppError> {
    let Json(payload) = payload?;
    payload.validate()?;

    let Some(url) = payload.url else {
        return Err(AppError::bad_request("url is required"));
    };

    let record = state
        .shortener_service
        .create_short_url(&url, payload.expiry_days)
        .await?;

    let base_url = state.resolve_base_url(&headers);

    Ok((
        StatusCode::CREATED,
        Json(ShortUrlResponse::from_record(record, base_url.as_deref())),
    ))
}
