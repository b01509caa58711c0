//! Handler for short URL metadata.

use axum::{
    Json,
    extract::{Path, State},
    http::HeaderMap,
};

use crate::api::dto::short_url::ShortUrlResponse;
use crate::error::AppError;
use crate::state::AppState;

/// Returns the stored record for a code.
///
/// # Endpoint
///
/// `GET /api/info/{code}`
///
/// Expired records are still reported here, with their `expires_at`. Reading
/// metadata does not count as a click.
///
/// # Errors
///
/// Returns 404 Not Found if the code was never issued.
pub async fn info_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<ShortUrlResponse>, AppError> {
    let record = state
        .redirect_service
        .get_by_code(&code)
        .await?
        .ok_or_else(AppError::not_found)?;

    let base_url = state.resolve_base_url(&headers);

    Ok(Json(ShortUrlResponse::from_record(
        record,
        base_url.as_deref(),
    )))
}
