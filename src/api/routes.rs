//! API route configuration.

use crate::api::handlers::{health_handler, info_handler, redirect_handler, shorten_handler};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// All public routes, without middleware.
///
/// # Endpoints
///
/// - `POST /shorten`         - Create a short URL
/// - `GET  /api/info/{code}` - Metadata for a code
/// - `GET  /health`          - Health check
/// - `GET  /{code}`          - Redirect to the original URL
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/shorten", post(shorten_handler))
        .route("/api/info/{code}", get(info_handler))
        .route("/health", get(health_handler))
        .route("/{code}", get(redirect_handler))
}
