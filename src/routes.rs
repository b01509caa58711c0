//! Top-level router configuration.
//!
//! # Route Structure
//!
//! See [`crate::api::routes::routes`].
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Rate limiting** - Per-IP token bucket (configurable for proxy deployments)
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::middleware::{rate_limit, tracing};
use crate::config::RateLimit;
use crate::state::AppState;
use anyhow::Result;
use axum::Router;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Constructs the application router with all routes and middleware.
///
/// # Arguments
///
/// - `state` - shared application state injected into all handlers
/// - `limit` - per-client request quota
/// - `behind_proxy` - when `true`, rate limiting reads client IP from
///   `X-Forwarded-For` / `X-Real-IP` headers instead of the peer socket address;
///   enable only when the service runs behind a trusted reverse proxy
///
/// The peer-address limiter needs `ConnectInfo<SocketAddr>`, so the router must
/// be served with `into_make_service_with_connect_info`.
///
/// # Errors
///
/// Returns an error if the rate limit is invalid.
pub fn app_router(state: AppState, limit: &RateLimit, behind_proxy: bool) -> Result<Router> {
    let router = api::routes::routes();

    let router = if behind_proxy {
        router.layer(rate_limit::proxied_layer(limit)?)
    } else {
        router.layer(rate_limit::layer(limit)?)
    };

    Ok(router.with_state(state).layer(tracing::layer()))
}

/// Wraps [`app_router`] so that `/{code}/` is routed like `/{code}`.
///
/// # Errors
///
/// Returns an error if the rate limit is invalid.
pub fn app_service(
    state: AppState,
    limit: &RateLimit,
    behind_proxy: bool,
) -> Result<NormalizePath<Router>> {
    let router = app_router(state, limit, behind_proxy)?;
    Ok(NormalizePathLayer::trim_trailing_slash().layer(router))
}
