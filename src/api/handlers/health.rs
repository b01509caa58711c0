//! Handler for health check endpoint.

use axum::{Json, extract::State, http::StatusCode};

use crate::api::dto::health::{
    ComponentCheck, ComponentStatus, HealthChecks, HealthResponse, ServiceStatus,
};
use crate::state::AppState;

/// Returns service health status with component checks.
///
/// # Endpoint
///
/// `GET /health`
///
/// # Response Codes
///
/// - **200 OK**: All components healthy
/// - **503 Service Unavailable**: The database did not answer
///
/// # Response
///
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0",
///   "checks": {
///     "database": { "status": "ok", "message": "Connected" }
///   }
/// }
/// ```
pub async fn health_handler(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, (StatusCode, Json<HealthResponse>)> {
    let db_check = check_database(&state).await;
    let healthy = db_check.status == ComponentStatus::Ok;

    let response = HealthResponse {
        status: if healthy {
            ServiceStatus::Healthy
        } else {
            ServiceStatus::Degraded
        },
        version: env!("CARGO_PKG_VERSION"),
        checks: HealthChecks { database: db_check },
    };

    if healthy {
        Ok(Json(response))
    } else {
        Err((StatusCode::SERVICE_UNAVAILABLE, Json(response)))
    }
}

async fn check_database(state: &AppState) -> ComponentCheck {
    match state.redirect_service.storage_healthy().await {
        Ok(()) => ComponentCheck::ok("Connected"),
        Err(e) => {
            tracing::warn!(error = %e, "Health check failed");
            ComponentCheck::error("Database unavailable")
        }
    }
}
