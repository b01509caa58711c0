//! DTOs for the health endpoint.

use serde::Serialize;

/// Overall service state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceStatus {
    Healthy,
    Degraded,
}

/// State of a single dependency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ComponentStatus {
    Ok,
    Error,
}

/// Body of `GET /health`.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: ServiceStatus,
    pub version: &'static str,
    pub checks: HealthChecks,
}

#[derive(Debug, Serialize)]
pub struct HealthChecks {
    pub database: ComponentCheck,
}

#[derive(Debug, Serialize)]
pub struct ComponentCheck {
    pub status: ComponentStatus,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<&'static str>,
}

impl ComponentCheck {
    pub fn ok(message: &'static str) -> Self {
        Self {
            status: ComponentStatus::Ok,
            message: Some(message),
        }
    }

    pub fn error(message: &'static str) -> Self {
        Self {
            status: ComponentStatus::Error,
            message: Some(message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_health_response_shape() {
        let response = HealthResponse {
            status: ServiceStatus::Degraded,
            version: "0.1.0",
            checks: HealthChecks {
                database: ComponentCheck::error("Database unavailable"),
            },
        };

        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({
                "status": "degraded",
                "version": "0.1.0",
                "checks": {
                    "database": { "status": "error", "message": "Database unavailable" }
                }
            })
        );
    }
}
