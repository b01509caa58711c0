//! HTTP-facing error type.
//!
//! Every error response has the body `{"error": "<message>"}`. Internal
//! failures are logged here and answered with a fixed message.

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

use crate::domain::errors::ShortenerError;

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

#[derive(Debug)]
pub enum AppError {
    Validation { message: String },
    NotFound { message: String },
    Internal { message: String },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn not_found() -> Self {
        Self::NotFound {
            message: "not found".to_string(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// HTTP status this error is answered with.
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation { .. } => StatusCode::BAD_REQUEST,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message placed in the response body.
    pub fn message(&self) -> &str {
        match self {
            AppError::Validation { message }
            | AppError::NotFound { message }
            | AppError::Internal { message } => message,
        }
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

impl From<ShortenerError> for AppError {
    fn from(e: ShortenerError) -> Self {
        match e {
            ShortenerError::InvalidUrl(reason) => {
                tracing::debug!(%reason, "Rejected url");
                AppError::bad_request("invalid url")
            }
            ShortenerError::InvalidExpiry(days) => {
                AppError::bad_request(format!("expiry_days out of range: {days}"))
            }
            ShortenerError::Generation { attempts } => {
                tracing::error!(attempts, "Short code generation exhausted");
                AppError::internal("unable to generate short code")
            }
            ShortenerError::NotFound => AppError::not_found(),
            ShortenerError::Storage(err) => {
                tracing::error!(error = %err, "Storage failure");
                AppError::internal("internal error")
            }
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(e: validator::ValidationErrors) -> Self {
        let message = e
            .field_errors()
            .values()
            .flat_map(|errors| errors.iter())
            .find_map(|error| error.message.as_ref().map(|m| m.to_string()))
            .unwrap_or_else(|| "invalid request".to_string());

        AppError::bad_request(message)
    }
}

impl From<JsonRejection> for AppError {
    fn from(e: JsonRejection) -> Self {
        tracing::debug!(error = %e.body_text(), "Rejected request body");
        AppError::bad_request("invalid request body")
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorBody {
            error: self.message().to_string(),
        };

        (status, Json(body)).into_response()
    }
}
