//! # Web API Error Types
//!
//! HTTP-facing error type for the dashboard API and its conversion from
//! library errors. Every error renders as `{"error":{"code","message"}}`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

use crate::error::DashboardError;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Resource not found")]
    NotFound,

    #[error("Invalid request: {message}")]
    BadRequest { message: String },

    #[error("Orchestrator request failed: {message}")]
    Upstream { message: String },

    #[error("Service temporarily unavailable")]
    ServiceUnavailable,

    #[error("Request timeout")]
    Timeout,

    #[error("Internal server error")]
    Internal,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest {
            message: message.into(),
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            ApiError::Upstream { .. } => StatusCode::BAD_GATEWAY,
            ApiError::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Timeout => StatusCode::GATEWAY_TIMEOUT,
            ApiError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            ApiError::NotFound => "NOT_FOUND",
            ApiError::BadRequest { .. } => "BAD_REQUEST",
            ApiError::Upstream { .. } => "ORCHESTRATOR_ERROR",
            ApiError::ServiceUnavailable => "SERVICE_UNAVAILABLE",
            ApiError::Timeout => "TIMEOUT",
            ApiError::Internal => "INTERNAL_ERROR",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let message = match &self {
            ApiError::BadRequest { message } | ApiError::Upstream { message } => message.clone(),
            other => other.to_string(),
        };

        let error_response = json!({
            "error": {
                "code": self.code(),
                "message": message
            }
        });

        (self.status_code(), Json(error_response)).into_response()
    }
}

impl From<DashboardError> for ApiError {
    fn from(err: DashboardError) -> Self {
        if err.is_not_found() {
            return ApiError::NotFound;
        }

        match err {
            DashboardError::InvalidInput(message) => ApiError::BadRequest { message },
            DashboardError::Http(e) if e.is_timeout() => ApiError::Timeout,
            DashboardError::Http(e) if e.is_connect() => ApiError::ServiceUnavailable,
            DashboardError::Api { status, message } => ApiError::Upstream {
                message: format!("orchestrator returned {status}: {message}"),
            },
            _ => ApiError::Internal,
        }
    }
}

/// Convert JSON errors to API errors
impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::bad_request(err.to_string())
    }
}

/// Result type alias for web API operations
pub type ApiResult<T> = Result<T, ApiError>;
