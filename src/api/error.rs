//! API Error Types
//!
//! Defines error types for the API layer and implements conversion
//! to HTTP responses with appropriate status codes.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::export::ExportError;
use crate::gateway::GatewayError;

/// API error types
#[derive(Error, Debug)]
pub enum ApiError {
    /// Request validation failed
    #[error("Validation error: {0}")]
    Validation(String),

    /// Upstream records gateway failed
    #[error("Gateway error: {0}")]
    Gateway(#[from] GatewayError),

    /// CSV generation failed
    #[error("Export error: {0}")]
    Export(#[from] ExportError),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Error response body
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
    pub request_id: String,
}

/// Error details
#[derive(Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

impl ApiError {
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            ApiError::Validation(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            ApiError::Gateway(e) => match e {
                GatewayError::Unavailable => {
                    (StatusCode::SERVICE_UNAVAILABLE, "GATEWAY_UNAVAILABLE")
                }
                GatewayError::Timeout => (StatusCode::GATEWAY_TIMEOUT, "GATEWAY_TIMEOUT"),
                GatewayError::Records(_) => (StatusCode::BAD_GATEWAY, "INVALID_RECORDS"),
                GatewayError::Encode(_) => (StatusCode::INTERNAL_SERVER_ERROR, "ENCODE_ERROR"),
                GatewayError::Status { .. } | GatewayError::Request(_) => {
                    (StatusCode::BAD_GATEWAY, "GATEWAY_ERROR")
                }
            },
            ApiError::Export(_) => (StatusCode::INTERNAL_SERVER_ERROR, "EXPORT_ERROR"),
            ApiError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
            ApiError::Io(_) => (StatusCode::INTERNAL_SERVER_ERROR, "IO_ERROR"),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        let request_id = uuid::Uuid::new_v4().to_string();

        tracing::error!(
            request_id = %request_id,
            error_code = %code,
            error_message = %self,
            "API error occurred"
        );

        let body = ErrorResponse {
            error: ErrorBody {
                code: code.to_string(),
                message: self.to_string(),
            },
            request_id,
        };

        (status, Json(body)).into_response()
    }
}

/// Result type for API operations
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gateway_errors_map_to_upstream_statuses() {
        let cases = [
            (ApiError::Gateway(GatewayError::Unavailable), StatusCode::SERVICE_UNAVAILABLE),
            (ApiError::Gateway(GatewayError::Timeout), StatusCode::GATEWAY_TIMEOUT),
            (
                ApiError::Gateway(GatewayError::Status {
                    status: 500,
                    message: String::new(),
                }),
                StatusCode::BAD_GATEWAY,
            ),
            (ApiError::Validation("bad".into()), StatusCode::BAD_REQUEST),
        ];

        for (err, expected) in cases {
            assert_eq!(err.into_response().status(), expected);
        }
    }
}
