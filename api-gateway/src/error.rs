//! Error handling for the API gateway

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Message shown to clients for any server-side failure
pub const UNEXPECTED_ERROR_MESSAGE: &str = "Unexpected error";

/// API error response
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error information
    pub error: ErrorInfo,
    /// Request ID for tracing
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
}

/// Detailed error information
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorInfo {
    /// Error code (string identifier for the error type)
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Optional additional error details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

/// API errors
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error(transparent)]
    Common(#[from] common::error::Error),
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!("Rejected request body: {}", rejection.body_text());
        ApiError::BadRequest("Malformed JSON request".to_string())
    }
}

impl ApiError {
    fn classify(&self) -> (StatusCode, &'static str) {
        use common::error::Error;

        match self {
            ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, "bad_request"),
            ApiError::Common(e) => match e {
                // Client errors (4xx)
                Error::DuplicateId(_) => (StatusCode::BAD_REQUEST, "duplicate_account_id"),
                Error::InsufficientBalance(_) => (StatusCode::BAD_REQUEST, "insufficient_balance"),
                Error::ValidationError(_) => (StatusCode::BAD_REQUEST, "validation_error"),
                Error::AccountNotFound(_) => (StatusCode::NOT_FOUND, "account_not_found"),

                // Server errors (5xx)
                Error::TransferFailed(_) => (StatusCode::INTERNAL_SERVER_ERROR, "transfer_failed"),
                Error::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error"),
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        // Generate a request ID for tracking errors
        let request_id = Uuid::new_v4().to_string();
        let (status, code) = self.classify();

        // Server errors hide their cause; the debug message only ships in debug builds.
        let (message, details) = if status.is_server_error() {
            tracing::error!("API Error [{}]: {:?}", request_id, &self);
            let details = cfg!(debug_assertions)
                .then(|| serde_json::json!({ "debug_message": self.to_string() }));
            (UNEXPECTED_ERROR_MESSAGE.to_string(), details)
        } else {
            tracing::warn!("API Error [{}]: {}", request_id, &self);
            (self.to_string(), None)
        };

        let error_response = ErrorResponse {
            error: ErrorInfo {
                code: code.to_string(),
                message,
                details,
            },
            request_id: Some(request_id),
        };

        // Return the response with appropriate status code
        (status, Json(error_response)).into_response()
    }
}
