//! Success envelope shared by the handlers
//!
//! Payloads sit under `data`. A transfer also echoes the id it was logged
//! under as a top-level `request_id`, the same field error bodies carry, so a
//! receipt can be matched to the gateway's log lines.

use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub data: T,
    /// Id under which the request was logged, when the handler assigned one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn new(data: T) -> Self {
        Self { data, request_id: None }
    }

    /// Wrap a payload produced while handling the request logged as `request_id`
    pub fn tracked(data: T, request_id: impl Into<String>) -> Self {
        Self {
            data,
            request_id: Some(request_id.into()),
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}
