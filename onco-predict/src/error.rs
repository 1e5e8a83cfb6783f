//! Error types for onco-predict
//!
//! Every failure leaves the service as `{"status": "fail", "message": ...}`
//! with the status code carried by the error.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

use crate::pipeline::PredictionError;

pub const NOT_FOUND_MESSAGE: &str = "Prediction not found";

/// Kept as the historical wording even though the enforced limit is 1 MiB
pub const PAYLOAD_TOO_LARGE_MESSAGE: &str =
    "Payload content length greater than maximum allowed: 1000000";

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    /// Client-caused failure with its own 4xx status
    #[error("{message}")]
    Client { status: StatusCode, message: String },

    /// Unknown prediction id (404)
    #[error("Prediction not found")]
    NotFound,

    /// Request body over the transport limit (413)
    #[error("Payload content length greater than maximum allowed: 1000000")]
    PayloadTooLarge,

    /// Internal server error (500)
    #[error("{0}")]
    Internal(String),

    /// onco-common error (500)
    #[error(transparent)]
    Common(#[from] onco_common::Error),
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::Client {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Client { status, .. } => *status,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::Internal(_) | ApiError::Common(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<PredictionError> for ApiError {
    fn from(err: PredictionError) -> Self {
        match err {
            PredictionError::ImageTooLarge { .. } | PredictionError::PredictionFailed => {
                ApiError::bad_request(err.to_string())
            }
            PredictionError::Store(e) => ApiError::Common(e),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!("Request failed: {}", self);
        }

        let body = Json(json!({
            "status": "fail",
            "message": self.to_string(),
        }));

        (status, body).into_response()
    }
}

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;
