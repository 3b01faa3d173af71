use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::cascade::CascadeError;

/// Request-level failures. A negative verdict is never an error; these are
/// the "service could not answer" cases.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// Malformed request (missing required field, out-of-range threshold).
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// The pipeline broke. Distinct from a negative verdict so "service
    /// broke" is never confused with "answer was wrong".
    #[error("internal error: {0}")]
    Internal(#[from] CascadeError),
}

#[derive(serde::Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = match &self {
            GatewayError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            GatewayError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(ErrorResponse {
            error: self.to_string(),
            code: status.as_u16(),
        });

        (status, body).into_response()
    }
}
