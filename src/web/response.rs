//! JSON response envelopes
//!
//! Success: `{"status": 200, "data": ...}`
//! Failure: `{"status": <code>, "error": "<message>"}`
//! The HTTP status always matches the `status` field.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::core::error::Error;

/// Success envelope
#[derive(Debug, Serialize, Deserialize)]
pub struct DataEnvelope<T> {
    pub status: u16,
    pub data: T,
}

/// Error envelope
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    pub status: u16,
    pub error: String,
}

/// Wrap `data` in a 200 envelope
pub fn generate_response<T: Serialize>(data: T) -> Response {
    let body = DataEnvelope {
        status: StatusCode::OK.as_u16(),
        data,
    };
    (StatusCode::OK, Json(body)).into_response()
}

/// Wrap `message` in an error envelope with the given status
pub fn generate_error_response(status: StatusCode, message: impl Into<String>) -> Response {
    let body = ErrorEnvelope {
        status: status.as_u16(),
        error: message.into(),
    };
    (status, Json(body)).into_response()
}

/// HTTP status for an error
pub fn status_for(err: &Error) -> StatusCode {
    match err {
        Error::InvalidRequest { .. } => StatusCode::BAD_REQUEST,
        Error::UpstreamTimeout { .. } => StatusCode::GATEWAY_TIMEOUT,
        Error::UpstreamError { .. } | Error::UpstreamFormat { .. } => StatusCode::BAD_GATEWAY,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        generate_error_response(status_for(&self), self.reason())
    }
}
