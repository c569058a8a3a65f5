//! Response Envelope
//!
//! Every endpoint answers with the same JSON shape:
//!
//! ```json
//! { "message": "Success", "data": { ... } }
//! ```
//!
//! `message` is the default text for the status code. `data` is the payload,
//! or an empty string when there is none. Errors reuse the envelope with the
//! error text as `data` (see `error::conversion`).

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::Value;

/// Default `message` text for a status code
pub fn default_message(status: StatusCode) -> &'static str {
    match status {
        StatusCode::OK => "Success",
        StatusCode::CREATED => "Created",
        StatusCode::BAD_REQUEST => "Bad request",
        StatusCode::UNAUTHORIZED => "Unauthorized",
        StatusCode::FORBIDDEN => "Forbidden",
        StatusCode::NOT_FOUND => "Not found",
        StatusCode::INTERNAL_SERVER_ERROR => "Internal server error",
        other => other.canonical_reason().unwrap_or("Unknown status"),
    }
}

/// Successful (or error) response wrapped in the `{message, data}` envelope
#[derive(Debug)]
pub struct ApiResponse<T> {
    status: StatusCode,
    data: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    /// 200 with a payload
    pub fn ok(data: T) -> Self {
        Self::with_status(StatusCode::OK, data)
    }

    /// 201 with a payload
    pub fn created(data: T) -> Self {
        Self::with_status(StatusCode::CREATED, data)
    }

    /// Any status with a payload
    pub fn with_status(status: StatusCode, data: T) -> Self {
        Self {
            status,
            data: Some(data),
        }
    }

    /// Status code this response will be sent with
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Payload, `None` for `done()`
    pub fn data(&self) -> Option<&T> {
        self.data.as_ref()
    }
}

impl ApiResponse<()> {
    /// 200 with `data: ""`
    pub fn done() -> Self {
        Self {
            status: StatusCode::OK,
            data: None,
        }
    }
}

#[derive(Serialize)]
struct Envelope {
    message: &'static str,
    data: Value,
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        let data = match self.data {
            None => Ok(Value::String(String::new())),
            Some(payload) => serde_json::to_value(payload),
        };

        match data {
            Ok(data) => {
                let envelope = Envelope {
                    message: default_message(self.status),
                    data,
                };
                (self.status, Json(envelope)).into_response()
            }
            Err(e) => {
                tracing::error!("Failed to serialize response payload: {}", e);
                let envelope = Envelope {
                    message: default_message(StatusCode::INTERNAL_SERVER_ERROR),
                    data: Value::String("internal error".to_string()),
                };
                (StatusCode::INTERNAL_SERVER_ERROR, Json(envelope)).into_response()
            }
        }
    }
}
