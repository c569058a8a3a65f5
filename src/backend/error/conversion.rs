/**
 * Error Conversion
 *
 * Backend errors are returned directly from handlers. They render with the
 * same envelope as successful responses, with the error text as `data`:
 *
 * ```json
 * {
 *   "message": "Not found",
 *   "data": "todo 4 not found"
 * }
 * ```
 */

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::backend::error::types::BackendError;
use crate::backend::response::ApiResponse;

impl IntoResponse for BackendError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!("Request failed: {}", self);
        } else {
            tracing::debug!("Request rejected ({}): {}", status.as_u16(), self);
        }

        ApiResponse::with_status(status, self.message()).into_response()
    }
}
