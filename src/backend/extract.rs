//! Request Extractors
//!
//! Drop-in replacements for `axum::Json` and `axum::extract::Path` whose
//! rejections are `BackendError::Validation`, so a malformed body or path
//! segment is answered with 400 in the `{message, data}` envelope instead
//! of axum's plain-text 422.
//!
//! ```rust,ignore
//! use crate::backend::extract::{Json, Path};
//!
//! async fn move_task(Path(path): Path<TaskPath>, Json(request): Json<MoveTaskRequest>) { }
//! ```

use axum::{
    extract::{FromRequest, FromRequestParts, Request},
    http::request::Parts,
};
use serde::de::DeserializeOwned;

use crate::backend::error::BackendError;

/// JSON body extractor rejecting with a validation error
#[derive(Debug, Clone, Copy, Default)]
pub struct Json<T>(pub T);

impl<T, S> FromRequest<S> for Json<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = BackendError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match axum::Json::<T>::from_request(req, state).await {
            Ok(axum::Json(value)) => Ok(Self(value)),
            Err(rejection) => {
                tracing::warn!("Rejected request body: {}", rejection.body_text());
                Err(BackendError::validation(rejection.body_text()))
            }
        }
    }
}

/// Path parameter extractor rejecting with a validation error
#[derive(Debug, Clone, Copy, Default)]
pub struct Path<T>(pub T);

impl<T, S> FromRequestParts<S> for Path<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = BackendError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match axum::extract::Path::<T>::from_request_parts(parts, state).await {
            Ok(axum::extract::Path(value)) => Ok(Self(value)),
            Err(rejection) => {
                tracing::warn!("Rejected path parameters: {}", rejection.body_text());
                Err(BackendError::validation(rejection.body_text()))
            }
        }
    }
}
