//! Application error type for the HTTP layer.
//!
//! Handlers return `Result<_, AppError>`; the `IntoResponse` impl maps the
//! variants onto HTTP statuses (404 for missing trades, 400 for rejected
//! form input, 500 for the rest).

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use shared::StorageError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    /// Form input failed validation; the message lists every problem found.
    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl From<StorageError> for AppError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::NotFound => AppError::NotFound("trade not found".to_string()),
            StorageError::Backend(err) => AppError::Internal(err),
        }
    }
}

impl From<askama::Error> for AppError {
    fn from(err: askama::Error) -> Self {
        AppError::Internal(err.into())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Internal(err) => {
                tracing::error!(error = %err, "request failed");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        (status, self.to_string()).into_response()
    }
}
