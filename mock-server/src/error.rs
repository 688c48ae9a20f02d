//! Errors raised by the store and extractors, rendered as error envelopes.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::envelope::Envelope;

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    /// The route, or the entity an id refers to, does not exist.
    #[error("{0}")]
    NotFound(String),

    /// The body could not be read, or a required `id` was missing.
    #[error("{0}")]
    BadRequest(String),

    /// A field that must be unique collides with an existing record.
    #[error("{0}")]
    Conflict(String),

    /// A required field is missing or empty.
    #[error("{0}")]
    Validation(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.to_string();
        tracing::warn!(status = status.as_u16(), "rejected request: {message}");
        (status, Json(Envelope::<()>::error(message))).into_response()
    }
}
