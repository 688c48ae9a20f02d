//! The `{status, payload?, message?}` wrapper and the extractors that turn
//! framework rejections into error envelopes.

use axum::{
    extract::{FromRequest, FromRequestParts, Path, Request},
    http::request::Parts,
    Json,
};
use serde::{de::DeserializeOwned, Serialize};
use uuid::Uuid;

use crate::error::AppError;

#[derive(Debug, Serialize)]
pub struct Envelope<T> {
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payload: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> Envelope<T> {
    pub fn error(message: String) -> Self {
        Self {
            status: "error",
            payload: None,
            message: Some(message),
        }
    }
}

/// Wrap a handler result in a success envelope.
pub fn success<T>(payload: T) -> Json<Envelope<T>> {
    Json(Envelope {
        status: "success",
        payload: Some(payload),
        message: None,
    })
}

/// Success envelope without a payload, used by the delete routes.
pub fn done() -> Json<Envelope<()>> {
    Json(Envelope {
        status: "success",
        payload: None,
        message: None,
    })
}

/// JSON body extractor whose rejection is an error envelope.
pub struct Payload<T>(pub T);

impl<S, T> FromRequest<S> for Payload<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;
        Ok(Payload(value))
    }
}

/// `{id}` path segment. A segment that is not a UUID cannot name any
/// entity, so it is reported as not found.
pub struct PathId(pub Uuid);

impl<S> FromRequestParts<S> for PathId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;
        Uuid::parse_str(&raw)
            .map(PathId)
            .map_err(|_| AppError::NotFound(format!("no record with id {raw}")))
    }
}
