//! Error types for the staffing API client.
//!
//! # Design
//! A logical API failure (validation, duplicate, unknown id, unknown route)
//! arrives as an error envelope and is *not* an `ApiError` while it stays an
//! [`Envelope`](crate::Envelope). It only becomes [`ApiError::Api`] once a
//! caller asks for a typed payload with `Envelope::into_payload`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// The server answered with an error envelope.
    #[error("API error: {message}")]
    Api { message: String },

    /// The server returned a non-2xx status whose body is not an envelope.
    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    DeserializationError(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    SerializationError(String),

    /// No response was received.
    #[error("transport failed: {0}")]
    Transport(String),
}
