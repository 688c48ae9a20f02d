//! The `{status, payload?, message?}` wrapper every route answers with.

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;

use crate::error::ApiError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum Envelope {
    Success {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        payload: Option<Value>,
    },
    Error {
        #[serde(default)]
        message: String,
    },
}

impl Envelope {
    pub fn is_success(&self) -> bool {
        matches!(self, Envelope::Success { .. })
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Envelope::Error { .. })
    }

    pub fn payload(&self) -> Option<&Value> {
        match self {
            Envelope::Success { payload } => payload.as_ref(),
            Envelope::Error { .. } => None,
        }
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            Envelope::Error { message } => Some(message),
            Envelope::Success { .. } => None,
        }
    }

    /// Deserialize the payload of a success envelope. A missing payload is
    /// read as `null`, so `into_payload::<()>()` checks a payload-less
    /// success.
    pub fn into_payload<T: DeserializeOwned>(self) -> Result<T, ApiError> {
        match self {
            Envelope::Success { payload } => serde_json::from_value(payload.unwrap_or(Value::Null))
                .map_err(|e| ApiError::DeserializationError(e.to_string())),
            Envelope::Error { message } => Err(ApiError::Api { message }),
        }
    }
}
