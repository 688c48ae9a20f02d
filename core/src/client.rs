//! Stateless request builder and envelope parser for the staffing API.
//!
//! # Design
//! `StaffingClient` holds only a `base_url`. Every route is reached through
//! one of two builders, `build_get` and `build_post`, because the API
//! expresses create, update, delete and relation changes all as POSTs to
//! named routes. Every response goes through `parse_envelope`, which reads
//! the body regardless of the HTTP status: error envelopes are data, not
//! failures.

use serde::Serialize;

use crate::envelope::Envelope;
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};

#[derive(Debug, Clone)]
pub struct StaffingClient {
    base_url: String,
}

impl StaffingClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn build_get(&self, route: &str) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            path: self.url(route),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn build_post<T: Serialize + ?Sized>(
        &self,
        route: &str,
        data: &T,
    ) -> Result<HttpRequest, ApiError> {
        let body =
            serde_json::to_string(data).map_err(|e| ApiError::SerializationError(e.to_string()))?;
        Ok(HttpRequest {
            method: HttpMethod::Post,
            path: self.url(route),
            headers: vec![("content-type".to_string(), "application/json".to_string())],
            body: Some(body),
        })
    }

    /// Read the envelope out of any response. A body that is not an
    /// envelope is `HttpError` for non-2xx statuses and
    /// `DeserializationError` otherwise.
    pub fn parse_envelope(&self, response: HttpResponse) -> Result<Envelope, ApiError> {
        match serde_json::from_str::<Envelope>(&response.body) {
            Ok(envelope) => Ok(envelope),
            Err(e) if response.is_success() => Err(ApiError::DeserializationError(e.to_string())),
            Err(_) => Err(ApiError::HttpError {
                status: response.status,
                body: response.body,
            }),
        }
    }

    fn url(&self, route: &str) -> String {
        if route.starts_with('/') {
            format!("{}{route}", self.base_url)
        } else {
            format!("{}/{route}", self.base_url)
        }
    }
}
