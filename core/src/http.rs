//! HTTP transport types for the host-does-IO pattern.
//!
//! # Design
//! Requests and responses are plain owned data. `StaffingClient` builds
//! `HttpRequest` values and parses `HttpResponse` values; a [`Transport`]
//! supplied by the caller performs the actual network round-trip.

use crate::error::ApiError;

/// The API only distinguishes reads from writes: every mutation, including
/// deletion, is a POST.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

impl HttpMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
        }
    }
}

/// An HTTP request described as plain data.
///
/// Built by [`StaffingClient::build_get`](crate::StaffingClient::build_get) or
/// [`StaffingClient::build_post`](crate::StaffingClient::build_post). The
/// caller is responsible for executing it, usually through a [`Transport`].
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: HttpMethod,
    /// Absolute URL: base URL joined with the route.
    pub path: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

/// An HTTP response described as plain data.
///
/// Constructed by the caller after executing an [`HttpRequest`], then passed
/// to [`StaffingClient::parse_envelope`](crate::StaffingClient::parse_envelope).
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Executes a request against a live server.
///
/// Implementations must hand back non-2xx responses as `Ok` data; the
/// envelope in the body, not the status line, decides success. `Err` is for
/// failures where no response was received at all.
pub trait Transport {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        (**self).execute(request)
    }
}
