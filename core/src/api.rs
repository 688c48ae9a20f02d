//! `api_get` / `api_post`: one call per route, always answering with an
//! [`Envelope`].

use serde::Serialize;

use crate::client::StaffingClient;
use crate::envelope::Envelope;
use crate::error::ApiError;
use crate::http::{HttpRequest, Transport};

/// Pairs the request builder with a caller-supplied [`Transport`].
///
/// Logical failures come back as `Ok(Envelope::Error { .. })`; `Err` is
/// reserved for transport failures and bodies that are not envelopes.
#[derive(Debug, Clone)]
pub struct ApiClient<T> {
    client: StaffingClient,
    transport: T,
}

impl<T: Transport> ApiClient<T> {
    pub fn new(base_url: &str, transport: T) -> Self {
        Self {
            client: StaffingClient::new(base_url),
            transport,
        }
    }

    pub fn api_get(&self, route: &str) -> Result<Envelope, ApiError> {
        self.send(self.client.build_get(route))
    }

    pub fn api_post<D: Serialize + ?Sized>(
        &self,
        route: &str,
        data: &D,
    ) -> Result<Envelope, ApiError> {
        self.send(self.client.build_post(route, data)?)
    }

    fn send(&self, request: HttpRequest) -> Result<Envelope, ApiError> {
        let method = request.method.as_str();
        let path = request.path.clone();
        let response = self.transport.execute(request)?;
        tracing::debug!(method, %path, status = response.status, "api call");
        self.client.parse_envelope(response)
    }
}
