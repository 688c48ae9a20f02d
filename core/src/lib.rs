//! Synchronous client core for the course staffing API.
//!
//! # Overview
//! Builds `HttpRequest` values and parses every `HttpResponse` into an
//! [`Envelope`] without touching the network (host-does-IO pattern). A
//! caller-supplied [`Transport`] executes the round-trip; [`ApiClient`]
//! wires the two together as `api_get` / `api_post`.
//!
//! # Design
//! - Every route answers with `{status, payload?, message?}`. Logical
//!   errors stay inside the envelope; `ApiError` is for transport and
//!   malformed responses, or for an error envelope the caller asked to
//!   unwrap into a typed payload.
//! - Updates are POSTs carrying an `id` to the create route, so there is
//!   one builder per HTTP method rather than one per operation.
//! - [`shape::check_prop_types`] asserts payload structure for test suites.

pub mod api;
pub mod client;
pub mod envelope;
pub mod error;
pub mod http;
pub mod routes;
pub mod shape;
pub mod types;

pub use api::ApiClient;
pub use client::StaffingClient;
pub use envelope::Envelope;
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse, Transport};
pub use shape::{check_prop_types, Shape, ShapeError};
pub use types::{
    AvailableTemplate, EntityId, IdRef, Instructor, InstructorInput, OfferTemplate,
    OfferTemplateInput, Position, PositionInput, PositionInstructor, Session, SessionInput,
};
