//! In-memory stand-in for the course staffing API.
//!
//! Serves the same routes as the real backend and answers every request,
//! successful or not, with a `{status, payload?, message?}` envelope, so a
//! client test suite can run against it unchanged.

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tokio::{net::TcpListener, sync::RwLock};
use tower_http::trace::TraceLayer;

pub mod envelope;
pub mod error;
mod handlers;
pub mod store;
pub mod types;

pub use error::AppError;
pub use store::Store;
pub use types::{AvailableTemplate, Instructor, OfferTemplate, Position, Session};

pub type Db = Arc<RwLock<Store>>;

/// Template files offered by `/available_position_templates` unless
/// configured otherwise.
pub const DEFAULT_TEMPLATES: &[&str] = &["Regular.html", "OTO.html", "Invigilate.html"];

#[derive(Debug, Clone)]
pub struct MockConfig {
    pub available_templates: Vec<String>,
}

impl Default for MockConfig {
    fn default() -> Self {
        Self {
            available_templates: DEFAULT_TEMPLATES.iter().map(|t| t.to_string()).collect(),
        }
    }
}

pub fn app() -> Router {
    app_with_config(MockConfig::default())
}

pub fn app_with_config(config: MockConfig) -> Router {
    let db: Db = Arc::new(RwLock::new(Store::new(config.available_templates)));
    Router::new()
        .route(
            "/sessions",
            get(handlers::list_sessions).post(handlers::upsert_session),
        )
        .route("/sessions/delete", post(handlers::delete_session))
        .route(
            "/available_position_templates",
            get(handlers::available_templates),
        )
        .route(
            "/sessions/{id}/position_templates",
            get(handlers::position_templates),
        )
        .route(
            "/sessions/{id}/add_position_template",
            post(handlers::add_position_template),
        )
        .route(
            "/sessions/{id}/positions",
            get(handlers::session_positions).post(handlers::upsert_session_position),
        )
        .route(
            "/sessions/{id}/instructors",
            get(handlers::session_instructors).post(handlers::add_session_instructor),
        )
        .route(
            "/sessions/{id}/instructors/delete",
            post(handlers::remove_session_instructor),
        )
        .route("/positions", post(handlers::update_position))
        .route("/positions/delete", post(handlers::delete_position))
        .route(
            "/positions/{id}/add_instructor",
            post(handlers::add_position_instructor),
        )
        .route(
            "/positions/{id}/remove_instructor",
            post(handlers::remove_position_instructor),
        )
        .route(
            "/instructors",
            get(handlers::list_instructors).post(handlers::upsert_instructor),
        )
        .route("/instructors/delete", post(handlers::delete_instructor))
        .fallback(handlers::unknown_route)
        .method_not_allowed_fallback(handlers::unknown_route)
        .layer(TraceLayer::new_for_http())
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    run_with_config(listener, MockConfig::default()).await
}

pub async fn run_with_config(
    listener: TcpListener,
    config: MockConfig,
) -> Result<(), std::io::Error> {
    axum::serve(listener, app_with_config(config)).await
}
