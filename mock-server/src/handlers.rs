//! Axum handlers for every staffing route.
//!
//! Each handler takes the store lock, runs one [`Store`](crate::store::Store)
//! operation and wraps the result in an envelope. Rejections and store
//! failures surface as [`AppError`](crate::error::AppError), which renders an
//! error envelope.

use axum::{
    extract::State,
    http::{Method, Uri},
    Json,
};

use crate::envelope::{done, success, Envelope, PathId, Payload};
use crate::error::{AppError, Result};
use crate::types::{
    AvailableTemplate, IdInput, Instructor, InstructorInput, OfferTemplate, OfferTemplateInput,
    Position, PositionInput, PositionInstructorInput, Session, SessionInput,
};
use crate::Db;

type Reply<T> = Result<Json<Envelope<T>>>;

// --- sessions ---

pub async fn list_sessions(State(db): State<Db>) -> Json<Envelope<Vec<Session>>> {
    let sessions = db.read().await.sessions();
    tracing::debug!(count = sessions.len(), "listing sessions");
    success(sessions)
}

pub async fn upsert_session(
    State(db): State<Db>,
    Payload(input): Payload<SessionInput>,
) -> Reply<Session> {
    let session = db.write().await.upsert_session(input)?;
    tracing::info!(id = %session.id, name = %session.name, "saved session");
    Ok(success(session))
}

pub async fn delete_session(
    State(db): State<Db>,
    Payload(input): Payload<IdInput>,
) -> Reply<()> {
    let session = db.write().await.delete_session(input)?;
    tracing::info!(id = %session.id, "deleted session");
    Ok(done())
}

// --- offer templates ---

pub async fn available_templates(
    State(db): State<Db>,
) -> Json<Envelope<Vec<AvailableTemplate>>> {
    success(db.read().await.available_templates())
}

pub async fn position_templates(
    State(db): State<Db>,
    PathId(session_id): PathId,
) -> Reply<Vec<OfferTemplate>> {
    Ok(success(db.read().await.position_templates(session_id)?))
}

pub async fn add_position_template(
    State(db): State<Db>,
    PathId(session_id): PathId,
    Payload(input): Payload<OfferTemplateInput>,
) -> Reply<Vec<OfferTemplate>> {
    let templates = db
        .write()
        .await
        .upsert_position_template(session_id, input)?;
    tracing::info!(session = %session_id, count = templates.len(), "saved position template");
    Ok(success(templates))
}

// --- positions ---

pub async fn session_positions(
    State(db): State<Db>,
    PathId(session_id): PathId,
) -> Reply<Vec<Position>> {
    Ok(success(db.read().await.positions(session_id)?))
}

pub async fn upsert_session_position(
    State(db): State<Db>,
    PathId(session_id): PathId,
    Payload(input): Payload<PositionInput>,
) -> Reply<Position> {
    let position = db
        .write()
        .await
        .upsert_session_position(session_id, input)?;
    tracing::info!(id = %position.id, code = %position.position_code, "saved position");
    Ok(success(position))
}

pub async fn update_position(
    State(db): State<Db>,
    Payload(input): Payload<PositionInput>,
) -> Reply<Position> {
    let position = db.write().await.update_position(input)?;
    tracing::info!(id = %position.id, code = %position.position_code, "updated position");
    Ok(success(position))
}

pub async fn delete_position(
    State(db): State<Db>,
    Payload(input): Payload<IdInput>,
) -> Reply<()> {
    let position = db.write().await.delete_position(input)?;
    tracing::info!(id = %position.id, "deleted position");
    Ok(done())
}

pub async fn add_position_instructor(
    State(db): State<Db>,
    PathId(position_id): PathId,
    Payload(input): Payload<PositionInstructorInput>,
) -> Reply<Instructor> {
    let instructor = db
        .write()
        .await
        .add_position_instructor(position_id, input)?;
    tracing::info!(position = %position_id, instructor = %instructor.id, "attached instructor");
    Ok(success(instructor))
}

pub async fn remove_position_instructor(
    State(db): State<Db>,
    PathId(position_id): PathId,
    Payload(input): Payload<IdInput>,
) -> Reply<Instructor> {
    let instructor = db
        .write()
        .await
        .remove_position_instructor(position_id, input)?;
    tracing::info!(position = %position_id, instructor = %instructor.id, "detached instructor");
    Ok(success(instructor))
}

// --- instructors ---

pub async fn list_instructors(State(db): State<Db>) -> Json<Envelope<Vec<Instructor>>> {
    success(db.read().await.instructors())
}

pub async fn session_instructors(
    State(db): State<Db>,
    PathId(session_id): PathId,
) -> Reply<Vec<Instructor>> {
    Ok(success(db.read().await.session_instructors(session_id)?))
}

pub async fn add_session_instructor(
    State(db): State<Db>,
    PathId(session_id): PathId,
    Payload(input): Payload<InstructorInput>,
) -> Reply<Instructor> {
    let instructor = db
        .write()
        .await
        .add_session_instructor(session_id, input)?;
    tracing::info!(session = %session_id, instructor = %instructor.id, "associated instructor");
    Ok(success(instructor))
}

pub async fn remove_session_instructor(
    State(db): State<Db>,
    PathId(session_id): PathId,
    Payload(input): Payload<InstructorInput>,
) -> Reply<()> {
    let instructor = db
        .write()
        .await
        .remove_session_instructor(session_id, input)?;
    tracing::info!(session = %session_id, instructor = %instructor.id, "dissociated instructor");
    Ok(done())
}

pub async fn upsert_instructor(
    State(db): State<Db>,
    Payload(input): Payload<InstructorInput>,
) -> Reply<Instructor> {
    let instructor = db.write().await.upsert_instructor(input)?;
    tracing::info!(id = %instructor.id, utorid = %instructor.utorid, "saved instructor");
    Ok(success(instructor))
}

pub async fn delete_instructor(
    State(db): State<Db>,
    Payload(input): Payload<InstructorInput>,
) -> Reply<()> {
    let instructor = db.write().await.delete_instructor(input)?;
    tracing::info!(id = %instructor.id, "deleted instructor");
    Ok(done())
}

pub async fn unknown_route(method: Method, uri: Uri) -> AppError {
    AppError::NotFound(format!("unknown route {method} {}", uri.path()))
}
