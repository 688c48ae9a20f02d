//! Domain DTOs for the staffing API.
//!
//! # Design
//! These mirror the mock server's schema but are defined independently; the
//! contract suite catches drift between the two. Response types default
//! optional fields so a backend that omits them still parses. Input types
//! skip unset fields when serialized, which is what makes a POST-with-`id`
//! a partial update.
//!
//! Ids are opaque [`EntityId`]s: the server assigns them and a backend may
//! use integers or strings.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Server-assigned identity of any entity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EntityId {
    Int(i64),
    Str(String),
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityId::Int(id) => write!(f, "{id}"),
            EntityId::Str(id) => f.write_str(id),
        }
    }
}

impl From<i64> for EntityId {
    fn from(id: i64) -> Self {
        EntityId::Int(id)
    }
}

impl From<&str> for EntityId {
    fn from(id: &str) -> Self {
        EntityId::Str(id.to_string())
    }
}

impl From<String> for EntityId {
    fn from(id: String) -> Self {
        EntityId::Str(id)
    }
}

impl From<Uuid> for EntityId {
    fn from(id: Uuid) -> Self {
        EntityId::Str(id.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub id: EntityId,
    pub name: String,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub rate1: Option<f64>,
    #[serde(default)]
    pub rate2: Option<f64>,
}

/// Body of `POST /sessions`. Without `id` it creates; with `id` it updates
/// only the fields that are set.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<EntityId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rate1: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rate2: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailableTemplate {
    pub offer_template: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OfferTemplate {
    pub id: EntityId,
    pub position_type: String,
    pub offer_template: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OfferTemplateInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<EntityId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offer_template: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub id: EntityId,
    #[serde(default)]
    pub session_id: Option<EntityId>,
    pub position_code: String,
    #[serde(default)]
    pub position_title: Option<String>,
    #[serde(default)]
    pub est_hours_per_assignment: Option<f64>,
    #[serde(default)]
    pub est_start_date: Option<String>,
    #[serde(default)]
    pub est_end_date: Option<String>,
    #[serde(default)]
    pub position_type: Option<String>,
    #[serde(default)]
    pub instructors: Vec<Instructor>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PositionInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<EntityId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub est_hours_per_assignment: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub est_start_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub est_end_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position_type: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Instructor {
    pub id: EntityId,
    #[serde(default)]
    pub first_name: Option<String>,
    pub last_name: String,
    #[serde(default)]
    pub email: Option<String>,
    pub utorid: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InstructorInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<EntityId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub utorid: Option<String>,
}

/// Body of `POST /positions/{id}/add_instructor`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionInstructor {
    pub id: EntityId,
    pub position_id: EntityId,
}

/// Body of the delete routes. `id` is always serialized, so `None` sends
/// an explicit `null`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdRef {
    pub id: Option<EntityId>,
}

impl IdRef {
    pub fn new(id: impl Into<EntityId>) -> Self {
        Self {
            id: Some(id.into()),
        }
    }
}
