//! Entities served by the mock API and the request bodies it accepts.
//!
//! Input types make every field optional: a missing `id` means "create", a
//! present `id` means "update", and absent fields are left untouched on
//! update. Unknown fields are ignored so clients may post whole entities
//! back (e.g. a full `Position` to `/positions/delete`).

use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub id: Uuid,
    pub name: String,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub rate1: Option<f64>,
    pub rate2: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SessionInput {
    #[serde(default)]
    pub id: Option<Uuid>,
    pub name: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub rate1: Option<f64>,
    pub rate2: Option<f64>,
}

/// A template file from the library every session can pick from.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailableTemplate {
    pub offer_template: String,
}

/// The offer template a session uses for one position type.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OfferTemplate {
    pub id: Uuid,
    pub position_type: String,
    pub offer_template: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct OfferTemplateInput {
    #[serde(default)]
    pub id: Option<Uuid>,
    pub position_type: Option<String>,
    pub offer_template: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub id: Uuid,
    pub session_id: Uuid,
    pub position_code: String,
    pub position_title: Option<String>,
    pub est_hours_per_assignment: Option<f64>,
    pub est_start_date: Option<String>,
    pub est_end_date: Option<String>,
    pub position_type: Option<String>,
    pub instructors: Vec<Instructor>,
}

#[derive(Debug, Default, Deserialize)]
pub struct PositionInput {
    #[serde(default)]
    pub id: Option<Uuid>,
    pub position_code: Option<String>,
    pub position_title: Option<String>,
    pub est_hours_per_assignment: Option<f64>,
    pub est_start_date: Option<String>,
    pub est_end_date: Option<String>,
    pub position_type: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Instructor {
    pub id: Uuid,
    pub first_name: Option<String>,
    pub last_name: String,
    pub email: Option<String>,
    pub utorid: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct InstructorInput {
    #[serde(default)]
    pub id: Option<Uuid>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub utorid: Option<String>,
}

/// Body of `/positions/{id}/add_instructor`: the instructor `id` plus an
/// optional echo of the position it is being attached to.
#[derive(Debug, Default, Deserialize)]
pub struct PositionInstructorInput {
    #[serde(default)]
    pub id: Option<Uuid>,
    #[serde(default)]
    pub position_id: Option<Uuid>,
}

/// Any body whose only meaningful field is the target `id`.
#[derive(Debug, Default, Deserialize)]
pub struct IdInput {
    #[serde(default)]
    pub id: Option<Uuid>,
}
