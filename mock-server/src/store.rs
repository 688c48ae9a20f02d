//! In-memory records behind the mock API.
//!
//! # Design
//! Every collection is a `Vec` so listings come back in creation order.
//! Lookups are linear scans; the mock only ever holds what a test creates.
//! Relations are kept as ids (`instructor_ids` on a position, the
//! `session_instructors` link list) and joined when a `Position` is rendered.
//!
//! All operations return `Result<_, AppError>` so handlers forward failures
//! straight into an error envelope.

use uuid::Uuid;

use crate::error::{AppError, Result};
use crate::types::{
    AvailableTemplate, IdInput, Instructor, InstructorInput, OfferTemplate, OfferTemplateInput,
    Position, PositionInput, PositionInstructorInput, Session, SessionInput,
};

#[derive(Debug, Clone)]
struct TemplateRecord {
    session_id: Uuid,
    template: OfferTemplate,
}

#[derive(Debug, Clone)]
struct PositionRecord {
    id: Uuid,
    session_id: Uuid,
    position_code: String,
    position_title: Option<String>,
    est_hours_per_assignment: Option<f64>,
    est_start_date: Option<String>,
    est_end_date: Option<String>,
    position_type: Option<String>,
    instructor_ids: Vec<Uuid>,
}

#[derive(Debug, Default)]
pub struct Store {
    sessions: Vec<Session>,
    templates: Vec<TemplateRecord>,
    positions: Vec<PositionRecord>,
    instructors: Vec<Instructor>,
    /// (session id, instructor id)
    session_instructors: Vec<(Uuid, Uuid)>,
    available_templates: Vec<String>,
}

fn require_id(id: Option<Uuid>) -> Result<Uuid> {
    id.ok_or_else(|| AppError::BadRequest("a valid id is required".to_string()))
}

/// Trimmed value of a field that must be present and non-empty.
fn required(field: &str, value: Option<String>) -> Result<String> {
    match value.as_deref().map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v.to_string()),
        _ => Err(AppError::Validation(format!("{field} cannot be empty"))),
    }
}

/// Like [`required`], but only when the field was submitted.
fn non_empty_if_present(field: &str, value: Option<String>) -> Result<Option<String>> {
    value.map(|v| required(field, Some(v))).transpose()
}

fn not_found(kind: &str, id: Uuid) -> AppError {
    AppError::NotFound(format!("no {kind} with id {id}"))
}

impl Store {
    pub fn new(available_templates: Vec<String>) -> Self {
        Self {
            available_templates,
            ..Self::default()
        }
    }

    // --- sessions ---

    pub fn sessions(&self) -> Vec<Session> {
        self.sessions.clone()
    }

    pub fn upsert_session(&mut self, input: SessionInput) -> Result<Session> {
        match input.id {
            Some(id) => self.update_session(id, input),
            None => self.create_session(input),
        }
    }

    fn create_session(&mut self, input: SessionInput) -> Result<Session> {
        let name = required("name", input.name)?;
        self.ensure_unique_session_name(&name, None)?;
        let session = Session {
            id: Uuid::new_v4(),
            name,
            start_date: input.start_date,
            end_date: input.end_date,
            rate1: input.rate1,
            rate2: input.rate2,
        };
        self.sessions.push(session.clone());
        Ok(session)
    }

    fn update_session(&mut self, id: Uuid, input: SessionInput) -> Result<Session> {
        let index = self.session_index(id)?;
        let name = non_empty_if_present("name", input.name)?;
        if let Some(name) = &name {
            self.ensure_unique_session_name(name, Some(id))?;
        }

        let session = &mut self.sessions[index];
        if let Some(name) = name {
            session.name = name;
        }
        if input.start_date.is_some() {
            session.start_date = input.start_date;
        }
        if input.end_date.is_some() {
            session.end_date = input.end_date;
        }
        if input.rate1.is_some() {
            session.rate1 = input.rate1;
        }
        if input.rate2.is_some() {
            session.rate2 = input.rate2;
        }
        Ok(session.clone())
    }

    /// Remove a session together with its templates, positions and
    /// instructor links.
    pub fn delete_session(&mut self, input: IdInput) -> Result<Session> {
        let id = require_id(input.id)?;
        let index = self.session_index(id)?;
        let session = self.sessions.remove(index);
        self.templates.retain(|t| t.session_id != id);
        self.positions.retain(|p| p.session_id != id);
        self.session_instructors.retain(|(session_id, _)| *session_id != id);
        Ok(session)
    }

    fn session_index(&self, id: Uuid) -> Result<usize> {
        self.sessions
            .iter()
            .position(|s| s.id == id)
            .ok_or_else(|| not_found("session", id))
    }

    fn ensure_unique_session_name(&self, name: &str, except: Option<Uuid>) -> Result<()> {
        let taken = self
            .sessions
            .iter()
            .any(|s| s.name == name && Some(s.id) != except);
        if taken {
            return Err(AppError::Conflict(format!("a session named {name:?} already exists")));
        }
        Ok(())
    }

    // --- offer templates ---

    pub fn available_templates(&self) -> Vec<AvailableTemplate> {
        self.available_templates
            .iter()
            .map(|name| AvailableTemplate {
                offer_template: name.clone(),
            })
            .collect()
    }

    pub fn position_templates(&self, session_id: Uuid) -> Result<Vec<OfferTemplate>> {
        self.session_index(session_id)?;
        Ok(self
            .templates
            .iter()
            .filter(|t| t.session_id == session_id)
            .map(|t| t.template.clone())
            .collect())
    }

    /// Create or update a session's template. Without an `id`, a template
    /// whose `position_type` already exists in the session is updated in
    /// place rather than duplicated.
    pub fn upsert_position_template(
        &mut self,
        session_id: Uuid,
        input: OfferTemplateInput,
    ) -> Result<Vec<OfferTemplate>> {
        self.session_index(session_id)?;
        match input.id {
            Some(id) => {
                let position_type = non_empty_if_present("position_type", input.position_type)?;
                let offer_template =
                    non_empty_if_present("offer_template", input.offer_template)?;
                if let Some(position_type) = &position_type {
                    let clash = self.templates.iter().any(|t| {
                        t.session_id == session_id
                            && t.template.position_type == *position_type
                            && t.template.id != id
                    });
                    if clash {
                        return Err(AppError::Conflict(format!(
                            "position type {position_type:?} already has a template"
                        )));
                    }
                }
                let record = self
                    .templates
                    .iter_mut()
                    .find(|t| t.session_id == session_id && t.template.id == id)
                    .ok_or_else(|| not_found("position template", id))?;
                if let Some(position_type) = position_type {
                    record.template.position_type = position_type;
                }
                if let Some(offer_template) = offer_template {
                    record.template.offer_template = offer_template;
                }
            }
            None => {
                let position_type = required("position_type", input.position_type)?;
                let offer_template = required("offer_template", input.offer_template)?;
                let existing = self.templates.iter_mut().find(|t| {
                    t.session_id == session_id && t.template.position_type == position_type
                });
                match existing {
                    Some(record) => record.template.offer_template = offer_template,
                    None => self.templates.push(TemplateRecord {
                        session_id,
                        template: OfferTemplate {
                            id: Uuid::new_v4(),
                            position_type,
                            offer_template,
                        },
                    }),
                }
            }
        }
        self.position_templates(session_id)
    }

    // --- positions ---

    pub fn positions(&self, session_id: Uuid) -> Result<Vec<Position>> {
        self.session_index(session_id)?;
        Ok(self
            .positions
            .iter()
            .filter(|p| p.session_id == session_id)
            .map(|p| self.render_position(p))
            .collect())
    }

    /// `POST /sessions/{id}/positions`: create, or update when `id` is given.
    pub fn upsert_session_position(
        &mut self,
        session_id: Uuid,
        input: PositionInput,
    ) -> Result<Position> {
        self.session_index(session_id)?;
        match input.id {
            Some(id) => {
                let index = self.position_index(id)?;
                if self.positions[index].session_id != session_id {
                    return Err(not_found("position in this session", id));
                }
                self.update_position_at(index, input)
            }
            None => self.create_position(session_id, input),
        }
    }

    /// `POST /positions`: update an existing position by `id`.
    pub fn update_position(&mut self, input: PositionInput) -> Result<Position> {
        let id = require_id(input.id)?;
        let index = self.position_index(id)?;
        self.update_position_at(index, input)
    }

    fn create_position(&mut self, session_id: Uuid, input: PositionInput) -> Result<Position> {
        let position_code = required("position_code", input.position_code)?;
        self.ensure_unique_position_code(session_id, &position_code, None)?;
        let record = PositionRecord {
            id: Uuid::new_v4(),
            session_id,
            position_code,
            position_title: input.position_title,
            est_hours_per_assignment: input.est_hours_per_assignment,
            est_start_date: input.est_start_date,
            est_end_date: input.est_end_date,
            position_type: input.position_type,
            instructor_ids: Vec::new(),
        };
        let position = self.render_position(&record);
        self.positions.push(record);
        Ok(position)
    }

    fn update_position_at(&mut self, index: usize, input: PositionInput) -> Result<Position> {
        let (id, session_id) = (self.positions[index].id, self.positions[index].session_id);
        let position_code = non_empty_if_present("position_code", input.position_code)?;
        if let Some(code) = &position_code {
            self.ensure_unique_position_code(session_id, code, Some(id))?;
        }

        let record = &mut self.positions[index];
        if let Some(code) = position_code {
            record.position_code = code;
        }
        if input.position_title.is_some() {
            record.position_title = input.position_title;
        }
        if input.est_hours_per_assignment.is_some() {
            record.est_hours_per_assignment = input.est_hours_per_assignment;
        }
        if input.est_start_date.is_some() {
            record.est_start_date = input.est_start_date;
        }
        if input.est_end_date.is_some() {
            record.est_end_date = input.est_end_date;
        }
        if input.position_type.is_some() {
            record.position_type = input.position_type;
        }
        Ok(self.render_position(&self.positions[index]))
    }

    pub fn delete_position(&mut self, input: IdInput) -> Result<Position> {
        let id = require_id(input.id)?;
        let index = self.position_index(id)?;
        let record = self.positions.remove(index);
        Ok(self.render_position(&record))
    }

    fn position_index(&self, id: Uuid) -> Result<usize> {
        self.positions
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| not_found("position", id))
    }

    fn ensure_unique_position_code(
        &self,
        session_id: Uuid,
        code: &str,
        except: Option<Uuid>,
    ) -> Result<()> {
        let taken = self.positions.iter().any(|p| {
            p.session_id == session_id && p.position_code == code && Some(p.id) != except
        });
        if taken {
            return Err(AppError::Conflict(format!(
                "position code {code:?} already exists in this session"
            )));
        }
        Ok(())
    }

    fn render_position(&self, record: &PositionRecord) -> Position {
        Position {
            id: record.id,
            session_id: record.session_id,
            position_code: record.position_code.clone(),
            position_title: record.position_title.clone(),
            est_hours_per_assignment: record.est_hours_per_assignment,
            est_start_date: record.est_start_date.clone(),
            est_end_date: record.est_end_date.clone(),
            position_type: record.position_type.clone(),
            instructors: record
                .instructor_ids
                .iter()
                .filter_map(|id| self.instructors.iter().find(|i| i.id == *id).cloned())
                .collect(),
        }
    }

    // --- instructors ---

    pub fn instructors(&self) -> Vec<Instructor> {
        self.instructors.clone()
    }

    pub fn session_instructors(&self, session_id: Uuid) -> Result<Vec<Instructor>> {
        self.session_index(session_id)?;
        Ok(self
            .instructors
            .iter()
            .filter(|i| self.session_instructors.contains(&(session_id, i.id)))
            .cloned()
            .collect())
    }

    pub fn upsert_instructor(&mut self, input: InstructorInput) -> Result<Instructor> {
        match input.id {
            Some(id) => self.update_instructor(id, input),
            None => self.create_instructor(input),
        }
    }

    fn create_instructor(&mut self, input: InstructorInput) -> Result<Instructor> {
        let last_name = required("last_name", input.last_name)?;
        let utorid = required("utorid", input.utorid)?;
        self.ensure_unique_utorid(&utorid, None)?;
        let instructor = Instructor {
            id: Uuid::new_v4(),
            first_name: input.first_name,
            last_name,
            email: input.email,
            utorid,
        };
        self.instructors.push(instructor.clone());
        Ok(instructor)
    }

    fn update_instructor(&mut self, id: Uuid, input: InstructorInput) -> Result<Instructor> {
        let index = self.instructor_index(id)?;
        let last_name = non_empty_if_present("last_name", input.last_name)?;
        let utorid = non_empty_if_present("utorid", input.utorid)?;
        if let Some(utorid) = &utorid {
            self.ensure_unique_utorid(utorid, Some(id))?;
        }

        let instructor = &mut self.instructors[index];
        if input.first_name.is_some() {
            instructor.first_name = input.first_name;
        }
        if let Some(last_name) = last_name {
            instructor.last_name = last_name;
        }
        if input.email.is_some() {
            instructor.email = input.email;
        }
        if let Some(utorid) = utorid {
            instructor.utorid = utorid;
        }
        Ok(instructor.clone())
    }

    /// Associate an instructor with a session. An `id` attaches an existing
    /// instructor; otherwise the body creates a new one first.
    pub fn add_session_instructor(
        &mut self,
        session_id: Uuid,
        input: InstructorInput,
    ) -> Result<Instructor> {
        self.session_index(session_id)?;
        let instructor = match input.id {
            Some(id) => self.instructors[self.instructor_index(id)?].clone(),
            None => self.create_instructor(input)?,
        };
        self.link_session_instructor(session_id, instructor.id);
        Ok(instructor)
    }

    /// Attach an instructor to a position, which also associates it with
    /// the position's session.
    pub fn add_position_instructor(
        &mut self,
        position_id: Uuid,
        input: PositionInstructorInput,
    ) -> Result<Instructor> {
        if let Some(body_position) = input.position_id {
            if body_position != position_id {
                return Err(AppError::BadRequest(format!(
                    "position_id {body_position} does not match route position {position_id}"
                )));
            }
        }
        let position_index = self.position_index(position_id)?;
        let id = require_id(input.id)?;
        let instructor = self.instructors[self.instructor_index(id)?].clone();

        let record = &mut self.positions[position_index];
        if !record.instructor_ids.contains(&id) {
            record.instructor_ids.push(id);
        }
        let session_id = record.session_id;
        self.link_session_instructor(session_id, id);
        Ok(instructor)
    }

    pub fn remove_position_instructor(
        &mut self,
        position_id: Uuid,
        input: IdInput,
    ) -> Result<Instructor> {
        let position_index = self.position_index(position_id)?;
        let id = require_id(input.id)?;
        let instructor = self.instructors[self.instructor_index(id)?].clone();

        let record = &mut self.positions[position_index];
        let before = record.instructor_ids.len();
        record.instructor_ids.retain(|i| *i != id);
        if record.instructor_ids.len() == before {
            return Err(AppError::NotFound(format!(
                "instructor {id} is not attached to position {position_id}"
            )));
        }
        Ok(instructor)
    }

    /// Dissociate an instructor from a session and from every position in it.
    pub fn remove_session_instructor(
        &mut self,
        session_id: Uuid,
        input: InstructorInput,
    ) -> Result<Instructor> {
        self.session_index(session_id)?;
        let id = require_id(input.id)?;
        let instructor = self.instructors[self.instructor_index(id)?].clone();

        let before = self.session_instructors.len();
        self.session_instructors.retain(|link| *link != (session_id, id));
        if self.session_instructors.len() == before {
            return Err(AppError::NotFound(format!(
                "instructor {id} is not associated with session {session_id}"
            )));
        }
        for record in self.positions.iter_mut().filter(|p| p.session_id == session_id) {
            record.instructor_ids.retain(|i| *i != id);
        }
        Ok(instructor)
    }

    pub fn delete_instructor(&mut self, input: InstructorInput) -> Result<Instructor> {
        let id = require_id(input.id)?;
        let index = self.instructor_index(id)?;
        let instructor = self.instructors.remove(index);
        self.session_instructors.retain(|(_, instructor_id)| *instructor_id != id);
        for record in &mut self.positions {
            record.instructor_ids.retain(|i| *i != id);
        }
        Ok(instructor)
    }

    fn instructor_index(&self, id: Uuid) -> Result<usize> {
        self.instructors
            .iter()
            .position(|i| i.id == id)
            .ok_or_else(|| not_found("instructor", id))
    }

    fn ensure_unique_utorid(&self, utorid: &str, except: Option<Uuid>) -> Result<()> {
        let taken = self
            .instructors
            .iter()
            .any(|i| i.utorid == utorid && Some(i.id) != except);
        if taken {
            return Err(AppError::Conflict(format!(
                "an instructor with utorid {utorid:?} already exists"
            )));
        }
        Ok(())
    }

    fn link_session_instructor(&mut self, session_id: Uuid, instructor_id: Uuid) {
        let link = (session_id, instructor_id);
        if !self.session_instructors.contains(&link) {
            self.session_instructors.push(link);
        }
    }
}
