//! Contract suite for the staffing API.
//!
//! # Design
//! Every test talks to the API through `ApiClient` over real HTTP using
//! ureq. When `STAFFING_API_URL` is set the tests run against that backend;
//! otherwise each test starts its own mock server on a random port. Names
//! and codes are suffixed with a fresh UUID so a shared live backend with
//! existing data does not cause false collisions.

use serde_json::json;
use staffing_core::shape::shapes;
use staffing_core::{
    check_prop_types, routes, ApiClient, ApiError, AvailableTemplate, EntityId, Envelope,
    HttpMethod, HttpRequest, HttpResponse, IdRef, Instructor, InstructorInput, OfferTemplate,
    OfferTemplateInput, Position, PositionInput, PositionInstructor, Session, SessionInput,
    Transport,
};
use uuid::Uuid;

/// Executes requests with ureq, returning 4xx/5xx responses as data so the
/// envelope in the body decides the outcome.
struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    fn new() -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self { agent }
    }
}

impl Transport for UreqTransport {
    fn execute(&self, req: HttpRequest) -> Result<HttpResponse, ApiError> {
        let result = match (req.method, req.body) {
            (HttpMethod::Get, _) => self.agent.get(&req.path).call(),
            (HttpMethod::Post, Some(body)) => self
                .agent
                .post(&req.path)
                .content_type("application/json")
                .send(body.as_bytes()),
            (HttpMethod::Post, None) => self.agent.post(&req.path).send_empty(),
        };
        let mut response = result.map_err(|e| ApiError::Transport(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .body_mut()
            .read_to_string()
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        Ok(HttpResponse {
            status,
            headers: Vec::new(),
            body,
        })
    }
}

/// Start the mock server on a random port and return its base URL.
fn spawn_mock() -> String {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            staffing_mock::run(listener).await
        })
        .unwrap();
    });

    format!("http://{addr}")
}

fn api() -> ApiClient<UreqTransport> {
    let base_url = std::env::var("STAFFING_API_URL").unwrap_or_else(|_| spawn_mock());
    ApiClient::new(&base_url, UreqTransport::new())
}

fn unique(prefix: &str) -> String {
    format!("{prefix} {}", Uuid::new_v4().simple())
}

fn list_sessions(api: &ApiClient<UreqTransport>) -> Vec<Session> {
    api.api_get(routes::SESSIONS).unwrap().into_payload().unwrap()
}

fn create_session(api: &ApiClient<UreqTransport>, name: &str) -> Session {
    let input = SessionInput {
        name: Some(name.to_string()),
        start_date: Some("2025-09-01".to_string()),
        end_date: Some("2025-12-31".to_string()),
        rate1: Some(45.55),
        ..SessionInput::default()
    };
    api.api_post(routes::SESSIONS, &input)
        .unwrap()
        .into_payload()
        .unwrap()
}

fn delete_session(api: &ApiClient<UreqTransport>, id: &EntityId) {
    let envelope = api
        .api_post(routes::SESSIONS_DELETE, &IdRef::new(id.clone()))
        .unwrap();
    assert!(envelope.is_success(), "{envelope:?}");
}

fn create_position(
    api: &ApiClient<UreqTransport>,
    session_id: &EntityId,
    code: &str,
) -> Result<Envelope, ApiError> {
    let input = PositionInput {
        position_code: Some(code.to_string()),
        position_title: Some("Introduction to Computer Programming".to_string()),
        est_hours_per_assignment: Some(70.0),
        est_start_date: Some("2025-09-01".to_string()),
        est_end_date: Some("2025-12-31".to_string()),
        position_type: Some("Standard".to_string()),
        ..PositionInput::default()
    };
    api.api_post(&routes::session_positions(session_id), &input)
}

fn create_instructor(api: &ApiClient<UreqTransport>) -> Instructor {
    let utorid = format!("u{}", &Uuid::new_v4().simple().to_string()[..8]);
    let input = InstructorInput {
        first_name: Some("Jane".to_string()),
        last_name: Some("Smith".to_string()),
        email: Some(format!("{utorid}@example.com")),
        utorid: Some(utorid),
        ..InstructorInput::default()
    };
    api.api_post(routes::INSTRUCTORS, &input)
        .unwrap()
        .into_payload()
        .unwrap()
}

// --- sessions ---

#[test]
fn create_session_assigns_fresh_id_and_lists_it() {
    let api = api();
    let before = list_sessions(&api);

    let created = create_session(&api, &unique("Session"));
    assert!(before.iter().all(|s| s.id != created.id));
    assert_eq!(created.rate1, Some(45.55));

    let after = list_sessions(&api);
    assert_eq!(after.iter().filter(|s| s.id == created.id).count(), 1);
    assert!(after.contains(&created));

    delete_session(&api, &created.id);
}

#[test]
fn update_session_changes_only_submitted_fields() {
    let api = api();
    let created = create_session(&api, &unique("Session"));

    let update = SessionInput {
        id: Some(created.id.clone()),
        rate1: Some(50.25),
        ..SessionInput::default()
    };
    let updated: Session = api
        .api_post(routes::SESSIONS, &update)
        .unwrap()
        .into_payload()
        .unwrap();
    assert_eq!(updated.id, created.id);
    assert_eq!(updated.rate1, Some(50.25));
    assert_eq!(updated.name, created.name);
    assert_eq!(updated.start_date, created.start_date);
    assert_eq!(updated.end_date, created.end_date);

    let listed = list_sessions(&api);
    assert!(listed.contains(&updated));

    delete_session(&api, &created.id);
}

#[test]
fn create_session_with_empty_or_missing_name_errors() {
    let api = api();
    let empty = api
        .api_post(routes::SESSIONS, &json!({"name": "", "rate1": 10}))
        .unwrap();
    assert!(empty.is_error());
    let missing = api.api_post(routes::SESSIONS, &json!({"rate1": 10})).unwrap();
    assert!(missing.is_error());
}

#[test]
fn create_session_with_duplicate_name_errors() {
    let api = api();
    let name = unique("Session");
    let created = create_session(&api, &name);

    let duplicate = api
        .api_post(routes::SESSIONS, &json!({"name": name}))
        .unwrap();
    assert!(duplicate.is_error());
    assert!(!duplicate.message().unwrap_or_default().is_empty());

    delete_session(&api, &created.id);
}

#[test]
fn delete_session_with_unknown_or_null_id_errors() {
    let api = api();
    let unknown = api
        .api_post(routes::SESSIONS_DELETE, &IdRef::new(Uuid::new_v4()))
        .unwrap();
    assert!(unknown.is_error());
    let null = api
        .api_post(routes::SESSIONS_DELETE, &IdRef::default())
        .unwrap();
    assert!(null.is_error());
}

#[test]
fn delete_session_removes_it_from_listing() {
    let api = api();
    let created = create_session(&api, &unique("Session"));
    delete_session(&api, &created.id);
    assert!(list_sessions(&api).iter().all(|s| s.id != created.id));

    let again = api
        .api_post(routes::SESSIONS_DELETE, &IdRef::new(created.id.clone()))
        .unwrap();
    assert!(again.is_error());
}

// --- offer templates ---

#[test]
fn available_templates_are_minimal_templates() {
    let api = api();
    let envelope = api.api_get(routes::AVAILABLE_POSITION_TEMPLATES).unwrap();
    check_prop_types(&shapes::available_template(), envelope.payload().unwrap()).unwrap();
    let templates: Vec<AvailableTemplate> = envelope.into_payload().unwrap();
    assert!(!templates.is_empty());
}

#[test]
fn posting_matching_template_updates_in_place() {
    let api = api();
    let session = create_session(&api, &unique("Session"));
    let route = routes::session_add_position_template(&session.id);
    let input = OfferTemplateInput {
        position_type: Some("Standard".to_string()),
        offer_template: Some("Regular.html".to_string()),
        ..OfferTemplateInput::default()
    };

    let first: Vec<OfferTemplate> = api.api_post(&route, &input).unwrap().into_payload().unwrap();
    let second: Vec<OfferTemplate> = api.api_post(&route, &input).unwrap().into_payload().unwrap();
    assert_eq!(first.len(), second.len());
    assert_eq!(first, second);

    let by_id = OfferTemplateInput {
        id: Some(first[0].id.clone()),
        offer_template: Some("OTO.html".to_string()),
        ..OfferTemplateInput::default()
    };
    let third: Vec<OfferTemplate> = api.api_post(&route, &by_id).unwrap().into_payload().unwrap();
    assert_eq!(third.len(), first.len());
    assert_eq!(third[0].offer_template, "OTO.html");

    let listed: Vec<OfferTemplate> = api
        .api_get(&routes::session_position_templates(&session.id))
        .unwrap()
        .into_payload()
        .unwrap();
    assert_eq!(listed, third);

    delete_session(&api, &session.id);
}

#[test]
fn empty_template_fields_error() {
    let api = api();
    let session = create_session(&api, &unique("Session"));
    let route = routes::session_add_position_template(&session.id);

    let empty_file = api
        .api_post(&route, &json!({"position_type": "Standard", "offer_template": ""}))
        .unwrap();
    assert!(empty_file.is_error());
    let empty_type = api
        .api_post(&route, &json!({"position_type": "", "offer_template": "Regular.html"}))
        .unwrap();
    assert!(empty_type.is_error());

    delete_session(&api, &session.id);
}

// --- positions ---

#[test]
fn position_code_is_unique_per_session_only() {
    let api = api();
    let fall = create_session(&api, &unique("Fall"));
    let winter = create_session(&api, &unique("Winter"));

    assert!(create_position(&api, &fall.id, "CSC108H1").unwrap().is_success());
    assert!(create_position(&api, &winter.id, "CSC108H1").unwrap().is_success());
    assert!(create_position(&api, &fall.id, "CSC108H1").unwrap().is_error());

    delete_session(&api, &fall.id);
    delete_session(&api, &winter.id);
}

#[test]
fn update_and_delete_position() {
    let api = api();
    let session = create_session(&api, &unique("Session"));
    let position: Position = create_position(&api, &session.id, "MAT137Y1")
        .unwrap()
        .into_payload()
        .unwrap();

    let update = PositionInput {
        id: Some(position.id.clone()),
        est_hours_per_assignment: Some(90.0),
        ..PositionInput::default()
    };
    let updated: Position = api
        .api_post(routes::POSITIONS, &update)
        .unwrap()
        .into_payload()
        .unwrap();
    assert_eq!(updated.est_hours_per_assignment, Some(90.0));
    assert_eq!(updated.position_code, "MAT137Y1");

    let deleted = api.api_post(routes::POSITIONS_DELETE, &updated).unwrap();
    assert!(deleted.is_success(), "{deleted:?}");
    let listed: Vec<Position> = api
        .api_get(&routes::session_positions(&session.id))
        .unwrap()
        .into_payload()
        .unwrap();
    assert!(listed.is_empty());

    let again = api.api_post(routes::POSITIONS_DELETE, &updated).unwrap();
    assert!(again.is_error());

    delete_session(&api, &session.id);
}

// --- instructors ---

#[test]
fn instructor_association_lifecycle() {
    let api = api();
    let session = create_session(&api, &unique("Session"));
    let position: Position = create_position(&api, &session.id, "CSC148H1")
        .unwrap()
        .into_payload()
        .unwrap();
    let instructor = create_instructor(&api);

    let attached: Instructor = api
        .api_post(
            &routes::position_add_instructor(&position.id),
            &PositionInstructor {
                id: instructor.id.clone(),
                position_id: position.id.clone(),
            },
        )
        .unwrap()
        .into_payload()
        .unwrap();
    assert_eq!(attached, instructor);

    let on_session: Vec<Instructor> = api
        .api_get(&routes::session_instructors(&session.id))
        .unwrap()
        .into_payload()
        .unwrap();
    assert_eq!(on_session, vec![instructor.clone()]);

    let removed = api
        .api_post(&routes::session_instructors_delete(&session.id), &instructor)
        .unwrap();
    assert!(removed.is_success(), "{removed:?}");
    let on_session: Vec<Instructor> = api
        .api_get(&routes::session_instructors(&session.id))
        .unwrap()
        .into_payload()
        .unwrap();
    assert!(on_session.is_empty());

    let deleted = api.api_post(routes::INSTRUCTORS_DELETE, &instructor).unwrap();
    assert!(deleted.is_success(), "{deleted:?}");
    let all: Vec<Instructor> = api
        .api_get(routes::INSTRUCTORS)
        .unwrap()
        .into_payload()
        .unwrap();
    assert!(all.iter().all(|i| i.id != instructor.id));

    delete_session(&api, &session.id);
}

#[test]
fn update_instructor_by_id() {
    let api = api();
    let instructor = create_instructor(&api);
    let update = InstructorInput {
        id: Some(instructor.id.clone()),
        email: Some("new@example.com".to_string()),
        ..InstructorInput::default()
    };
    let updated: Instructor = api
        .api_post(routes::INSTRUCTORS, &update)
        .unwrap()
        .into_payload()
        .unwrap();
    assert_eq!(updated.email.as_deref(), Some("new@example.com"));
    assert_eq!(updated.utorid, instructor.utorid);

    api.api_post(routes::INSTRUCTORS_DELETE, &updated).unwrap();
}

// --- routing and shapes ---

#[test]
fn unknown_route_always_errors() {
    let api = api();
    for route in ["/no_such_collection", "/sessions/extra/deep/route", "/"] {
        let envelope = api.api_get(route).unwrap();
        assert!(envelope.is_error(), "{route}: {envelope:?}");
    }
}

#[test]
fn payloads_match_declared_shapes() {
    let api = api();
    let session = create_session(&api, &unique("Session"));
    create_position(&api, &session.id, "STA247H1").unwrap();
    let instructor = create_instructor(&api);

    let sessions = api.api_get(routes::SESSIONS).unwrap();
    check_prop_types(&shapes::session(), sessions.payload().unwrap()).unwrap();

    let positions = api.api_get(&routes::session_positions(&session.id)).unwrap();
    check_prop_types(&shapes::position(), positions.payload().unwrap()).unwrap();

    let instructors = api.api_get(routes::INSTRUCTORS).unwrap();
    check_prop_types(&shapes::instructor(), instructors.payload().unwrap()).unwrap();

    let template = OfferTemplateInput {
        position_type: Some("Standard".to_string()),
        offer_template: Some("Regular.html".to_string()),
        ..OfferTemplateInput::default()
    };
    let added = api
        .api_post(&routes::session_add_position_template(&session.id), &template)
        .unwrap();
    check_prop_types(&shapes::offer_template(), added.payload().unwrap()).unwrap();
    let templates = api
        .api_get(&routes::session_position_templates(&session.id))
        .unwrap();
    check_prop_types(&shapes::offer_template(), templates.payload().unwrap()).unwrap();

    for envelope in [&sessions, &positions, &instructors, &templates] {
        let envelope_json = serde_json::to_value(envelope).unwrap();
        check_prop_types(&shapes::success_envelope(), &envelope_json).unwrap();
    }
    let deleted = api.api_post(routes::INSTRUCTORS_DELETE, &instructor).unwrap();
    let deleted_json = serde_json::to_value(&deleted).unwrap();
    check_prop_types(&shapes::success_envelope(), &deleted_json).unwrap();

    let error = api.api_get("/not_a_route").unwrap();
    let error_json = serde_json::to_value(&error).unwrap();
    check_prop_types(&shapes::error_envelope(), &error_json).unwrap();

    delete_session(&api, &session.id);
}
