//! Route paths of the staffing API, relative to the base URL.

use crate::types::EntityId;

pub const SESSIONS: &str = "/sessions";
pub const SESSIONS_DELETE: &str = "/sessions/delete";
pub const AVAILABLE_POSITION_TEMPLATES: &str = "/available_position_templates";
pub const POSITIONS: &str = "/positions";
pub const POSITIONS_DELETE: &str = "/positions/delete";
pub const INSTRUCTORS: &str = "/instructors";
pub const INSTRUCTORS_DELETE: &str = "/instructors/delete";

pub fn session_position_templates(session_id: &EntityId) -> String {
    format!("/sessions/{session_id}/position_templates")
}

pub fn session_add_position_template(session_id: &EntityId) -> String {
    format!("/sessions/{session_id}/add_position_template")
}

pub fn session_positions(session_id: &EntityId) -> String {
    format!("/sessions/{session_id}/positions")
}

pub fn session_instructors(session_id: &EntityId) -> String {
    format!("/sessions/{session_id}/instructors")
}

pub fn session_instructors_delete(session_id: &EntityId) -> String {
    format!("/sessions/{session_id}/instructors/delete")
}

pub fn position_add_instructor(position_id: &EntityId) -> String {
    format!("/positions/{position_id}/add_instructor")
}

pub fn position_remove_instructor(position_id: &EntityId) -> String {
    format!("/positions/{position_id}/remove_instructor")
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn nested_routes_embed_the_id() {
        let id = EntityId::from(Uuid::from_u128(7));
        assert_eq!(
            session_positions(&id),
            "/sessions/00000000-0000-0000-0000-000000000007/positions"
        );
        assert_eq!(
            session_instructors_delete(&id),
            "/sessions/00000000-0000-0000-0000-000000000007/instructors/delete"
        );
        assert_eq!(
            position_add_instructor(&id),
            "/positions/00000000-0000-0000-0000-000000000007/add_instructor"
        );
        assert_eq!(session_instructors(&EntityId::Int(12)), "/sessions/12/instructors");
    }
}
