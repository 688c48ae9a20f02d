//! Structural assertions over JSON payloads.
//!
//! A [`Shape`] wraps a JSON Schema (draft 2020-12) document and
//! [`check_prop_types`] validates a value against it. Object schemas list
//! the fields they care about and leave `additionalProperties` open. When the
//! value is an array and the schema does not describe an array, every element
//! is checked, so one shape serves both an item route and its listing.
//!
//! Paths in [`ShapeError::Mismatch`] are JSON pointers into the checked value.

use jsonschema::Draft;
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq)]
pub struct Shape {
    schema: Value,
}

impl Shape {
    pub fn new(schema: Value) -> Self {
        Self { schema }
    }

    pub fn schema(&self) -> &Value {
        &self.schema
    }

    fn is_array(&self) -> bool {
        self.schema.get("type").and_then(Value::as_str) == Some("array")
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum ShapeError {
    #[error("invalid shape: {0}")]
    InvalidSchema(String),
    #[error("{path}: {message}")]
    Mismatch { path: String, message: String },
}

pub fn check_prop_types(shape: &Shape, value: &Value) -> Result<(), ShapeError> {
    let validator = jsonschema::options()
        .with_draft(Draft::Draft202012)
        .build(shape.schema())
        .map_err(|err| ShapeError::InvalidSchema(err.to_string()))?;

    let check = |item: &Value, prefix: &str| match validator.iter_errors(item).next() {
        Some(err) => Err(ShapeError::Mismatch {
            path: format!("{prefix}{}", err.instance_path),
            message: err.to_string(),
        }),
        None => Ok(()),
    };

    match value {
        Value::Array(items) if !shape.is_array() => items
            .iter()
            .enumerate()
            .try_for_each(|(i, item)| check(item, &format!("/{i}"))),
        _ => check(value, ""),
    }
}

/// Shapes of the entities and envelopes the API returns.
pub mod shapes {
    use serde_json::{json, Value};

    use super::Shape;

    fn id() -> Value {
        json!({"type": ["string", "integer"]})
    }

    fn optional(kind: &str) -> Value {
        json!({"type": [kind, "null"]})
    }

    fn instructor_schema() -> Value {
        json!({
            "type": "object",
            "required": ["id", "last_name", "utorid"],
            "properties": {
                "id": id(),
                "first_name": optional("string"),
                "last_name": {"type": "string"},
                "email": optional("string"),
                "utorid": {"type": "string"}
            }
        })
    }

    pub fn session() -> Shape {
        Shape::new(json!({
            "type": "object",
            "required": ["id", "name"],
            "properties": {
                "id": id(),
                "name": {"type": "string"},
                "start_date": optional("string"),
                "end_date": optional("string"),
                "rate1": optional("number"),
                "rate2": optional("number")
            }
        }))
    }

    pub fn available_template() -> Shape {
        Shape::new(json!({
            "type": "object",
            "required": ["offer_template"],
            "properties": {"offer_template": {"type": "string"}}
        }))
    }

    pub fn offer_template() -> Shape {
        Shape::new(json!({
            "type": "object",
            "required": ["id", "position_type", "offer_template"],
            "properties": {
                "id": id(),
                "position_type": {"type": "string"},
                "offer_template": {"type": "string"}
            }
        }))
    }

    pub fn instructor() -> Shape {
        Shape::new(instructor_schema())
    }

    pub fn position() -> Shape {
        Shape::new(json!({
            "type": "object",
            "required": ["id", "position_code"],
            "properties": {
                "id": id(),
                "position_code": {"type": "string"},
                "position_title": optional("string"),
                "est_hours_per_assignment": optional("number"),
                "est_start_date": optional("string"),
                "est_end_date": optional("string"),
                "position_type": optional("string"),
                "instructors": {"type": "array", "items": instructor_schema()}
            }
        }))
    }

    pub fn success_envelope() -> Shape {
        Shape::new(json!({
            "type": "object",
            "required": ["status"],
            "properties": {"status": {"const": "success"}}
        }))
    }

    pub fn error_envelope() -> Shape {
        Shape::new(json!({
            "type": "object",
            "required": ["status", "message"],
            "properties": {
                "status": {"const": "error"},
                "message": {"type": "string"}
            }
        }))
    }
}
