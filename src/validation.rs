use serde_json::{Map, Number, Value};
use thiserror::Error;

use crate::models::ThoughtRecord;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Invalid thought: must be a string")]
    InvalidThought,

    #[error("Invalid thoughtNumber: must be a number")]
    InvalidThoughtNumber,

    #[error("Invalid totalThoughts: must be a number")]
    InvalidTotalThoughts,

    #[error("Invalid nextThoughtNeeded: must be a boolean")]
    InvalidNextThoughtNeeded,
}

/// Turns an untyped tool payload into a `ThoughtRecord`.
///
/// Required fields are checked in a fixed order and the first failure wins.
/// A zero or empty value counts as missing. Optional fields are copied as-is,
/// with no type or cross-field checks.
#[derive(Clone, Debug, Default)]
pub struct InputValidator;

impl InputValidator {
    pub fn new() -> Self {
        Self
    }

    pub fn validate(&self, input: &Value) -> std::result::Result<ThoughtRecord, ValidationError> {
        let empty = Map::new();
        let fields = input.as_object().unwrap_or(&empty);

        let thought = fields
            .get("thought")
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .ok_or(ValidationError::InvalidThought)?;

        let thought_number = required_number(fields, "thoughtNumber")
            .ok_or(ValidationError::InvalidThoughtNumber)?;

        let total_thoughts = required_number(fields, "totalThoughts")
            .ok_or(ValidationError::InvalidTotalThoughts)?;

        let next_thought_needed = fields
            .get("nextThoughtNeeded")
            .and_then(Value::as_bool)
            .ok_or(ValidationError::InvalidNextThoughtNeeded)?;

        Ok(ThoughtRecord {
            thought: thought.to_string(),
            thought_number,
            total_thoughts,
            next_thought_needed,
            is_revision: optional(fields, "isRevision"),
            revises_thought: optional(fields, "revisesThought"),
            branch_from_thought: optional(fields, "branchFromThought"),
            branch_id: optional(fields, "branchId"),
            needs_more_thoughts: optional(fields, "needsMoreThoughts"),
        })
    }
}

/// Any JSON number other than zero
fn required_number(fields: &Map<String, Value>, key: &str) -> Option<Number> {
    match fields.get(key) {
        Some(Value::Number(n)) if n.as_f64().is_some_and(|f| f != 0.0) => Some(n.clone()),
        _ => None,
    }
}

fn optional(fields: &Map<String, Value>, key: &str) -> Option<Value> {
    fields.get(key).filter(|v| !v.is_null()).cloned()
}
