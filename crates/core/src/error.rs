//! Error model for validation and projection.

use serde::Serialize;
use thiserror::Error;

use crate::schema::EntityKind;

/// A single field that failed validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldViolation {
    pub field: String,
    pub message: String,
}

impl FieldViolation {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl core::fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Inbound payload rejected by the schema registry.
///
/// Carries **every** failing field, not just the first one, so a client can fix
/// all problems in a single round trip.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind} payload failed validation: {}", summary(.violations))]
pub struct ValidationError {
    pub kind: EntityKind,
    pub violations: Vec<FieldViolation>,
}

impl ValidationError {
    pub fn new(kind: EntityKind, violations: Vec<FieldViolation>) -> Self {
        Self { kind, violations }
    }

    pub fn violations(&self) -> &[FieldViolation] {
        &self.violations
    }

    /// True if `field` is among the reported violations.
    pub fn names_field(&self, field: &str) -> bool {
        self.violations.iter().any(|v| v.field == field)
    }
}

fn summary(violations: &[FieldViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// A stored document does not have the shape its schema requires.
///
/// This means schema drift or corruption upstream; it is never the client's fault.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MappingError {
    #[error("{kind} document is missing required field `{field}`")]
    MissingField {
        kind: EntityKind,
        field: &'static str,
    },

    #[error("{kind} document field `{field}` has the wrong type (expected {expected})")]
    WrongType {
        kind: EntityKind,
        field: &'static str,
        expected: &'static str,
    },

    #[error("{kind} document could not be decoded: {message}")]
    Decode { kind: EntityKind, message: String },
}

impl MappingError {
    pub fn kind(&self) -> EntityKind {
        match self {
            MappingError::MissingField { kind, .. }
            | MappingError::WrongType { kind, .. }
            | MappingError::Decode { kind, .. } => *kind,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_message_lists_every_field() {
        let err = ValidationError::new(
            EntityKind::Lead,
            vec![
                FieldViolation::new("name", "field required"),
                FieldViolation::new("email", "value is not a valid email address"),
            ],
        );

        let msg = err.to_string();
        assert!(msg.starts_with("Lead payload failed validation"));
        assert!(msg.contains("name: field required"));
        assert!(msg.contains("email: value is not a valid email address"));
        assert!(err.names_field("email"));
        assert!(!err.names_field("phone"));
    }

    #[test]
    fn mapping_error_reports_kind() {
        let err = MappingError::MissingField {
            kind: EntityKind::Post,
            field: "title",
        };
        assert_eq!(err.kind(), EntityKind::Post);
        assert_eq!(err.to_string(), "Post document is missing required field `title`");
    }
}
