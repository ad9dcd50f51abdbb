use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Reasons a form field can fail validation, listed in reporting precedence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Violation {
    ValueMissing,
    TypeMismatch,
    TooShort,
    PatternMismatch,
    OutOfRange,
}

impl Violation {
    pub fn message(self) -> &'static str {
        match self {
            Violation::ValueMissing => "This field is required",
            Violation::TypeMismatch => "Enter a valid format",
            Violation::TooShort => "Too short",
            Violation::PatternMismatch => "Does not meet requirements",
            Violation::OutOfRange => "Out of range",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub violation: Violation,
}

impl FieldError {
    pub fn new(field: impl Into<String>, violation: Violation) -> Self {
        Self {
            field: field.into(),
            violation,
        }
    }

    pub fn message(&self) -> &'static str {
        self.violation.message()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid input: {}", render_fields(.fields))]
pub struct ValidationErrors {
    pub fields: Vec<FieldError>,
}

impl ValidationErrors {
    pub fn message_for(&self, field: &str) -> Option<&'static str> {
        self.fields
            .iter()
            .find(|f| f.field == field)
            .map(FieldError::message)
    }
}

fn render_fields(fields: &[FieldError]) -> String {
    fields
        .iter()
        .map(|f| format!("{}: {}", f.field, f.message()))
        .collect::<Vec<_>>()
        .join("; ")
}
