//! Error types for the grading core

use serde_json::Number;
use thiserror::Error;

/// Core error type
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    #[error("Points out of range: {0} (expected 0-100)")]
    PointsOutOfRange(i64),

    #[error("Grade out of range: {0} (expected 1-6)")]
    GradeOutOfRange(u8),
}

/// Errors raised while reading a submitted record against an exam program.
///
/// `path` is the dotted location of the offending field, e.g. `AP2.planning.main`.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InputError {
    #[error("Unknown field: {path}")]
    UnknownField { path: String },

    #[error("Field given more than once: {path}")]
    DuplicateField { path: String },

    #[error("Invalid type for '{path}': expected {expected}")]
    InvalidType { path: String, expected: &'static str },

    /// `value` is the number as submitted
    #[error("Points out of range for '{path}': {value} (expected 0-100)")]
    OutOfRange { path: String, value: Number },
}

impl InputError {
    /// Dotted path of the field the error refers to
    pub fn path(&self) -> &str {
        match self {
            InputError::UnknownField { path }
            | InputError::DuplicateField { path }
            | InputError::InvalidType { path, .. }
            | InputError::OutOfRange { path, .. } => path,
        }
    }
}

/// Invariant violations in an exam program definition
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProgramError {
    #[error("Unknown exam program: {0}")]
    UnknownProgram(String),

    #[error("Program '{0}' has no components")]
    EmptyProgram(String),

    #[error("Group '{0}' has no components")]
    EmptyGroup(String),

    #[error("Duplicate component key or alias: {0}")]
    DuplicateKey(String),

    #[error("Reserved component key: {0}")]
    ReservedKey(String),

    #[error("Component '{0}' requires a weight")]
    MissingWeight(String),

    #[error("Section '{0}' must not carry a weight")]
    UnexpectedWeight(String),

    #[error("Invalid weight for '{key}': {weight} (expected 0 < weight <= 1)")]
    InvalidWeight { key: String, weight: f64 },

    #[error("Invalid outcome key: {0}")]
    InvalidOutputKey(String),

    #[error("Failed to parse program definition: {0}")]
    Parse(String),
}

impl From<serde_yaml::Error> for ProgramError {
    fn from(err: serde_yaml::Error) -> Self {
        ProgramError::Parse(err.to_string())
    }
}
