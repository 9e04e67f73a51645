//! Domain invariant violations.

use thiserror::Error;

/// Raised when a value object or entity refuses to be constructed.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    #[error("Title cannot be empty")]
    EmptyTitle,

    #[error("Title cannot exceed {max} characters")]
    TitleTooLong { max: usize },

    #[error("Note ID must be positive, got: {0}")]
    InvalidNoteId(i64),

    #[error("City name cannot be empty")]
    EmptyCityName,

    #[error("City name cannot exceed {max} characters")]
    CityNameTooLong { max: usize },

    #[error("Latitude must be between -90 and 90, got: {0}")]
    LatitudeOutOfRange(f64),

    #[error("Longitude must be between -180 and 180, got: {0}")]
    LongitudeOutOfRange(f64),

    #[error("Temperature cannot be below absolute zero: {0}")]
    BelowAbsoluteZero(f64),

    #[error("Wind speed cannot be negative: {0}")]
    NegativeWindSpeed(f64),

    #[error("File path cannot be empty")]
    EmptyPath,

    #[error("Path traversal is not allowed: {0}")]
    PathTraversal(String),

    #[error("Access to system directories is not allowed: {0}")]
    ProtectedPath(String),

    #[error("Division by zero is not allowed")]
    DivisionByZero,

    #[error("Unknown operation: {0}")]
    UnknownOperation(String),
}
