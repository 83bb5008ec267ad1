//! Directory error types.

use serde::Serialize;
use thiserror::Error;

use crate::db::StoreError;

/// A single field-level validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    /// The offending field; index-qualified in bulk payloads
    /// (e.g. `contacts[2].phone`).
    pub field: String,
    /// Human-readable description of the constraint that failed.
    pub message: String,
}

impl Violation {
    /// Create a violation.
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Errors that can occur during directory operations.
#[derive(Debug, Error)]
pub enum DirError {
    /// No contact with the requested id exists.
    #[error("contact not found")]
    NotFound,

    /// The caller is not allowed to perform this operation on this record.
    #[error("forbidden")]
    Forbidden,

    /// One or more fields failed validation; nothing was persisted.
    #[error("validation failed")]
    Invalid(Vec<Violation>),

    /// Store/database error.
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}
