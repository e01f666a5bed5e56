//! Domain error taxonomy.
//!
//! `NotFound` and `Expired` are ordinary outcomes that callers turn into
//! statuses. `ParseFault` and `Persistence` are operational faults. `Render`
//! and `Delivery` only ever abort the notification step.

use thiserror::Error;
use vg_shared::TimeParseError;

/// Core domain errors
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Resource not found: {resource}")]
    NotFound { resource: String },

    #[error("Verification token expired")]
    Expired,

    #[error("Corrupt stored timestamp: {0}")]
    ParseFault(#[from] TimeParseError),

    #[error("Persistence failure: {message}")]
    Persistence { message: String },

    #[error("Render failure: {message}")]
    Render { message: String },

    #[error("Delivery failure: {message}")]
    Delivery { message: String },

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl DomainError {
    /// Shorthand for a persistence failure
    pub fn persistence(message: impl Into<String>) -> Self {
        DomainError::Persistence {
            message: message.into(),
        }
    }

    /// Shorthand for a missing resource
    pub fn not_found(resource: impl Into<String>) -> Self {
        DomainError::NotFound {
            resource: resource.into(),
        }
    }

    /// Whether this error is an ordinary outcome rather than a fault
    pub fn is_expected_outcome(&self) -> bool {
        matches!(self, DomainError::NotFound { .. } | DomainError::Expired)
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
