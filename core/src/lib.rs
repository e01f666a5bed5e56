//! # Verigate Core
//!
//! Domain layer for verification contexts: time-bounded, single-use tokens
//! that gate account status transitions (email confirmation, RSVP
//! acceptance, rejection notice).
//!
//! The crate holds the entities, the repository and collaborator traits the
//! infrastructure layer implements, and the three services that make up the
//! token lifecycle:
//! - [`ContextLifecycleManager`] issues or refreshes a token and sends the notification
//! - [`VerificationProcessor`] consumes a token and applies the pending status
//! - [`ContextReaper`] periodically purges expired and tombstoned records

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::entities::{
    ContextKind, ContextPolicy, PurgeTarget, ReapDecision, RecordState, Subject, SubjectStatus,
    Template, VerificationContext,
};
pub use errors::{DomainError, DomainResult};
pub use repositories::{ContextRepository, SubjectRepository};
pub use services::*;
