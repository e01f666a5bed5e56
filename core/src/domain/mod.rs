//! Domain layer containing business entities.

pub mod entities;

// Re-export commonly used domain types
pub use entities::{
    ContextKind, ContextPolicy, PurgeTarget, ReapDecision, RecordState, Subject, SubjectStatus,
    Template, VerificationContext,
};
