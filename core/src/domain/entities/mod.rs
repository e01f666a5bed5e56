//! Domain entities representing core business objects.

pub mod context_kind;
pub mod subject;
pub mod template;
pub mod verification_context;

// Re-export commonly used types
pub use context_kind::{ContextKind, ContextPolicy, RSVP_EXPIRY_HOURS, SIGNUP_EXPIRY_HOURS};
pub use subject::{Subject, SubjectStatus};
pub use template::Template;
pub use verification_context::{PurgeTarget, ReapDecision, RecordState, VerificationContext};
