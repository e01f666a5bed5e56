//! Subject repository trait.
//!
//! Subjects belong to the registration platform. The verification core only
//! looks them up by key and writes back status changes.

use async_trait::async_trait;

use crate::domain::entities::Subject;
use crate::errors::DomainError;

/// Repository trait for the subject (account) store
#[async_trait]
pub trait SubjectRepository: Send + Sync {
    /// Find a subject by its external key
    ///
    /// # Returns
    /// * `Ok(Some(Subject))` - Subject found
    /// * `Ok(None)` - No subject with that key
    /// * `Err(DomainError)` - Store read failed
    async fn find_by_subject_key(&self, key: &str) -> Result<Option<Subject>, DomainError>;

    /// Persist a subject
    ///
    /// Writing the same status twice must leave the stored row unchanged.
    async fn save(&self, subject: Subject) -> Result<Subject, DomainError>;
}
