//! Context repository trait defining the interface for verification-context persistence.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::entities::{ContextKind, PurgeTarget, VerificationContext};
use crate::errors::DomainError;

/// Repository trait for VerificationContext persistence operations
///
/// Live lookups (`find_live_by_key`, `find_by_token`) never return
/// tombstoned records. Only `list_all(true)` sees them.
///
/// # Atomicity
/// `batch_delete` must be all-or-nothing: implementations run it inside a
/// single transaction and delete nothing when any part fails. A target is
/// removed only while its id and token both still match.
#[async_trait]
pub trait ContextRepository: Send + Sync {
    /// Find the live context for a (subject, purpose) pair
    ///
    /// # Returns
    /// * `Ok(Some(VerificationContext))` - Live record found
    /// * `Ok(None)` - No live record for the pair
    /// * `Err(DomainError)` - Store read failed
    async fn find_live_by_key(
        &self,
        subject_id: &str,
        context: ContextKind,
    ) -> Result<Option<VerificationContext>, DomainError>;

    /// Find a live context by exact token match
    ///
    /// # Example
    /// ```no_run
    /// # use vg_core::repositories::ContextRepository;
    /// # async fn example(repo: &impl ContextRepository) -> Result<(), Box<dyn std::error::Error>> {
    /// match repo.find_by_token("5f0c6d9e-7a1b-4c53-9d7e-0e3b9a1f2c44").await? {
    ///     Some(ctx) => println!("token belongs to {}", ctx.subject_id),
    ///     None => println!("unknown token"),
    /// }
    /// # Ok(())
    /// # }
    /// ```
    async fn find_by_token(&self, token: &str) -> Result<Option<VerificationContext>, DomainError>;

    /// Insert a new context
    ///
    /// Fails if the token is already in use.
    async fn create(&self, context: VerificationContext) -> Result<VerificationContext, DomainError>;

    /// Overwrite an existing context (token, expiry, status, state)
    async fn save(&self, context: VerificationContext) -> Result<VerificationContext, DomainError>;

    /// Hard-delete a context
    ///
    /// # Returns
    /// * `Ok(true)` - Record removed
    /// * `Ok(false)` - Nothing to remove (already purged)
    async fn delete(&self, id: Uuid) -> Result<bool, DomainError>;

    /// Soft-delete a live context
    ///
    /// # Returns
    /// * `Ok(true)` - Record moved to tombstoned
    /// * `Ok(false)` - No live record with that id
    async fn tombstone(&self, id: Uuid, at: DateTime<Utc>) -> Result<bool, DomainError>;

    /// List every record, optionally including tombstoned ones
    async fn list_all(&self, include_tombstoned: bool) -> Result<Vec<VerificationContext>, DomainError>;

    /// Hard-delete a set of records in one atomic batch
    ///
    /// Targets whose token changed since they were read are skipped.
    ///
    /// # Returns
    /// * `Ok(count)` - Number of rows removed
    /// * `Err(DomainError)` - Nothing was removed
    async fn batch_delete(&self, targets: &[PurgeTarget]) -> Result<u64, DomainError>;
}
