//! Mock implementation of ContextRepository for testing

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::{ContextKind, PurgeTarget, RecordState, VerificationContext};
use crate::errors::DomainError;

use super::r#trait::ContextRepository;

/// Mock context repository for testing
///
/// Failure switches let tests drive each fault path.
#[derive(Default)]
pub struct MockContextRepository {
    records: Arc<RwLock<HashMap<Uuid, VerificationContext>>>,
    pub fail_reads: AtomicBool,
    pub fail_writes: AtomicBool,
    pub fail_deletes: AtomicBool,
    pub fail_batch: AtomicBool,
    pub batch_calls: AtomicUsize,
}

impl MockContextRepository {
    /// Create a new mock repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a record directly, bypassing uniqueness checks
    pub async fn seed(&self, context: VerificationContext) {
        self.records.write().await.insert(context.id, context);
    }

    /// Snapshot of every stored record
    pub async fn all(&self) -> Vec<VerificationContext> {
        self.records.read().await.values().cloned().collect()
    }

    pub async fn get(&self, id: Uuid) -> Option<VerificationContext> {
        self.records.read().await.get(&id).cloned()
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    fn check(flag: &AtomicBool, what: &str) -> Result<(), DomainError> {
        if flag.load(Ordering::SeqCst) {
            return Err(DomainError::persistence(format!("simulated {} failure", what)));
        }
        Ok(())
    }
}

#[async_trait]
impl ContextRepository for MockContextRepository {
    async fn find_live_by_key(
        &self,
        subject_id: &str,
        context: ContextKind,
    ) -> Result<Option<VerificationContext>, DomainError> {
        Self::check(&self.fail_reads, "read")?;
        let records = self.records.read().await;
        Ok(records
            .values()
            .find(|c| c.is_live() && c.subject_id == subject_id && c.context == context)
            .cloned())
    }

    async fn find_by_token(&self, token: &str) -> Result<Option<VerificationContext>, DomainError> {
        Self::check(&self.fail_reads, "read")?;
        let records = self.records.read().await;
        Ok(records
            .values()
            .find(|c| c.is_live() && c.token == token)
            .cloned())
    }

    async fn create(&self, context: VerificationContext) -> Result<VerificationContext, DomainError> {
        Self::check(&self.fail_writes, "write")?;
        let mut records = self.records.write().await;

        if records.values().any(|c| c.token == context.token) {
            return Err(DomainError::Validation {
                message: "Token already exists".to_string(),
            });
        }

        records.insert(context.id, context.clone());
        Ok(context)
    }

    async fn save(&self, context: VerificationContext) -> Result<VerificationContext, DomainError> {
        Self::check(&self.fail_writes, "write")?;
        let mut records = self.records.write().await;

        if !records.contains_key(&context.id) {
            return Err(DomainError::not_found("VerificationContext"));
        }

        records.insert(context.id, context.clone());
        Ok(context)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        Self::check(&self.fail_deletes, "delete")?;
        Ok(self.records.write().await.remove(&id).is_some())
    }

    async fn tombstone(&self, id: Uuid, at: DateTime<Utc>) -> Result<bool, DomainError> {
        Self::check(&self.fail_writes, "write")?;
        let mut records = self.records.write().await;
        match records.get_mut(&id) {
            Some(record) if record.is_live() => {
                record.state = RecordState::Tombstoned { at };
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn list_all(&self, include_tombstoned: bool) -> Result<Vec<VerificationContext>, DomainError> {
        Self::check(&self.fail_reads, "read")?;
        let records = self.records.read().await;
        Ok(records
            .values()
            .filter(|c| include_tombstoned || c.is_live())
            .cloned()
            .collect())
    }

    async fn batch_delete(&self, targets: &[PurgeTarget]) -> Result<u64, DomainError> {
        self.batch_calls.fetch_add(1, Ordering::SeqCst);
        Self::check(&self.fail_batch, "batch delete")?;

        let mut records = self.records.write().await;
        let mut removed = 0;
        for target in targets {
            let unchanged = records
                .get(&target.id)
                .map(|c| c.token == target.token)
                .unwrap_or(false);
            if unchanged {
                records.remove(&target.id);
                removed += 1;
            }
        }
        Ok(removed)
    }
}
