//! Mock implementation of SubjectRepository for testing

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::entities::Subject;
use crate::errors::DomainError;

use super::trait_::SubjectRepository;

/// Mock subject repository for testing
#[derive(Default)]
pub struct MockSubjectRepository {
    subjects: Arc<RwLock<HashMap<String, Subject>>>,
    pub fail_saves: AtomicBool,
    pub save_calls: AtomicUsize,
}

impl MockSubjectRepository {
    /// Create a new mock repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a repository already holding `subject`
    pub async fn with_subject(subject: Subject) -> Self {
        let repo = Self::new();
        repo.subjects
            .write()
            .await
            .insert(subject.subject_key.clone(), subject);
        repo
    }

    pub async fn get(&self, key: &str) -> Option<Subject> {
        self.subjects.read().await.get(key).cloned()
    }
}

#[async_trait]
impl SubjectRepository for MockSubjectRepository {
    async fn find_by_subject_key(&self, key: &str) -> Result<Option<Subject>, DomainError> {
        Ok(self.subjects.read().await.get(key).cloned())
    }

    async fn save(&self, subject: Subject) -> Result<Subject, DomainError> {
        self.save_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_saves.load(Ordering::SeqCst) {
            return Err(DomainError::persistence("simulated subject save failure"));
        }
        self.subjects
            .write()
            .await
            .insert(subject.subject_key.clone(), subject.clone());
        Ok(subject)
    }
}
