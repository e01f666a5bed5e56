//! Mock implementations for testing the verification processor

use async_trait::async_trait;
use std::sync::Mutex;

use crate::domain::entities::{Subject, SubjectStatus};
use crate::services::notification::{ChangeKind, ChangeNotifier};

// Mock notifier recording (subject key, status, change) triples
#[derive(Default)]
pub struct RecordingNotifier {
    pub events: Mutex<Vec<(String, SubjectStatus, ChangeKind)>>,
}

impl RecordingNotifier {
    pub fn count(&self) -> usize {
        self.events.lock().unwrap().len()
    }
}

#[async_trait]
impl ChangeNotifier for RecordingNotifier {
    async fn notify(&self, subject: &Subject, change: ChangeKind) {
        self.events
            .lock()
            .unwrap()
            .push((subject.subject_key.clone(), subject.status, change));
    }
}
