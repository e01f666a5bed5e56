//! Bounded-queue change notifier

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::mpsc::{self, error::TrySendError};
use tracing::{debug, info, warn};

use vg_core::domain::entities::{Subject, SubjectStatus};
use vg_core::services::notification::{ChangeKind, ChangeNotifier};

/// A subject change as seen by downstream consumers
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChangeEvent {
    pub subject_key: String,
    pub status: SubjectStatus,
    pub change: ChangeKind,
    pub queued_at: DateTime<Utc>,
}

/// Change notifier that enqueues events without waiting
///
/// A full queue drops the event with a warning; the verification path is
/// never blocked by a slow consumer.
#[derive(Clone)]
pub struct QueueChangeNotifier {
    sender: mpsc::Sender<ChangeEvent>,
}

impl QueueChangeNotifier {
    /// Create a notifier and the receiving end of its queue
    pub fn channel(capacity: usize) -> (Self, mpsc::Receiver<ChangeEvent>) {
        let (sender, receiver) = mpsc::channel(capacity.max(1));
        (Self { sender }, receiver)
    }
}

#[async_trait]
impl ChangeNotifier for QueueChangeNotifier {
    async fn notify(&self, subject: &Subject, change: ChangeKind) {
        let event = ChangeEvent {
            subject_key: subject.subject_key.clone(),
            status: subject.status,
            change,
            queued_at: Utc::now(),
        };

        match self.sender.try_send(event) {
            Ok(()) => debug!(subject = %subject.subject_key, "Subject change queued"),
            Err(TrySendError::Full(event)) => warn!(
                subject = %event.subject_key,
                "Change queue full, dropping subject change"
            ),
            Err(TrySendError::Closed(event)) => warn!(
                subject = %event.subject_key,
                "Change queue closed, dropping subject change"
            ),
        }
    }
}

/// Drain the queue into the log until every sender is dropped
pub async fn log_changes(mut receiver: mpsc::Receiver<ChangeEvent>) {
    while let Some(event) = receiver.recv().await {
        info!(
            subject = %event.subject_key,
            status = %event.status,
            change = ?event.change,
            "Subject changed"
        );
    }
    debug!("Change queue drained");
}
