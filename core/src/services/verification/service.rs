//! Verification processor implementation

use std::sync::Arc;
use tracing::{debug, error, info, warn};

use vg_shared::{Clock, SystemClock};

use crate::repositories::{ContextRepository, SubjectRepository};
use crate::services::notification::{ChangeKind, ChangeNotifier};

use super::types::VerificationOutcome;

/// Consumes verification tokens
///
/// A token is spent at most once: on success the pending status is applied,
/// subscribers are told, and the record is hard-deleted. Expired tokens are
/// reported and left for the reaper.
pub struct VerificationProcessor<C, U, N>
where
    C: ContextRepository,
    U: SubjectRepository,
    N: ChangeNotifier,
{
    contexts: Arc<C>,
    subjects: Arc<U>,
    notifier: Arc<N>,
    clock: Arc<dyn Clock>,
}

impl<C, U, N> VerificationProcessor<C, U, N>
where
    C: ContextRepository,
    U: SubjectRepository,
    N: ChangeNotifier,
{
    /// Create a new verification processor on the system clock
    pub fn new(contexts: Arc<C>, subjects: Arc<U>, notifier: Arc<N>) -> Self {
        Self {
            contexts,
            subjects,
            notifier,
            clock: Arc::new(SystemClock),
        }
    }

    /// Replace the clock used for expiry checks
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Consume a token
    ///
    /// This method:
    /// 1. Looks up the live record holding the token
    /// 2. Checks its expiry
    /// 3. Applies the pending status to the subject and saves it
    /// 4. Notifies downstream subscribers
    /// 5. Deletes the spent record (a failure here is only logged)
    ///
    /// Never returns an error; faults are reported as
    /// [`VerificationOutcome::fault`] with the detail logged.
    pub async fn consume(&self, token: &str) -> VerificationOutcome {
        let token = token.trim();
        if token.is_empty() {
            debug!("Rejected blank verification token");
            return VerificationOutcome::invalid();
        }

        let record = match self.contexts.find_by_token(token).await {
            Ok(Some(record)) => record,
            Ok(None) => {
                debug!("Unknown verification token");
                return VerificationOutcome::invalid();
            }
            Err(e) => {
                error!("Failed to look up verification token: {}", e);
                return VerificationOutcome::fault();
            }
        };

        let now = self.clock.now();
        match record.is_expired_at(now) {
            Ok(false) => {}
            Ok(true) => {
                info!(
                    context = %record.context,
                    subject = %record.subject_id,
                    context_id = %record.id,
                    "Verification token expired"
                );
                return VerificationOutcome::expired(record.context);
            }
            Err(e) => {
                error!(context_id = %record.id, "Stored expiry is unreadable: {}", e);
                return VerificationOutcome::fault();
            }
        }

        let mut subject = match self.subjects.find_by_subject_key(&record.subject_id).await {
            Ok(Some(subject)) => subject,
            Ok(None) => {
                error!(
                    subject = %record.subject_id,
                    context_id = %record.id,
                    "Verification context refers to a missing subject"
                );
                return VerificationOutcome::fault();
            }
            Err(e) => {
                error!(subject = %record.subject_id, "Failed to load subject: {}", e);
                return VerificationOutcome::fault();
            }
        };

        if let Some(status) = record.pending_status {
            let changed = subject.apply_status(status, now);
            subject = match self.subjects.save(subject).await {
                Ok(saved) => saved,
                Err(e) => {
                    error!(
                        subject = %record.subject_id,
                        status = %status,
                        "Failed to save subject status: {}",
                        e
                    );
                    return VerificationOutcome::fault();
                }
            };
            info!(
                subject = %record.subject_id,
                status = %status,
                changed,
                "Subject status applied"
            );
        }

        self.notifier.notify(&subject, ChangeKind::Update).await;

        match self.contexts.delete(record.id).await {
            Ok(true) => debug!(context_id = %record.id, "Spent verification context deleted"),
            Ok(false) => debug!(context_id = %record.id, "Spent verification context already gone"),
            Err(e) => warn!(
                context_id = %record.id,
                "Failed to delete spent verification context: {}",
                e
            ),
        }

        VerificationOutcome::success(record.context)
    }
}
