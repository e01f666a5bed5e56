//! Context lifecycle manager implementation

use std::sync::Arc;
use tracing::{debug, error, info, warn};

use vg_shared::utils::mask_email;
use vg_shared::{Clock, SystemClock};

use crate::domain::entities::{ContextKind, Subject, VerificationContext};
use crate::errors::{DomainError, DomainResult};
use crate::repositories::{ContextRepository, SubjectRepository};
use crate::services::notification::{Dispatcher, MessageRenderer, OutboundMessage};

use super::types::{IssueReport, NotificationOutcome};

/// Issues verification contexts and sends the matching notification
///
/// There is at most one live record per (subject, kind). Issuing again for
/// the same pair overwrites token and expiry in place, so any link sent
/// earlier stops working.
pub struct ContextLifecycleManager<C, U, R, D>
where
    C: ContextRepository,
    U: SubjectRepository,
    R: MessageRenderer,
    D: Dispatcher,
{
    contexts: Arc<C>,
    subjects: Arc<U>,
    renderer: Arc<R>,
    dispatcher: Arc<D>,
    clock: Arc<dyn Clock>,
}

impl<C, U, R, D> ContextLifecycleManager<C, U, R, D>
where
    C: ContextRepository,
    U: SubjectRepository,
    R: MessageRenderer,
    D: Dispatcher,
{
    /// Create a new lifecycle manager on the system clock
    pub fn new(contexts: Arc<C>, subjects: Arc<U>, renderer: Arc<R>, dispatcher: Arc<D>) -> Self {
        Self {
            contexts,
            subjects,
            renderer,
            dispatcher,
            clock: Arc::new(SystemClock),
        }
    }

    /// Replace the clock used for expiry calculation
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Issue a token for (subject, kind), or refresh the live one
    ///
    /// The record is persisted before anything is rendered. Render and
    /// delivery failures do not undo it; they are reported in
    /// [`IssueReport::notification`] so the caller can issue again.
    ///
    /// # Returns
    /// * `Ok(IssueReport)` - Record persisted (notification may still have failed)
    /// * `Err(DomainError::Persistence)` - Store read or write failed
    pub async fn issue_or_refresh(
        &self,
        subject: &Subject,
        kind: ContextKind,
    ) -> DomainResult<IssueReport> {
        let now = self.clock.now();

        let (record, refreshed) = match self
            .contexts
            .find_live_by_key(&subject.subject_key, kind)
            .await?
        {
            Some(mut existing) => {
                existing.refresh(now);
                (self.contexts.save(existing).await?, true)
            }
            None => {
                let fresh = VerificationContext::issue(subject.subject_key.as_str(), kind, now);
                (self.contexts.create(fresh).await?, false)
            }
        };

        info!(
            context = %kind,
            subject = %subject.subject_key,
            context_id = %record.id,
            refreshed,
            expiry = %record.expiry,
            "Verification context issued"
        );

        let notification = self.notify(subject, &record).await;

        Ok(IssueReport {
            context_id: record.id,
            token: record.token,
            expiry: record.expiry,
            refreshed,
            notification,
        })
    }

    /// Issue for a subject known only by key
    ///
    /// # Returns
    /// * `Err(DomainError::NotFound)` - No subject with that key
    pub async fn issue_or_refresh_by_key(
        &self,
        subject_key: &str,
        kind: ContextKind,
    ) -> DomainResult<IssueReport> {
        let subject = self
            .subjects
            .find_by_subject_key(subject_key)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("subject {}", subject_key)))?;

        self.issue_or_refresh(&subject, kind).await
    }

    /// Withdraw the live token for (subject, kind)
    ///
    /// The record is tombstoned: its link stops verifying at once and the
    /// reaper purges it on the next sweep.
    ///
    /// # Returns
    /// * `Ok(true)` - A live record was tombstoned
    /// * `Ok(false)` - Nothing live for the pair
    pub async fn revoke(&self, subject_key: &str, kind: ContextKind) -> DomainResult<bool> {
        let record = match self.contexts.find_live_by_key(subject_key, kind).await? {
            Some(record) => record,
            None => {
                debug!(context = %kind, subject = %subject_key, "No live context to revoke");
                return Ok(false);
            }
        };

        let revoked = self.contexts.tombstone(record.id, self.clock.now()).await?;
        if revoked {
            info!(
                context = %kind,
                subject = %subject_key,
                context_id = %record.id,
                "Verification context revoked"
            );
        }

        Ok(revoked)
    }

    async fn notify(&self, subject: &Subject, record: &VerificationContext) -> NotificationOutcome {
        let rendered = match self
            .renderer
            .render(record.context, subject, &record.token)
            .await
        {
            Ok(rendered) => rendered,
            Err(e) => {
                error!(
                    context = %record.context,
                    subject = %subject.subject_key,
                    "Failed to render verification message: {}",
                    e
                );
                return NotificationOutcome::RenderFailed {
                    reason: e.to_string(),
                };
            }
        };

        let message = OutboundMessage::for_subject(subject, rendered);
        debug!(
            provider = self.dispatcher.provider_name(),
            recipient = %mask_email(&message.recipient_address),
            "Dispatching verification message"
        );

        match self.dispatcher.send(&message).await {
            Ok(message_id) => {
                info!(
                    context = %record.context,
                    subject = %subject.subject_key,
                    message_id = %message_id,
                    "Verification message sent"
                );
                NotificationOutcome::Sent { message_id }
            }
            Err(e) => {
                warn!(
                    context = %record.context,
                    subject = %subject.subject_key,
                    provider = self.dispatcher.provider_name(),
                    "Failed to deliver verification message: {}",
                    e
                );
                NotificationOutcome::DeliveryFailed {
                    reason: e.to_string(),
                }
            }
        }
    }
}
