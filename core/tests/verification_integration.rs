//! End-to-end lifecycle tests: issue, consume and reap against in-memory stores

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use chrono::{DateTime, Duration, TimeZone, Utc};
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};
    use tokio::sync::RwLock;
    use uuid::Uuid;

    use vg_core::services::notification::{
        ChangeKind, ChangeNotifier, Dispatcher, MessageRenderer, OutboundMessage, RenderedMessage,
    };
    use vg_core::{
        ContextKind, ContextLifecycleManager, ContextReaper, ContextRepository, DomainError,
        PurgeTarget, RecordState, Subject, SubjectRepository, SubjectStatus, VerificationContext,
        VerificationOutcome, VerificationProcessor,
    };
    use vg_shared::{ManualClock, ReaperConfig};

    // In-memory context store
    #[derive(Default)]
    struct InMemoryContexts {
        records: RwLock<HashMap<Uuid, VerificationContext>>,
    }

    impl InMemoryContexts {
        async fn count(&self) -> usize {
            self.records.read().await.len()
        }
    }

    #[async_trait]
    impl ContextRepository for InMemoryContexts {
        async fn find_live_by_key(
            &self,
            subject_id: &str,
            context: ContextKind,
        ) -> Result<Option<VerificationContext>, DomainError> {
            Ok(self
                .records
                .read()
                .await
                .values()
                .find(|c| c.is_live() && c.subject_id == subject_id && c.context == context)
                .cloned())
        }

        async fn find_by_token(&self, token: &str) -> Result<Option<VerificationContext>, DomainError> {
            Ok(self
                .records
                .read()
                .await
                .values()
                .find(|c| c.is_live() && c.token == token)
                .cloned())
        }

        async fn create(&self, context: VerificationContext) -> Result<VerificationContext, DomainError> {
            self.records.write().await.insert(context.id, context.clone());
            Ok(context)
        }

        async fn save(&self, context: VerificationContext) -> Result<VerificationContext, DomainError> {
            self.records.write().await.insert(context.id, context.clone());
            Ok(context)
        }

        async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
            Ok(self.records.write().await.remove(&id).is_some())
        }

        async fn tombstone(&self, id: Uuid, at: DateTime<Utc>) -> Result<bool, DomainError> {
            match self.records.write().await.get_mut(&id) {
                Some(record) if record.is_live() => {
                    record.state = RecordState::Tombstoned { at };
                    Ok(true)
                }
                _ => Ok(false),
            }
        }

        async fn list_all(&self, include_tombstoned: bool) -> Result<Vec<VerificationContext>, DomainError> {
            Ok(self
                .records
                .read()
                .await
                .values()
                .filter(|c| include_tombstoned || c.is_live())
                .cloned()
                .collect())
        }

        async fn batch_delete(&self, targets: &[PurgeTarget]) -> Result<u64, DomainError> {
            let mut records = self.records.write().await;
            let mut removed = 0;
            for target in targets {
                if records.get(&target.id).map(|c| &c.token) == Some(&target.token) {
                    records.remove(&target.id);
                    removed += 1;
                }
            }
            Ok(removed)
        }
    }

    // In-memory subject store
    #[derive(Default)]
    struct InMemorySubjects {
        subjects: RwLock<HashMap<String, Subject>>,
    }

    impl InMemorySubjects {
        async fn status(&self, key: &str) -> Option<SubjectStatus> {
            self.subjects.read().await.get(key).map(|s| s.status)
        }
    }

    #[async_trait]
    impl SubjectRepository for InMemorySubjects {
        async fn find_by_subject_key(&self, key: &str) -> Result<Option<Subject>, DomainError> {
            Ok(self.subjects.read().await.get(key).cloned())
        }

        async fn save(&self, subject: Subject) -> Result<Subject, DomainError> {
            self.subjects
                .write()
                .await
                .insert(subject.subject_key.clone(), subject.clone());
            Ok(subject)
        }
    }

    struct PlainRenderer;

    #[async_trait]
    impl MessageRenderer for PlainRenderer {
        async fn render(
            &self,
            kind: ContextKind,
            _subject: &Subject,
            token: &str,
        ) -> Result<RenderedMessage, DomainError> {
            Ok(RenderedMessage {
                subject: kind.to_string(),
                html_body: token.to_string(),
                text_body: token.to_string(),
            })
        }
    }

    #[derive(Default)]
    struct Outbox {
        messages: Mutex<Vec<OutboundMessage>>,
    }

    #[async_trait]
    impl Dispatcher for Outbox {
        async fn send(&self, message: &OutboundMessage) -> Result<String, DomainError> {
            self.messages.lock().unwrap().push(message.clone());
            Ok(Uuid::new_v4().to_string())
        }

        fn provider_name(&self) -> &str {
            "outbox"
        }
    }

    #[derive(Default)]
    struct Changes {
        updates: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl ChangeNotifier for Changes {
        async fn notify(&self, subject: &Subject, _change: ChangeKind) {
            self.updates.lock().unwrap().push(subject.subject_key.clone());
        }
    }

    struct World {
        contexts: Arc<InMemoryContexts>,
        subjects: Arc<InMemorySubjects>,
        outbox: Arc<Outbox>,
        changes: Arc<Changes>,
        clock: Arc<ManualClock>,
        manager: ContextLifecycleManager<InMemoryContexts, InMemorySubjects, PlainRenderer, Outbox>,
        processor: VerificationProcessor<InMemoryContexts, InMemorySubjects, Changes>,
        reaper: Arc<ContextReaper<InMemoryContexts>>,
    }

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 6, 18, 0, 0).unwrap()
    }

    async fn world(subject: &Subject) -> World {
        let contexts = Arc::new(InMemoryContexts::default());
        let subjects = Arc::new(InMemorySubjects::default());
        subjects.save(subject.clone()).await.unwrap();
        let outbox = Arc::new(Outbox::default());
        let changes = Arc::new(Changes::default());
        let clock = Arc::new(ManualClock::new(t0()));

        let manager = ContextLifecycleManager::new(
            contexts.clone(),
            subjects.clone(),
            Arc::new(PlainRenderer),
            outbox.clone(),
        )
        .with_clock(clock.clone());
        let processor = VerificationProcessor::new(contexts.clone(), subjects.clone(), changes.clone())
            .with_clock(clock.clone());
        let reaper = Arc::new(
            ContextReaper::new(contexts.clone(), ReaperConfig::default()).with_clock(clock.clone()),
        );

        World {
            contexts,
            subjects,
            outbox,
            changes,
            clock,
            manager,
            processor,
            reaper,
        }
    }

    fn applicant() -> Subject {
        Subject::new("441100", "buck", "buck@example.com").with_name("Buck", "Deer")
    }

    #[tokio::test]
    async fn test_signup_then_rsvp_scenario() {
        let subject = applicant();
        let w = world(&subject).await;

        // Signup at T, verified at T+23h
        let signup = w
            .manager
            .issue_or_refresh(&subject, ContextKind::Signup)
            .await
            .unwrap();
        w.clock.advance(Duration::hours(23));
        assert_eq!(
            w.processor.consume(&signup.token).await,
            VerificationOutcome::success(ContextKind::Signup)
        );
        assert_eq!(w.subjects.status("441100").await, Some(SubjectStatus::Registering));
        assert_eq!(w.processor.consume(&signup.token).await, VerificationOutcome::invalid());

        // RSVP issued now, followed too late
        let rsvp = w
            .manager
            .issue_or_refresh(&subject, ContextKind::Rsvp)
            .await
            .unwrap();
        w.clock.advance(Duration::hours(121));
        assert_eq!(
            w.processor.consume(&rsvp.token).await,
            VerificationOutcome::expired(ContextKind::Rsvp)
        );
        assert_eq!(w.subjects.status("441100").await, Some(SubjectStatus::Registering));
        assert_eq!(w.outbox.messages.lock().unwrap().len(), 2);
        assert_eq!(w.changes.updates.lock().unwrap().len(), 1);

        // The reaper clears the stale RSVP
        let report = w.reaper.sweep().await.unwrap();
        assert_eq!(report.expired, 1);
        assert_eq!(w.contexts.count().await, 0);
    }

    #[tokio::test]
    async fn test_reissue_invalidates_old_link() {
        let subject = applicant();
        let w = world(&subject).await;

        let first = w
            .manager
            .issue_or_refresh(&subject, ContextKind::Rsvp)
            .await
            .unwrap();
        let second = w
            .manager
            .issue_or_refresh(&subject, ContextKind::Rsvp)
            .await
            .unwrap();

        assert_eq!(w.contexts.count().await, 1);
        assert_eq!(w.processor.consume(&first.token).await, VerificationOutcome::invalid());
        assert_eq!(
            w.processor.consume(&second.token).await,
            VerificationOutcome::success(ContextKind::Rsvp)
        );
        assert_eq!(w.subjects.status("441100").await, Some(SubjectStatus::Accepted));
    }

    #[tokio::test]
    async fn test_reaper_removes_only_expired_and_tombstoned() {
        let subject = applicant();
        let w = world(&subject).await;

        let signup = w
            .manager
            .issue_or_refresh(&subject, ContextKind::Signup)
            .await
            .unwrap();
        let rsvp = w
            .manager
            .issue_or_refresh(&subject, ContextKind::Rsvp)
            .await
            .unwrap();
        w.manager
            .issue_or_refresh(&subject, ContextKind::Rejection)
            .await
            .unwrap();
        assert!(w.manager.revoke("441100", ContextKind::Rsvp).await.unwrap());
        assert_eq!(w.processor.consume(&rsvp.token).await, VerificationOutcome::invalid());

        let report = w.reaper.sweep().await.unwrap();

        assert_eq!(report.purged, 2);
        assert_eq!(report.tombstoned, 1);
        assert_eq!(report.expired, 1);
        let remaining = w.contexts.list_all(true).await.unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].id, signup.context_id);
    }
}
