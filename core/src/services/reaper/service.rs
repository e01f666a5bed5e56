//! Reaper for periodic removal of expired and tombstoned verification contexts

use serde::Serialize;
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use vg_shared::{Clock, ReaperConfig, SystemClock};

use crate::domain::entities::{PurgeTarget, ReapDecision};
use crate::errors::DomainError;
use crate::repositories::ContextRepository;

/// Service that sweeps the context store
pub struct ContextReaper<R: ContextRepository + 'static> {
    repository: Arc<R>,
    config: ReaperConfig,
    clock: Arc<dyn Clock>,
}

impl<R: ContextRepository> ContextReaper<R> {
    /// Create a new reaper on the system clock
    pub fn new(repository: Arc<R>, config: ReaperConfig) -> Self {
        Self {
            repository,
            config,
            clock: Arc::new(SystemClock),
        }
    }

    /// Replace the clock used to judge expiry
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Run a single sweep
    ///
    /// Takes a snapshot of every record (tombstoned included), selects the
    /// ones [`crate::domain::entities::VerificationContext::reap_decision`]
    /// marks for purging and removes them in one atomic batch. A record
    /// refreshed between the snapshot and the batch keeps its new token.
    ///
    /// # Returns
    /// * `Ok(SweepReport)` - Summary of the sweep
    /// * `Err(DomainError)` - Snapshot or batch failed; nothing was deleted
    pub async fn sweep(&self) -> Result<SweepReport, DomainError> {
        let now = self.clock.now();
        let records = self.repository.list_all(true).await?;

        let mut report = SweepReport {
            scanned: records.len(),
            ..SweepReport::default()
        };
        let mut doomed: Vec<PurgeTarget> = Vec::new();

        for record in &records {
            let decision = record.reap_decision(now);
            match decision {
                ReapDecision::Keep => report.kept += 1,
                ReapDecision::PurgeExpired => report.expired += 1,
                ReapDecision::PurgeTombstoned => report.tombstoned += 1,
                ReapDecision::PurgeCorrupt => {
                    warn!(
                        context_id = %record.id,
                        expiry = %record.expiry,
                        "Purging verification context with unreadable expiry"
                    );
                    report.corrupt += 1;
                }
            }
            if decision.is_purge() {
                doomed.push(record.purge_target());
            }
        }

        if doomed.is_empty() {
            debug!(scanned = report.scanned, "Nothing to reap");
            return Ok(report);
        }

        report.purged = self.repository.batch_delete(&doomed).await?;

        info!(
            "Reaper sweep completed - Scanned: {}, Purged: {}, Expired: {}, Tombstoned: {}, Corrupt: {}",
            report.scanned, report.purged, report.expired, report.tombstoned, report.corrupt
        );

        Ok(report)
    }

    /// Start the reaper as a background task ticking forever
    ///
    /// The first sweep runs one interval after start. Returns `None` when
    /// the reaper is disabled.
    pub fn start_background_task(self: Arc<Self>) -> Option<JoinHandle<()>> {
        if !self.config.enabled {
            warn!("Verification context reaper is disabled");
            return None;
        }

        Some(tokio::spawn(async move {
            info!(
                "Verification context reaper started - will run every {} seconds",
                self.config.interval_seconds
            );

            let mut interval_timer = self.timer();

            loop {
                interval_timer.tick().await;
                self.sweep_logged().await;
            }
        }))
    }

    /// Tick until `shutdown` turns `true` (or its sender is dropped)
    pub async fn run_until(self: Arc<Self>, mut shutdown: watch::Receiver<bool>) {
        if !self.config.enabled {
            warn!("Verification context reaper is disabled");
            return;
        }

        let mut interval_timer = self.timer();

        loop {
            tokio::select! {
                _ = interval_timer.tick() => self.sweep_logged().await,
                changed = shutdown.changed() => {
                    let stop = changed.is_err() || *shutdown.borrow();
                    if stop {
                        info!("Verification context reaper stopping");
                        return;
                    }
                }
            }
        }
    }

    // First sweep one full interval after start, not immediately
    fn timer(&self) -> tokio::time::Interval {
        let period = std::time::Duration::from_secs(self.config.interval_seconds.max(1));
        tokio::time::interval_at(tokio::time::Instant::now() + period, period)
    }

    // Errors never escape; the next tick retries from a fresh snapshot
    async fn sweep_logged(&self) {
        if let Err(e) = self.sweep().await {
            error!("Reaper sweep failed: {}", e);
        }
    }
}

/// Result of a sweep
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct SweepReport {
    /// Records in the snapshot
    pub scanned: usize,
    /// Rows the store reported removed
    pub purged: u64,
    /// Selected because the expiry has passed
    pub expired: usize,
    /// Selected because the record was soft-deleted
    pub tombstoned: usize,
    /// Selected because the expiry could not be parsed
    pub corrupt: usize,
    /// Left in place
    pub kept: usize,
}

impl SweepReport {
    /// Number of records selected for purging
    pub fn selected(&self) -> usize {
        self.expired + self.tombstoned + self.corrupt
    }
}
