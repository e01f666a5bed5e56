//! Verification context entity: one issued token for a (subject, purpose) pair.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use vg_shared::utils::{format_expiry, has_time_passed};
use vg_shared::TimeParseError;

use super::context_kind::ContextKind;
use super::subject::SubjectStatus;

/// Where a record sits in its lifecycle
///
/// `live` -> `tombstoned` -> purged. A purged record no longer exists, so it
/// has no variant here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum RecordState {
    /// Visible to live lookups
    Live,
    /// Soft-deleted; hidden from live lookups and awaiting the reaper
    Tombstoned { at: DateTime<Utc> },
}

/// What the reaper should do with a record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReapDecision {
    Keep,
    PurgeExpired,
    PurgeTombstoned,
    /// The stored expiry cannot be parsed; the token can never verify
    PurgeCorrupt,
}

impl ReapDecision {
    pub fn is_purge(&self) -> bool {
        !matches!(self, ReapDecision::Keep)
    }
}

/// A record as the reaper saw it in its snapshot
///
/// Stores delete a target only while both fields still match, so a record
/// refreshed after the snapshot (same id, new token) survives the sweep.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PurgeTarget {
    pub id: Uuid,
    pub token: String,
}

/// Issued verification token and the transition it gates
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationContext {
    /// Surrogate identifier, immutable
    pub id: Uuid,

    /// Key of the subject this context belongs to
    pub subject_id: String,

    /// Opaque random token, the sole lookup key during verification
    pub token: String,

    /// RFC 3339 expiry timestamp
    pub expiry: String,

    /// Flow that issued this context
    pub context: ContextKind,

    /// Status applied on successful verification, if any
    pub pending_status: Option<SubjectStatus>,

    /// Lifecycle state
    pub state: RecordState,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

impl VerificationContext {
    /// Issue a new live context for `subject_id`, valid per the kind's policy from `now`
    pub fn issue(subject_id: impl Into<String>, context: ContextKind, now: DateTime<Utc>) -> Self {
        let policy = context.policy();
        Self {
            id: Uuid::new_v4(),
            subject_id: subject_id.into(),
            token: Self::generate_token(),
            expiry: format_expiry(now + policy.validity),
            context,
            pending_status: policy.pending_status,
            state: RecordState::Live,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replace the token and expiry in place
    ///
    /// Any link sent for the previous token stops working.
    pub fn refresh(&mut self, now: DateTime<Utc>) {
        let policy = self.context.policy();
        self.token = Self::generate_token();
        self.expiry = format_expiry(now + policy.validity);
        self.pending_status = policy.pending_status;
        self.updated_at = now;
    }

    /// Generate an opaque token
    pub fn generate_token() -> String {
        Uuid::new_v4().to_string()
    }

    /// Whether the stored expiry is at or before `now`
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> Result<bool, TimeParseError> {
        has_time_passed(&self.expiry, now)
    }

    pub fn is_live(&self) -> bool {
        matches!(self.state, RecordState::Live)
    }

    pub fn is_tombstoned(&self) -> bool {
        matches!(self.state, RecordState::Tombstoned { .. })
    }

    /// Soft-delete this record
    pub fn tombstone(&mut self, at: DateTime<Utc>) {
        if self.is_live() {
            self.state = RecordState::Tombstoned { at };
            self.updated_at = at;
        }
    }

    pub fn purge_target(&self) -> PurgeTarget {
        PurgeTarget {
            id: self.id,
            token: self.token.clone(),
        }
    }

    /// Reaper selection predicate: tombstoned OR expired
    pub fn reap_decision(&self, now: DateTime<Utc>) -> ReapDecision {
        if self.is_tombstoned() {
            return ReapDecision::PurgeTombstoned;
        }
        match self.is_expired_at(now) {
            Ok(true) => ReapDecision::PurgeExpired,
            Ok(false) => ReapDecision::Keep,
            Err(_) => ReapDecision::PurgeCorrupt,
        }
    }
}
