//! Types returned by the lifecycle manager

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// What happened to the notification after the record was persisted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum NotificationOutcome {
    /// Dispatcher accepted the message
    Sent { message_id: String },
    /// Rendering failed, nothing was dispatched
    RenderFailed { reason: String },
    /// Dispatcher rejected the message
    DeliveryFailed { reason: String },
}

impl NotificationOutcome {
    pub fn is_sent(&self) -> bool {
        matches!(self, NotificationOutcome::Sent { .. })
    }
}

/// Result of issuing or refreshing a verification context
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IssueReport {
    /// Record id, stable across refreshes
    pub context_id: Uuid,
    /// Token now valid for the (subject, kind) pair
    pub token: String,
    /// Stored RFC 3339 expiry
    pub expiry: String,
    /// `true` when an existing live record was overwritten
    pub refreshed: bool,
    pub notification: NotificationOutcome,
}
