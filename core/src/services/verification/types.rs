//! Verification outcome types

use serde::{Serialize, Serializer};

use crate::domain::entities::ContextKind;

/// Status reported for a consumed token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum VerificationStatus {
    Success,
    Invalid,
    Expired,
    /// Operational failure; details are in the logs only
    Fault,
}

/// Context reported alongside the status
///
/// Serializes as the kind's name, or `"invalid"` when no record was usable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutcomeContext {
    Kind(ContextKind),
    Invalid,
}

impl Serialize for OutcomeContext {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            OutcomeContext::Kind(kind) => serializer.serialize_str(kind.as_str()),
            OutcomeContext::Invalid => serializer.serialize_str("invalid"),
        }
    }
}

/// Result of [`super::VerificationProcessor::consume`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct VerificationOutcome {
    pub status: VerificationStatus,
    pub context: OutcomeContext,
}

impl VerificationOutcome {
    pub fn success(kind: ContextKind) -> Self {
        Self {
            status: VerificationStatus::Success,
            context: OutcomeContext::Kind(kind),
        }
    }

    pub fn expired(kind: ContextKind) -> Self {
        Self {
            status: VerificationStatus::Expired,
            context: OutcomeContext::Kind(kind),
        }
    }

    pub fn invalid() -> Self {
        Self {
            status: VerificationStatus::Invalid,
            context: OutcomeContext::Invalid,
        }
    }

    pub fn fault() -> Self {
        Self {
            status: VerificationStatus::Fault,
            context: OutcomeContext::Invalid,
        }
    }

    pub fn is_fault(&self) -> bool {
        self.status == VerificationStatus::Fault
    }

    /// HTTP status a transport layer should answer with
    ///
    /// Invalid and expired tokens are ordinary answers (200); only faults map to 500.
    pub fn http_status_hint(&self) -> u16 {
        if self.is_fault() {
            500
        } else {
            200
        }
    }
}
