//! Purpose tags for verification contexts and the policy attached to each.

use chrono::Duration;
use serde::{Deserialize, Serialize};

use super::subject::SubjectStatus;

/// Hours a signup (email confirmation) token stays valid
pub const SIGNUP_EXPIRY_HOURS: i64 = 24;

/// Hours an RSVP token stays valid (5 days)
pub const RSVP_EXPIRY_HOURS: i64 = 120;

/// Which flow issued a verification context
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContextKind {
    /// Email confirmation after account creation
    Signup,
    /// Invitation to confirm attendance
    Rsvp,
    /// Rejection notice; carries no actionable token lifetime
    Rejection,
}

/// Expiry offset and pending status selected for a context kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContextPolicy {
    /// Offset from issuance to expiry
    pub validity: Duration,
    /// Status applied to the subject on successful verification
    pub pending_status: Option<SubjectStatus>,
}

impl ContextKind {
    /// All kinds, in issuance order of a typical applicant
    pub const ALL: [ContextKind; 3] = [ContextKind::Signup, ContextKind::Rsvp, ContextKind::Rejection];

    /// Wire/storage name
    pub fn as_str(&self) -> &'static str {
        match self {
            ContextKind::Signup => "signup",
            ContextKind::Rsvp => "rsvp",
            ContextKind::Rejection => "rejection",
        }
    }

    /// Expiry offset and status transition for this kind
    pub fn policy(&self) -> ContextPolicy {
        match self {
            ContextKind::Signup => ContextPolicy {
                validity: Duration::hours(SIGNUP_EXPIRY_HOURS),
                pending_status: Some(SubjectStatus::Registering),
            },
            ContextKind::Rsvp => ContextPolicy {
                validity: Duration::hours(RSVP_EXPIRY_HOURS),
                pending_status: Some(SubjectStatus::Accepted),
            },
            // Zero validity: the record exists for history, the token is never meant to verify
            ContextKind::Rejection => ContextPolicy {
                validity: Duration::zero(),
                pending_status: None,
            },
        }
    }
}

impl std::fmt::Display for ContextKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ContextKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "signup" => Ok(ContextKind::Signup),
            "rsvp" => Ok(ContextKind::Rsvp),
            "rejection" => Ok(ContextKind::Rejection),
            _ => Err(format!("invalid context given: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policies() {
        let signup = ContextKind::Signup.policy();
        assert_eq!(signup.validity, Duration::hours(24));
        assert_eq!(signup.pending_status, Some(SubjectStatus::Registering));

        let rsvp = ContextKind::Rsvp.policy();
        assert_eq!(rsvp.validity, Duration::hours(120));
        assert_eq!(rsvp.pending_status, Some(SubjectStatus::Accepted));

        let rejection = ContextKind::Rejection.policy();
        assert_eq!(rejection.validity, Duration::zero());
        assert_eq!(rejection.pending_status, None);
    }

    #[test]
    fn test_string_forms() {
        for kind in ContextKind::ALL {
            assert_eq!(kind.as_str().parse::<ContextKind>().unwrap(), kind);
        }
        assert!("invalid".parse::<ContextKind>().is_err());
        assert_eq!(serde_json::to_string(&ContextKind::Rsvp).unwrap(), "\"rsvp\"");
    }
}
