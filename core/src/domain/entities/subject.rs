//! Subject (account) entity referenced by verification contexts.
//!
//! Subjects are owned by the registration platform; this crate only reads
//! them and writes the `status` field through [`crate::repositories::SubjectRepository`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Registration status of an account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubjectStatus {
    Pending,
    Registering,
    Applied,
    Selected,
    Accepted,
    Rejected,
    Attended,
    Admin,
    Moderator,
    Volunteer,
}

impl SubjectStatus {
    /// Storage name
    pub fn as_str(&self) -> &'static str {
        match self {
            SubjectStatus::Pending => "pending",
            SubjectStatus::Registering => "registering",
            SubjectStatus::Applied => "applied",
            SubjectStatus::Selected => "selected",
            SubjectStatus::Accepted => "accepted",
            SubjectStatus::Rejected => "rejected",
            SubjectStatus::Attended => "attended",
            SubjectStatus::Admin => "admin",
            SubjectStatus::Moderator => "moderator",
            SubjectStatus::Volunteer => "volunteer",
        }
    }
}

impl std::fmt::Display for SubjectStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for SubjectStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(SubjectStatus::Pending),
            "registering" => Ok(SubjectStatus::Registering),
            "applied" => Ok(SubjectStatus::Applied),
            "selected" => Ok(SubjectStatus::Selected),
            "accepted" => Ok(SubjectStatus::Accepted),
            "rejected" => Ok(SubjectStatus::Rejected),
            "attended" => Ok(SubjectStatus::Attended),
            "admin" => Ok(SubjectStatus::Admin),
            "moderator" => Ok(SubjectStatus::Moderator),
            "volunteer" => Ok(SubjectStatus::Volunteer),
            _ => Err(format!("Invalid subject status: {}", s)),
        }
    }
}

/// Account an issued verification context belongs to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subject {
    /// Surrogate identifier
    pub id: Uuid,

    /// External account key contexts are filed under (e.g. a Discord id)
    pub subject_key: String,

    pub username: String,

    pub first_name: String,

    pub last_name: String,

    /// Address notifications are sent to
    pub email: String,

    /// Current registration status
    pub status: SubjectStatus,

    /// Timestamp of the last status change
    pub updated_at: DateTime<Utc>,
}

impl Subject {
    /// Creates a new subject in the `pending` status
    pub fn new(
        subject_key: impl Into<String>,
        username: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            subject_key: subject_key.into(),
            username: username.into(),
            first_name: String::new(),
            last_name: String::new(),
            email: email.into(),
            status: SubjectStatus::Pending,
            updated_at: Utc::now(),
        }
    }

    /// Sets first and last name
    pub fn with_name(mut self, first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        self.first_name = first_name.into();
        self.last_name = last_name.into();
        self
    }

    /// Applies a status transition
    ///
    /// Idempotent: applying the status the subject already has changes
    /// nothing. Returns whether the status actually changed.
    pub fn apply_status(&mut self, status: SubjectStatus, at: DateTime<Utc>) -> bool {
        if self.status == status {
            return false;
        }
        self.status = status;
        self.updated_at = at;
        true
    }

    /// Name used in greetings; falls back to the username
    pub fn display_first_name(&self) -> &str {
        if self.first_name.trim().is_empty() {
            &self.username
        } else {
            &self.first_name
        }
    }

    /// Recipient name for outbound mail
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name).trim().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_new_subject_is_pending() {
        let subject = Subject::new("1234", "deer", "deer@example.com");
        assert_eq!(subject.status, SubjectStatus::Pending);
        assert_eq!(subject.display_first_name(), "deer");
    }

    #[test]
    fn test_apply_status_is_idempotent() {
        let mut subject = Subject::new("1234", "deer", "deer@example.com");
        let first = Utc::now();
        let later = first + Duration::minutes(5);

        assert!(subject.apply_status(SubjectStatus::Registering, first));
        let once = subject.clone();

        assert!(!subject.apply_status(SubjectStatus::Registering, later));
        assert_eq!(subject, once);
        assert_eq!(subject.updated_at, first);
    }

    #[test]
    fn test_names() {
        let subject = Subject::new("1234", "deer", "deer@example.com").with_name("Jane", "Doe");
        assert_eq!(subject.display_first_name(), "Jane");
        assert_eq!(subject.full_name(), "Jane Doe");

        let unnamed = Subject::new("1", "moose", "m@example.com");
        assert_eq!(unnamed.full_name(), "");
    }

    #[test]
    fn test_status_string_forms() {
        assert_eq!("accepted".parse::<SubjectStatus>().unwrap(), SubjectStatus::Accepted);
        assert_eq!(SubjectStatus::Registering.to_string(), "registering");
        assert!("".parse::<SubjectStatus>().is_err());
    }
}
