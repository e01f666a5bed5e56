//! Message types passed between the lifecycle manager and its collaborators

use serde::{Deserialize, Serialize};

use crate::domain::entities::Subject;

/// Rendered notification content
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderedMessage {
    pub subject: String,
    pub html_body: String,
    pub text_body: String,
}

/// A rendered message with its recipient
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutboundMessage {
    pub recipient_address: String,
    pub recipient_name: String,
    pub subject: String,
    pub html_body: String,
    pub text_body: String,
}

impl OutboundMessage {
    /// Address a rendered message to a subject
    pub fn for_subject(subject: &Subject, rendered: RenderedMessage) -> Self {
        Self {
            recipient_address: subject.email.clone(),
            recipient_name: subject.full_name(),
            subject: rendered.subject,
            html_body: rendered.html_body,
            text_body: rendered.text_body,
        }
    }
}

/// Kind of change reported to downstream subscribers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeKind {
    Update,
    Delete,
}
