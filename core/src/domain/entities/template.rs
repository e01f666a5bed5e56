//! Email template fetched from the provider.

use serde::{Deserialize, Serialize};

/// Provider-hosted email template
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Template {
    /// Provider template id
    pub id: i64,
    /// Subject line configured on the template
    pub subject: String,
    /// HTML body, possibly entity-escaped by the provider
    pub html_content: String,
}

impl Template {
    pub fn new(id: i64, subject: impl Into<String>, html_content: impl Into<String>) -> Self {
        Self {
            id,
            subject: subject.into(),
            html_content: html_content.into(),
        }
    }
}
