//! Outbound email provider configuration

use serde::{Deserialize, Serialize};

/// Email delivery configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EmailConfig {
    /// Provider name ("brevo" or "mock")
    pub provider: String,
    /// Provider API key
    #[serde(skip_serializing)]
    pub api_key: String,
    /// Provider API base URL
    pub api_base: String,
    /// Sender address shown to recipients
    pub sender_email: String,
    /// Sender display name
    pub sender_name: String,
    /// Request timeout in seconds
    pub request_timeout_secs: u64,
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            provider: String::from("mock"),
            api_key: String::new(),
            api_base: String::from("https://api.brevo.com/v3"),
            sender_email: String::from("no-reply@deerhacks.ca"),
            sender_name: String::from("DeerHacks"),
            request_timeout_secs: 30,
        }
    }
}

impl EmailConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            provider: std::env::var("EMAIL_PROVIDER").unwrap_or(defaults.provider),
            api_key: std::env::var("BREVO_API_KEY").unwrap_or_default(),
            api_base: std::env::var("BREVO_API_BASE").unwrap_or(defaults.api_base),
            sender_email: std::env::var("BREVO_SENDER_EMAIL").unwrap_or(defaults.sender_email),
            sender_name: std::env::var("BREVO_SENDER_NAME").unwrap_or(defaults.sender_name),
            request_timeout_secs: super::env_or(
                "BREVO_REQUEST_TIMEOUT_SECS",
                defaults.request_timeout_secs,
            ),
        }
    }

    /// Whether enough is configured to talk to the provider
    pub fn has_credentials(&self) -> bool {
        !self.api_key.trim().is_empty() && !self.sender_email.trim().is_empty()
    }
}
