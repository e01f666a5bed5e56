//! Verification flow configuration: links, templates and the reaper schedule

use serde::{Deserialize, Serialize};

use super::env_or;

/// Settings used when rendering verification notifications
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct VerificationConfig {
    /// Page the verification link points at; the token is appended as `?code=`
    pub verify_base_url: String,
    /// Provider template id for RSVP invitations
    pub rsvp_template_id: i64,
    /// Provider template id for rejection notices
    pub rejection_template_id: i64,
    /// How long fetched templates are served from cache
    pub template_cache_ttl_seconds: u64,
}

impl Default for VerificationConfig {
    fn default() -> Self {
        Self {
            verify_base_url: String::from("https://deerhacks.ca/verify"),
            rsvp_template_id: 1,
            rejection_template_id: 2,
            template_cache_ttl_seconds: 900,
        }
    }
}

impl VerificationConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            verify_base_url: std::env::var("VERIFY_BASE_URL").unwrap_or(defaults.verify_base_url),
            rsvp_template_id: env_or("RSVP_TEMPLATE_ID", defaults.rsvp_template_id),
            rejection_template_id: env_or("REJECTION_TEMPLATE_ID", defaults.rejection_template_id),
            template_cache_ttl_seconds: env_or(
                "TEMPLATE_CACHE_TTL_SECONDS",
                defaults.template_cache_ttl_seconds,
            ),
        }
    }

    /// Set the verification page URL
    pub fn with_verify_base_url(mut self, url: impl Into<String>) -> Self {
        self.verify_base_url = url.into();
        self
    }

    /// Set the RSVP and rejection template ids
    pub fn with_template_ids(mut self, rsvp: i64, rejection: i64) -> Self {
        self.rsvp_template_id = rsvp;
        self.rejection_template_id = rejection;
        self
    }
}

/// Schedule for the expired-record sweep
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ReaperConfig {
    /// How often to sweep (in seconds)
    pub interval_seconds: u64,
    /// Whether the background sweep runs at all
    pub enabled: bool,
}

impl Default for ReaperConfig {
    fn default() -> Self {
        Self {
            interval_seconds: 3600, // Run every hour
            enabled: true,
        }
    }
}

impl ReaperConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            interval_seconds: env_or("REAPER_INTERVAL_SECONDS", defaults.interval_seconds).max(1),
            enabled: env_or("REAPER_ENABLED", defaults.enabled),
        }
    }

    /// Set the sweep interval; zero is clamped to one second
    pub fn with_interval(mut self, seconds: u64) -> Self {
        self.interval_seconds = seconds.max(1);
        self
    }

    /// Turn the background sweep off
    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }
}
