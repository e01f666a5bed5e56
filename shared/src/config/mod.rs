//! Configuration module
//!
//! - `database` - MySQL connection pool configuration
//! - `email` - outbound email provider credentials
//! - `environment` - environment detection and logging configuration
//! - `verification` - verification links, template ids and the reaper schedule

pub mod database;
pub mod email;
pub mod environment;
pub mod verification;

use serde::{Deserialize, Serialize};
use std::str::FromStr;

// Re-export commonly used types
pub use database::DatabaseConfig;
pub use email::EmailConfig;
pub use environment::{Environment, LogFormat, LoggingConfig};
pub use verification::{ReaperConfig, VerificationConfig};

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AppConfig {
    /// Environment configuration
    pub environment: Environment,

    /// Database configuration
    pub database: DatabaseConfig,

    /// Email provider configuration
    pub email: EmailConfig,

    /// Verification flow configuration
    pub verification: VerificationConfig,

    /// Reaper schedule
    pub reaper: ReaperConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from environment
    pub fn from_env() -> Self {
        let environment = Environment::from_env();
        Self {
            environment,
            database: DatabaseConfig::from_env(),
            email: EmailConfig::from_env(),
            verification: VerificationConfig::from_env(),
            reaper: ReaperConfig::from_env(),
            logging: LoggingConfig::from_env(environment),
        }
    }
}

/// Read and parse an environment variable, falling back to `default`
pub(crate) fn env_or<T: FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|value| value.trim().parse().ok())
        .unwrap_or(default)
}
