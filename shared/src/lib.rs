//! Shared utilities and common types for the Verigate workspace
//!
//! This crate provides functionality used across all workspace members:
//! - Configuration types loaded from the environment
//! - The time utility deciding whether a stored expiry has elapsed
//! - Log-safe masking helpers

pub mod config;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, DatabaseConfig, EmailConfig, Environment, LogFormat, LoggingConfig, ReaperConfig,
    VerificationConfig,
};
pub use utils::time::{Clock, ManualClock, SystemClock, TimeParseError};
