//! # Infrastructure Layer
//!
//! Concrete implementations of the traits declared by `vg_core`:
//!
//! - **Database**: MySQL context and subject stores using SQLx
//! - **Email**: Brevo dispatcher and template source, plus a logging mock
//! - **Sync**: queue-backed change notifier for downstream subscribers
//! - **Services**: wiring the core services onto these implementations
//!
//! ## Features
//!
//! - `mysql`: Enable MySQL database support (default)

use vg_core::errors::DomainError;

/// Database module - MySQL implementations using SQLx
#[cfg(feature = "mysql")]
pub mod database;

/// Email module - outbound delivery and provider templates
pub mod email;

/// Change notification for downstream subsystems
pub mod sync;

/// Service wiring
#[cfg(feature = "mysql")]
pub mod services;

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database connection or query error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// HTTP request error for external services
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Email provider rejected or failed a request
    #[error("Email service error: {0}")]
    Email(String),
}

impl From<InfrastructureError> for DomainError {
    fn from(err: InfrastructureError) -> Self {
        match err {
            InfrastructureError::Database(e) => DomainError::persistence(e.to_string()),
            InfrastructureError::Http(e) => DomainError::Delivery {
                message: e.to_string(),
            },
            InfrastructureError::Email(message) => DomainError::Delivery { message },
            InfrastructureError::Config(message) => DomainError::Internal { message },
        }
    }
}
