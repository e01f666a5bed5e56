//! Email Service Module
//!
//! Outbound delivery and provider-hosted templates for verification mail.
//!
//! ## Features
//!
//! - **Brevo**: transactional send and SMTP template listing
//! - **Mock Implementation**: logs instead of sending, for development
//! - **Static templates**: built-in RSVP and rejection bodies when no provider is configured
//! - **Security**: recipient addresses are masked in logs

pub mod brevo;
pub mod mock_email;
pub mod templates;

pub use brevo::BrevoDispatcher;
pub use mock_email::MockDispatcher;
pub use templates::{BrevoTemplateSource, StaticTemplateSource};

use vg_core::services::notification::{Dispatcher, TemplateSource};
use vg_shared::{EmailConfig, VerificationConfig};

#[cfg(test)]
mod tests;

/// Create a dispatcher based on configuration
///
/// Unknown providers and a Brevo setup that cannot be initialised both fall
/// back to the mock dispatcher.
pub fn create_dispatcher(config: &EmailConfig) -> Box<dyn Dispatcher> {
    match config.provider.as_str() {
        "mock" => Box::new(MockDispatcher::new()),
        "brevo" => match BrevoDispatcher::new(config.clone()) {
            Ok(dispatcher) => Box::new(dispatcher),
            Err(e) => {
                tracing::error!("Failed to initialize Brevo dispatcher: {}", e);
                tracing::warn!("Falling back to mock email dispatcher");
                Box::new(MockDispatcher::new())
            }
        },
        _ => {
            tracing::warn!(
                "Unknown email provider '{}', using mock implementation",
                config.provider
            );
            Box::new(MockDispatcher::new())
        }
    }
}

/// Create the template source matching the configured provider
pub fn create_template_source(
    email: &EmailConfig,
    verification: &VerificationConfig,
) -> Box<dyn TemplateSource> {
    if email.provider == "brevo" {
        match BrevoTemplateSource::new(email.clone()) {
            Ok(source) => return Box::new(source),
            Err(e) => tracing::warn!("Using built-in templates: {}", e),
        }
    }
    Box::new(StaticTemplateSource::with_defaults(verification))
}
