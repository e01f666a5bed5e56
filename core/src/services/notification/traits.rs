//! Collaborator traits for rendering, delivery, downstream sync and templates

use async_trait::async_trait;

use crate::domain::entities::{ContextKind, Subject, Template};
use crate::errors::DomainError;

use super::types::{ChangeKind, OutboundMessage, RenderedMessage};

/// Produces the subject line and bodies for a verification notification
#[async_trait]
pub trait MessageRenderer: Send + Sync {
    /// Render the notification for `kind`, addressed to `subject`, carrying `token`
    async fn render(
        &self,
        kind: ContextKind,
        subject: &Subject,
        token: &str,
    ) -> Result<RenderedMessage, DomainError>;
}

/// Delivers rendered messages
///
/// Fire-and-forget from the core's perspective: errors are logged by the
/// caller, never retried.
#[async_trait]
pub trait Dispatcher: Send + Sync {
    /// Send a message, returning the provider's message id
    async fn send(&self, message: &OutboundMessage) -> Result<String, DomainError>;

    /// Provider name for logs
    fn provider_name(&self) -> &str;
}

#[async_trait]
impl<T: Dispatcher + ?Sized> Dispatcher for Box<T> {
    async fn send(&self, message: &OutboundMessage) -> Result<String, DomainError> {
        (**self).send(message).await
    }

    fn provider_name(&self) -> &str {
        (**self).provider_name()
    }
}

/// Informs other subsystems that a subject changed
///
/// Delivery guarantees are the notifier's responsibility.
#[async_trait]
pub trait ChangeNotifier: Send + Sync {
    async fn notify(&self, subject: &Subject, change: ChangeKind);
}

/// Template lookup by id
#[async_trait]
pub trait TemplateProvider: Send + Sync {
    /// Fetch a template by provider id
    async fn get_by_id(&self, id: i64) -> Result<Template, DomainError>;

    /// Drop anything cached so the next lookup refetches
    async fn invalidate(&self);
}

/// Upstream source of templates (the email provider's template list)
#[async_trait]
pub trait TemplateSource: Send + Sync {
    async fn fetch_all(&self) -> Result<Vec<Template>, DomainError>;
}

#[async_trait]
impl<T: TemplateSource + ?Sized> TemplateSource for Box<T> {
    async fn fetch_all(&self) -> Result<Vec<Template>, DomainError> {
        (**self).fetch_all().await
    }
}
