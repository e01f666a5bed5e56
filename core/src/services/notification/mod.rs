//! Notification collaborators: renderer, dispatcher, change notifier and templates
//!
//! The core never talks to an email provider or a template store directly;
//! it goes through these traits. Infrastructure supplies the implementations.

mod renderer;
mod template_cache;
mod traits;
mod types;

#[cfg(test)]
mod tests;

pub use renderer::{unescape_html, TemplateMessageRenderer};
pub use template_cache::{CachedTemplateProvider, TemplateCacheConfig};
pub use traits::{ChangeNotifier, Dispatcher, MessageRenderer, TemplateProvider, TemplateSource};
pub use types::{ChangeKind, OutboundMessage, RenderedMessage};
