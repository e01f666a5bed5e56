//! Business services implementing the token lifecycle.

pub mod lifecycle;
pub mod notification;
pub mod reaper;
pub mod verification;

// Re-export commonly used types
pub use lifecycle::{ContextLifecycleManager, IssueReport, NotificationOutcome};
pub use notification::{
    CachedTemplateProvider, ChangeKind, ChangeNotifier, Dispatcher, MessageRenderer,
    OutboundMessage, RenderedMessage, TemplateCacheConfig, TemplateMessageRenderer,
    TemplateProvider, TemplateSource,
};
pub use reaper::{ContextReaper, SweepReport};
pub use verification::{
    OutcomeContext, VerificationOutcome, VerificationProcessor, VerificationStatus,
};
