//! Context lifecycle: issuing and refreshing verification tokens
//!
//! Selects expiry and pending status from the context kind, persists the
//! record, then renders and dispatches the notification.

mod service;
mod types;

#[cfg(test)]
mod tests;

pub use service::ContextLifecycleManager;
pub use types::{IssueReport, NotificationOutcome};
