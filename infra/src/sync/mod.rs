//! Downstream change notification
//!
//! Verification updates are pushed onto a bounded queue; whichever
//! subsystem mirrors account state (a chat bot, a CRM export) drains it.

mod queue_notifier;

pub use queue_notifier::{log_changes, ChangeEvent, QueueChangeNotifier};
