//! Reaper: periodic purge of spent, expired and soft-deleted contexts

mod service;

#[cfg(test)]
mod tests;

pub use service::{ContextReaper, SweepReport};
