//! Verification: consuming tokens and applying the pending status
//!
//! Outcomes are reported as a status plus the context kind, never as an
//! error, so a transport layer can answer without knowing the internals.

mod service;
mod types;

#[cfg(test)]
mod tests;

pub use service::VerificationProcessor;
pub use types::{OutcomeContext, VerificationOutcome, VerificationStatus};
