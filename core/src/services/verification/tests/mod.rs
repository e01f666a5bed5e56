//! Tests for the verification processor

#[cfg(test)]
pub mod mocks;
