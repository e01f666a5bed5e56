//! Utility helpers shared across crates

pub mod mask;
pub mod time;

pub use mask::mask_email;
pub use time::{format_expiry, has_time_passed, parse_expiry};
