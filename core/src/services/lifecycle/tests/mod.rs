//! Tests for the lifecycle manager
