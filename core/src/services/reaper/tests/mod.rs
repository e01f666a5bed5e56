//! Tests for the reaper
