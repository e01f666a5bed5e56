//! Tests for templates and rendering
