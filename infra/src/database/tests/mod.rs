//! Tests for the database module

mod connection_tests;
