//! Tests for the session manager

mod mocks;
