//! Integration tests for memgate
//!
//! These tests verify the interaction between multiple components
//! and exercise real system behavior without mocking the core.

pub mod alert_flow_tests;
pub mod config_tests;
pub mod server_tests;
