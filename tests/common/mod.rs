//! Common test utilities for memgate

pub mod fixtures;

pub use fixtures::{RecordFactory, TestApp};
