//! Configuration data models
//!
//! This module defines all configuration structures used throughout the gateway.

pub mod gateway;
pub mod monitoring;
pub mod server;
pub mod upstream;

// Re-export all configuration types
pub use gateway::*;
pub use monitoring::*;
pub use server::*;
pub use upstream::*;

/// Default values for configuration
pub fn default_host() -> String {
    "0.0.0.0".to_string()
}

/// Default server port
pub fn default_port() -> u16 {
    8000
}

/// Default timeout in seconds
pub fn default_timeout() -> u64 {
    30
}

pub(crate) fn default_true() -> bool {
    true
}
