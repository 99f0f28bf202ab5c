//! Alert history management
//!
//! Alerts are recorded on demand from threshold checks and kept in a bounded
//! history. Nothing is pushed to external channels.

mod manager;

pub use manager::AlertManager;
