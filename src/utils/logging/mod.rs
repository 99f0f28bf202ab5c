//! Structured logging utilities
//!
//! Every line emitted here is a single JSON object, so downstream log
//! shippers can parse request and alert records without a custom format.

mod structured;
mod types;

pub use structured::{emit_json_line, log_structured};
pub use types::{LogEntry, LogLevel};
