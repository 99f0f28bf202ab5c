//! Single-line JSON emission through `tracing`

use super::types::{LogEntry, LogLevel};
use serde::Serialize;
use tracing::{error, info, warn};

/// Serialize `value` and emit it as one line at `level`.
///
/// Serialization failures are reported as a warning and swallowed.
pub fn emit_json_line<T: Serialize>(level: LogLevel, value: &T) {
    let line = match serde_json::to_string(value) {
        Ok(line) => line,
        Err(e) => {
            warn!("Failed to serialize structured log entry: {}", e);
            return;
        }
    };

    match level {
        LogLevel::Info => info!(target: "memgate::structured", "{}", line),
        LogLevel::Warn => warn!(target: "memgate::structured", "{}", line),
        LogLevel::Error => error!(target: "memgate::structured", "{}", line),
    }
}

/// Log a structured message with arbitrary key/value fields
///
/// ```rust
/// use memgate::utils::logging::log_structured;
///
/// log_structured("info", "Incoming POST request", serde_json::json!({
///     "path": "/v1/memories/add",
///     "user_id": "riley_123",
/// }));
/// ```
pub fn log_structured(level: &str, message: &str, fields: serde_json::Value) {
    let entry = LogEntry::new(level, message, fields);
    emit_json_line(LogLevel::from_label(level), &entry);
}
