use serde::Serialize;
use serde_json::{Map, Value};

/// Severity used when emitting a structured line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Info,
    Warn,
    Error,
}

impl LogLevel {
    /// Resolve a free-form level label, falling back to `Info`
    pub fn from_label(label: &str) -> Self {
        match label.to_lowercase().as_str() {
            "error" => LogLevel::Error,
            "warning" | "warn" => LogLevel::Warn,
            _ => LogLevel::Info,
        }
    }
}

/// One structured log record, serialized as a flat JSON object
#[derive(Debug, Clone, Serialize)]
#[serde(transparent)]
pub struct LogEntry {
    record: Map<String, Value>,
}

impl LogEntry {
    /// Build an entry stamped with the current time.
    ///
    /// `fields` is merged into the top level when it is a JSON object; any
    /// other value is kept under a `data` key. `timestamp`, `level` and
    /// `message` always win over caller fields of the same name.
    pub fn new(level: &str, message: &str, fields: Value) -> Self {
        let mut record = match fields {
            Value::Object(map) => map,
            Value::Null => Map::new(),
            other => {
                let mut map = Map::new();
                map.insert("data".to_string(), other);
                map
            }
        };

        record.insert(
            "timestamp".to_string(),
            Value::String(chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Micros, true)),
        );
        record.insert("level".to_string(), Value::String(level.to_uppercase()));
        record.insert("message".to_string(), Value::String(message.to_string()));

        Self { record }
    }
}
