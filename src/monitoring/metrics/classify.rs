//! Classification of endpoints into user action counters

/// Memory operations tracked per user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionKind {
    Add,
    Search,
    Update,
    Delete,
}

/// Ordered (substring, action) rules; the first match wins
pub const ACTION_RULES: [(&str, ActionKind); 4] = [
    ("add", ActionKind::Add),
    ("search", ActionKind::Search),
    ("update", ActionKind::Update),
    ("delete", ActionKind::Delete),
];

/// Classify an endpoint key by case-insensitive substring match
pub fn classify_action(endpoint: &str) -> Option<ActionKind> {
    let endpoint = endpoint.to_lowercase();
    ACTION_RULES
        .iter()
        .find(|(needle, _)| endpoint.contains(needle))
        .map(|&(_, action)| action)
}

/// Whether a recorded request is also written out as a log line
pub fn emits_log_line(user_id: Option<&str>, endpoint: &str) -> bool {
    user_id.is_some() || endpoint.to_lowercase().contains("admin")
}
