//! Type definitions for metrics snapshots and alerts

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;

/// One observed request, as kept in the bounded request log
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RequestLogEntry {
    pub timestamp: DateTime<Utc>,
    /// "METHOD PATH"
    pub endpoint: String,
    pub duration_ms: f64,
    pub success: bool,
    pub tokens: u64,
    pub cost_usd: f64,
    pub error: Option<String>,
    /// Caller-supplied metadata; always a JSON object
    pub metadata: serde_json::Value,
    /// Copied out of `metadata` for cheap filtering
    pub user_id: Option<String>,
}

/// Aggregates for one endpoint
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EndpointSummary {
    pub total_requests: u64,
    pub total_errors: u64,
    pub success_rate_pct: f64,
    pub avg_duration_ms: f64,
    pub total_tokens: u64,
    pub total_cost_usd: f64,
    pub unique_users: usize,
}

/// Activity of one user
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserSummary {
    pub add_count: u64,
    pub search_count: u64,
    pub update_count: u64,
    pub delete_count: u64,
    pub total_tokens: u64,
    pub total_cost_usd: f64,
    pub first_seen: Option<DateTime<Utc>>,
    pub last_seen: Option<DateTime<Utc>>,
}

/// Token and cost totals across all endpoints
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct UsageTotals {
    pub total_cost_usd: f64,
    pub total_tokens: u64,
}

/// Point-in-time view of everything the collector aggregates
#[derive(Debug, Clone, Serialize)]
pub struct MetricsSnapshot {
    pub summary: BTreeMap<String, EndpointSummary>,
    pub user_activity: BTreeMap<String, UserSummary>,
    pub total_unique_users: usize,
    pub recent_user_requests: Vec<RequestLogEntry>,
    /// Same content as `recent_user_requests`, kept for older dashboards
    pub recent_requests: Vec<RequestLogEntry>,
    pub model_usage: UsageTotals,
    /// Same content as `model_usage`, kept for older dashboards
    pub openai_costs: UsageTotals,
}

impl MetricsSnapshot {
    /// Requests observed across all endpoints
    pub fn total_requests(&self) -> u64 {
        self.summary.values().map(|s| s.total_requests).sum()
    }

    /// Failed requests across all endpoints
    pub fn total_errors(&self) -> u64 {
        self.summary.values().map(|s| s.total_errors).sum()
    }
}

/// Alert categories raised by threshold evaluation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertKind {
    HighErrorRate,
    SlowResponse,
    HighCost,
}

impl std::fmt::Display for AlertKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AlertKind::HighErrorRate => write!(f, "high_error_rate"),
            AlertKind::SlowResponse => write!(f, "slow_response"),
            AlertKind::HighCost => write!(f, "high_cost"),
        }
    }
}

/// Alert severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertSeverity {
    Medium,
    High,
}

impl std::fmt::Display for AlertSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AlertSeverity::Medium => write!(f, "MEDIUM"),
            AlertSeverity::High => write!(f, "HIGH"),
        }
    }
}

/// A threshold crossing found by `check_alert_conditions`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlertCondition {
    #[serde(rename = "type")]
    pub kind: AlertKind,
    pub endpoint: String,
    /// Measured value, rounded to two decimals
    pub value: f64,
    pub threshold: f64,
    pub severity: AlertSeverity,
}

/// An alert stored by the alert manager
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Alert {
    #[serde(flatten)]
    pub condition: AlertCondition,
    pub timestamp: DateTime<Utc>,
    pub acknowledged: bool,
}
