//! Monitoring configuration

use super::*;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Endpoints that never reach the aggregates or the request log
pub const DEFAULT_EXCLUDED_ENDPOINTS: [&str; 4] = [
    "GET /health",
    "GET /health/detailed",
    "GET /metrics",
    "GET /alerts",
];

/// Monitoring configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitoringConfig {
    /// Install the observation middleware and expose `/metrics` and `/alerts`
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Exact "METHOD PATH" keys excluded from metering
    #[serde(default = "default_excluded_endpoints")]
    pub excluded_endpoints: Vec<String>,
    /// Number of request log entries retained
    #[serde(default = "default_request_log_capacity")]
    pub request_log_capacity: usize,
    /// Tail of the request log scanned for user-attributed requests
    #[serde(default = "default_recent_requests_window")]
    pub recent_requests_window: usize,
    /// Recent errors returned alongside active alerts
    #[serde(default = "default_recent_errors_limit")]
    pub recent_errors_limit: usize,
    /// Largest request body buffered to find a `user_id`
    #[serde(default = "default_max_inspected_body_bytes")]
    pub max_inspected_body_bytes: usize,
    /// Alert thresholds
    #[serde(default)]
    pub alerting: AlertingConfig,
    /// Model pricing source
    #[serde(default)]
    pub pricing: PricingConfig,
}

impl Default for MonitoringConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            excluded_endpoints: default_excluded_endpoints(),
            request_log_capacity: default_request_log_capacity(),
            recent_requests_window: default_recent_requests_window(),
            recent_errors_limit: default_recent_errors_limit(),
            max_inspected_body_bytes: default_max_inspected_body_bytes(),
            alerting: AlertingConfig::default(),
            pricing: PricingConfig::default(),
        }
    }
}

impl MonitoringConfig {
    pub(crate) fn validate(&self) -> Result<(), String> {
        if let Some(blank) = self.excluded_endpoints.iter().find(|e| e.trim().is_empty()) {
            return Err(format!("excluded endpoint keys must not be blank: {:?}", blank));
        }
        if self.request_log_capacity == 0 {
            return Err("request_log_capacity must be greater than 0".to_string());
        }
        if self.recent_requests_window == 0 {
            return Err("recent_requests_window must be greater than 0".to_string());
        }
        self.alerting.validate()
    }
}

/// Threshold alerting configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlertingConfig {
    /// Minimum observations before an endpoint is evaluated
    #[serde(default = "default_min_samples")]
    pub min_samples: u64,
    /// Error rate (percent) above which `high_error_rate` fires
    #[serde(default = "default_error_rate_pct")]
    pub error_rate_pct: f64,
    /// Average latency (seconds) above which `slow_response` fires
    #[serde(default = "default_slow_response_secs")]
    pub slow_response_secs: f64,
    /// Cumulative cost (USD) above which `high_cost` fires
    #[serde(default = "default_total_cost_usd")]
    pub total_cost_usd: f64,
    /// Number of recorded alerts retained
    #[serde(default = "default_history_capacity")]
    pub history_capacity: usize,
    /// Suppress repeats of an unacknowledged (type, endpoint) alert recorded
    /// within this many seconds. Zero keeps every alert.
    #[serde(default)]
    pub suppression_window_secs: u64,
}

impl Default for AlertingConfig {
    fn default() -> Self {
        Self {
            min_samples: default_min_samples(),
            error_rate_pct: default_error_rate_pct(),
            slow_response_secs: default_slow_response_secs(),
            total_cost_usd: default_total_cost_usd(),
            history_capacity: default_history_capacity(),
            suppression_window_secs: 0,
        }
    }
}

impl AlertingConfig {
    pub(crate) fn validate(&self) -> Result<(), String> {
        if self.min_samples == 0 {
            return Err("alerting.min_samples must be at least 1".to_string());
        }
        if self.history_capacity == 0 {
            return Err("alerting.history_capacity must be greater than 0".to_string());
        }
        for (name, value) in [
            ("error_rate_pct", self.error_rate_pct),
            ("slow_response_secs", self.slow_response_secs),
            ("total_cost_usd", self.total_cost_usd),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(format!("alerting.{} must be a non-negative number", name));
            }
        }
        Ok(())
    }
}

/// Pricing table source
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PricingConfig {
    /// JSON or YAML pricing table; the built-in table is used when unset
    pub file: Option<PathBuf>,
}

fn default_excluded_endpoints() -> Vec<String> {
    DEFAULT_EXCLUDED_ENDPOINTS
        .iter()
        .map(|e| e.to_string())
        .collect()
}

fn default_request_log_capacity() -> usize {
    1000
}

fn default_recent_requests_window() -> usize {
    50
}

fn default_recent_errors_limit() -> usize {
    10
}

fn default_max_inspected_body_bytes() -> usize {
    256 * 1024
}

fn default_min_samples() -> u64 {
    10
}

fn default_error_rate_pct() -> f64 {
    20.0
}

fn default_slow_response_secs() -> f64 {
    5.0
}

fn default_total_cost_usd() -> f64 {
    1.0
}

fn default_history_capacity() -> usize {
    100
}
