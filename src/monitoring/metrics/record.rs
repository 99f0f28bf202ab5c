//! Input to `MetricsCollector::record_request`

use serde_json::Value;
use std::time::Duration;

/// One completed request to be metered
#[derive(Debug, Clone)]
pub struct RequestRecord {
    /// "METHOD PATH"
    pub endpoint: String,
    pub duration: Duration,
    pub success: bool,
    pub tokens: u64,
    /// Estimated cost in USD
    pub cost: f64,
    pub error: Option<String>,
    /// Expected to be a JSON object; anything else is treated as absent
    pub metadata: Option<Value>,
}

impl RequestRecord {
    /// Create a record with no tokens, cost, error or metadata
    pub fn new(endpoint: impl Into<String>, duration: Duration, success: bool) -> Self {
        Self {
            endpoint: endpoint.into(),
            duration,
            success,
            tokens: 0,
            cost: 0.0,
            error: None,
            metadata: None,
        }
    }

    /// Set token usage
    pub fn with_tokens(mut self, tokens: u64) -> Self {
        self.tokens = tokens;
        self
    }

    /// Set cost
    pub fn with_cost(mut self, cost: f64) -> Self {
        self.cost = cost;
        self
    }

    /// Set the error message
    pub fn with_error(mut self, error: impl Into<String>) -> Self {
        self.error = Some(error.into());
        self
    }

    /// Set metadata
    pub fn with_metadata(mut self, metadata: Value) -> Self {
        self.metadata = Some(metadata);
        self
    }
}
