//! Test fixtures and data factories

use memgate::config::Config;
use memgate::monitoring::RequestRecord;
use memgate::server::AppState;
use memgate::PricingTable;
use serde_json::json;
use std::time::Duration;

/// Factory for request records
pub struct RecordFactory;

impl RecordFactory {
    /// A quick successful request
    pub fn ok(endpoint: &str) -> RequestRecord {
        RequestRecord::new(endpoint, Duration::from_millis(25), true)
    }

    /// A quick failed request
    pub fn failed(endpoint: &str, error: &str) -> RequestRecord {
        RequestRecord::new(endpoint, Duration::from_millis(25), false).with_error(error)
    }

    /// A successful request attributed to `user_id`
    pub fn for_user(endpoint: &str, user_id: &str) -> RequestRecord {
        Self::ok(endpoint).with_metadata(json!({ "user_id": user_id }))
    }
}

/// Builder for application state used by HTTP tests
pub struct TestApp {
    config: Config,
}

impl Default for TestApp {
    fn default() -> Self {
        Self::new()
    }
}

impl TestApp {
    /// Default configuration with no upstream
    pub fn new() -> Self {
        Self {
            config: Config::default(),
        }
    }

    /// Forward memory routes to `base_url`
    pub fn with_upstream(mut self, base_url: impl Into<String>) -> Self {
        self.config.gateway.upstream.base_url = Some(base_url.into());
        self.config.gateway.upstream.timeout = 5;
        self
    }

    /// Turn request observation on or off
    pub fn with_monitoring(mut self, enabled: bool) -> Self {
        self.config.gateway.monitoring.enabled = enabled;
        self
    }

    /// Lower the alerting sample floor
    pub fn with_min_samples(mut self, min_samples: u64) -> Self {
        self.config.gateway.monitoring.alerting.min_samples = min_samples;
        self
    }

    /// Build the shared state
    pub fn state(self) -> AppState {
        AppState::new(self.config, PricingTable::default()).expect("test state")
    }
}
