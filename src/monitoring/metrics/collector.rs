//! Metrics collector implementation for recording requests

use super::classify::{classify_action, emits_log_line};
use super::record::RequestRecord;
use super::types::MetricsStorage;
use crate::config::{AlertingConfig, MonitoringConfig};
use crate::monitoring::bounded::BoundedPush;
use crate::monitoring::types::RequestLogEntry;
use crate::utils::logging::{LogLevel, emit_json_line};
use crate::utils::round_to;
use parking_lot::Mutex;
use serde_json::{Map, Value};
use std::collections::HashSet;
use tracing::debug;

/// Thread-safe in-memory aggregation of request observations
#[derive(Debug)]
pub struct MetricsCollector {
    /// Endpoint keys that are never metered
    pub(super) excluded: HashSet<String>,
    /// Maximum request log length
    pub(super) log_capacity: usize,
    /// Log tail scanned for recent user-attributed requests
    pub(super) recent_window: usize,
    /// Thresholds used by `check_alert_conditions`
    pub(super) alerting: AlertingConfig,
    /// All mutable state, behind one lock
    pub(super) storage: Mutex<MetricsStorage>,
}

impl Default for MetricsCollector {
    fn default() -> Self {
        Self::new(&MonitoringConfig::default())
    }
}

impl MetricsCollector {
    /// Create a new metrics collector
    pub fn new(config: &MonitoringConfig) -> Self {
        debug!(
            "Creating metrics collector (log capacity {}, {} excluded endpoints)",
            config.request_log_capacity,
            config.excluded_endpoints.len()
        );

        Self {
            excluded: config.excluded_endpoints.iter().cloned().collect(),
            log_capacity: config.request_log_capacity.max(1),
            recent_window: config.recent_requests_window,
            alerting: config.alerting.clone(),
            storage: Mutex::new(MetricsStorage::default()),
        }
    }

    /// Whether `endpoint` is on the self-monitoring denylist
    #[inline]
    pub fn is_excluded(&self, endpoint: &str) -> bool {
        self.excluded.contains(endpoint)
    }

    /// Record one completed request.
    ///
    /// Denylisted endpoints are ignored. Metadata that is not a JSON object
    /// is treated as absent, and a negative or non-finite cost counts as zero.
    pub fn record_request(&self, record: RequestRecord) {
        if self.is_excluded(&record.endpoint) {
            return;
        }

        let RequestRecord {
            endpoint,
            duration,
            success,
            tokens,
            cost,
            error,
            metadata,
        } = record;

        let metadata = match metadata {
            Some(Value::Object(map)) => map,
            _ => Map::new(),
        };
        let user_id = user_id_from(&metadata);
        let cost = if cost.is_finite() && cost > 0.0 { cost } else { 0.0 };
        let duration_secs = duration.as_secs_f64();
        let action = user_id.as_ref().and_then(|_| classify_action(&endpoint));
        let emit = emits_log_line(user_id.as_deref(), &endpoint);

        let emitted = {
            let mut guard = self.storage.lock();
            let storage = &mut *guard;
            // Stamped under the lock so log order and last_seen agree
            let now = chrono::Utc::now();

            let endpoint_metrics = storage.endpoints.entry(endpoint.clone()).or_default();
            endpoint_metrics.observe(duration_secs, success, tokens, cost);

            if let Some(user_id) = &user_id {
                endpoint_metrics.users.insert(user_id.clone());
                storage
                    .users
                    .entry(user_id.clone())
                    .or_default()
                    .observe(now, tokens, cost, action);
            }

            let entry = RequestLogEntry {
                timestamp: now,
                endpoint,
                duration_ms: round_to(duration_secs * 1000.0, 2),
                success,
                tokens,
                cost_usd: round_to(cost, 6),
                error,
                metadata: Value::Object(metadata),
                user_id,
            };
            let emitted = emit.then(|| entry.clone());
            storage.request_log.push_bounded(entry, self.log_capacity);
            emitted
        };

        if let Some(entry) = emitted {
            emit_json_line(LogLevel::Info, &entry);
        }
    }
}

/// Non-empty `user_id` from request metadata; numbers are accepted as text
fn user_id_from(metadata: &Map<String, Value>) -> Option<String> {
    match metadata.get("user_id")? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
