//! Alert manager implementation

use crate::config::AlertingConfig;
use crate::monitoring::bounded::BoundedPush;
use crate::monitoring::types::{Alert, AlertCondition};
use crate::utils::logging::{LogLevel, emit_json_line};
use chrono::{Duration as ChronoDuration, Utc};
use parking_lot::Mutex;
use serde::Serialize;
use std::collections::VecDeque;
use tracing::debug;

/// Bounded history of recorded alerts
#[derive(Debug)]
pub struct AlertManager {
    /// Maximum number of alerts retained
    capacity: usize,
    /// Repeat suppression window; zero disables suppression
    suppression_window: Option<ChronoDuration>,
    pub(super) history: Mutex<VecDeque<Alert>>,
}

/// Log line emitted for every stored alert
#[derive(Serialize)]
struct AlertLog<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    alert: &'a Alert,
}

impl Default for AlertManager {
    fn default() -> Self {
        Self::new(&AlertingConfig::default())
    }
}

impl AlertManager {
    /// Create a new alert manager
    pub fn new(config: &AlertingConfig) -> Self {
        let suppression_window = match config.suppression_window_secs {
            0 => None,
            secs => Some(ChronoDuration::seconds(secs.min(u64::from(u32::MAX)) as i64)),
        };

        Self {
            capacity: config.history_capacity.max(1),
            suppression_window,
            history: Mutex::new(VecDeque::new()),
        }
    }

    /// Stamp and store an alert, returning whether it was kept.
    ///
    /// With a suppression window configured, an alert matching the type and
    /// endpoint of an unacknowledged alert recorded inside the window is
    /// dropped.
    pub fn record_alert(&self, condition: AlertCondition) -> bool {
        let now = Utc::now();
        let alert = Alert {
            condition,
            timestamp: now,
            acknowledged: false,
        };

        {
            let mut history = self.history.lock();

            if let Some(window) = self.suppression_window {
                let duplicate = history.iter().rev().any(|existing| {
                    !existing.acknowledged
                        && existing.condition.kind == alert.condition.kind
                        && existing.condition.endpoint == alert.condition.endpoint
                        && now - existing.timestamp < window
                });
                if duplicate {
                    debug!(
                        "Suppressed repeat {} alert for {}",
                        alert.condition.kind, alert.condition.endpoint
                    );
                    return false;
                }
            }

            history.push_bounded(alert.clone(), self.capacity);
        }

        emit_json_line(
            LogLevel::Warn,
            &AlertLog {
                kind: "ALERT",
                alert: &alert,
            },
        );
        true
    }

    /// Unacknowledged alerts, oldest first
    pub fn get_active_alerts(&self) -> Vec<Alert> {
        self.history
            .lock()
            .iter()
            .filter(|alert| !alert.acknowledged)
            .cloned()
            .collect()
    }

    /// Number of alerts currently retained
    pub fn len(&self) -> usize {
        self.history.lock().len()
    }

    /// Whether no alerts are retained
    pub fn is_empty(&self) -> bool {
        self.history.lock().is_empty()
    }
}
