//! Threshold evaluation over the cumulative endpoint totals

use super::collector::MetricsCollector;
use crate::monitoring::types::{AlertCondition, AlertKind, AlertSeverity};
use crate::utils::round_to;

impl MetricsCollector {
    /// Endpoints currently over an alert threshold.
    ///
    /// Only endpoints with at least `min_samples` observations are evaluated.
    /// Totals are cumulative since startup. Nothing is deduplicated here: the
    /// same state yields the same candidates on every call.
    pub fn check_alert_conditions(&self) -> Vec<AlertCondition> {
        let thresholds = &self.alerting;
        let storage = self.storage.lock();
        let mut alerts = Vec::new();

        for (endpoint, metrics) in &storage.endpoints {
            if metrics.count < thresholds.min_samples {
                continue;
            }

            let error_rate = metrics.error_rate_pct();
            if error_rate > thresholds.error_rate_pct {
                alerts.push(AlertCondition {
                    kind: AlertKind::HighErrorRate,
                    endpoint: endpoint.clone(),
                    value: round_to(error_rate, 2),
                    threshold: thresholds.error_rate_pct,
                    severity: AlertSeverity::High,
                });
            }

            let avg_duration = metrics.avg_duration_secs();
            if avg_duration > thresholds.slow_response_secs {
                alerts.push(AlertCondition {
                    kind: AlertKind::SlowResponse,
                    endpoint: endpoint.clone(),
                    value: round_to(avg_duration, 2),
                    threshold: thresholds.slow_response_secs,
                    severity: AlertSeverity::Medium,
                });
            }

            if metrics.total_cost > thresholds.total_cost_usd {
                alerts.push(AlertCondition {
                    kind: AlertKind::HighCost,
                    endpoint: endpoint.clone(),
                    value: round_to(metrics.total_cost, 2),
                    threshold: thresholds.total_cost_usd,
                    severity: AlertSeverity::Medium,
                });
            }
        }

        alerts
    }
}
