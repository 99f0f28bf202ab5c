//! Snapshot queries over the collected metrics

use super::collector::MetricsCollector;
use crate::monitoring::types::{MetricsSnapshot, RequestLogEntry, UsageTotals};
use crate::utils::round_to;

impl MetricsCollector {
    /// Aggregated view of all endpoints and users
    pub fn get_metrics(&self) -> MetricsSnapshot {
        let storage = self.storage.lock();

        let summary = storage
            .endpoints
            .iter()
            .map(|(endpoint, metrics)| (endpoint.clone(), metrics.summary()))
            .collect();

        let user_activity = storage
            .users
            .iter()
            .map(|(user_id, activity)| (user_id.clone(), activity.summary()))
            .collect();

        let window_start = storage.request_log.len().saturating_sub(self.recent_window);
        let recent_user_requests: Vec<RequestLogEntry> = storage
            .request_log
            .range(window_start..)
            .filter(|entry| entry.user_id.is_some())
            .cloned()
            .collect();

        let totals = UsageTotals {
            total_cost_usd: round_to(storage.endpoints.values().map(|m| m.total_cost).sum(), 4),
            total_tokens: storage.endpoints.values().map(|m| m.total_tokens).sum(),
        };
        let total_unique_users = storage.users.len();
        drop(storage);

        MetricsSnapshot {
            summary,
            user_activity,
            total_unique_users,
            recent_requests: recent_user_requests.clone(),
            recent_user_requests,
            model_usage: totals,
            openai_costs: totals,
        }
    }

    /// The most recent `limit` failed requests, oldest first
    pub fn get_recent_errors(&self, limit: usize) -> Vec<RequestLogEntry> {
        let storage = self.storage.lock();

        let mut errors: Vec<RequestLogEntry> = storage
            .request_log
            .iter()
            .rev()
            .filter(|entry| !entry.success)
            .take(limit)
            .cloned()
            .collect();
        errors.reverse();
        errors
    }

    /// Copy of the whole request log, oldest first
    pub fn get_request_log(&self) -> Vec<RequestLogEntry> {
        self.storage.lock().request_log.iter().cloned().collect()
    }
}
