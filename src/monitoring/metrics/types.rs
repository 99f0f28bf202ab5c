//! Types for metrics storage

use super::classify::ActionKind;
use crate::monitoring::types::{EndpointSummary, RequestLogEntry, UserSummary};
use crate::utils::round_to;
use chrono::{DateTime, Utc};
use std::collections::{BTreeMap, HashSet, VecDeque};

/// Everything the collector guards with its single lock
#[derive(Debug, Default)]
pub(super) struct MetricsStorage {
    pub(super) endpoints: BTreeMap<String, EndpointMetrics>,
    pub(super) users: BTreeMap<String, UserActivity>,
    pub(super) request_log: VecDeque<RequestLogEntry>,
}

/// Running totals for one endpoint
#[derive(Debug, Default)]
pub(super) struct EndpointMetrics {
    pub(super) count: u64,
    /// Seconds
    pub(super) total_duration: f64,
    pub(super) errors: u64,
    pub(super) total_tokens: u64,
    pub(super) total_cost: f64,
    pub(super) users: HashSet<String>,
}

impl EndpointMetrics {
    pub(super) fn observe(&mut self, duration_secs: f64, success: bool, tokens: u64, cost: f64) {
        self.count += 1;
        self.total_duration += duration_secs;
        self.total_tokens += tokens;
        self.total_cost += cost;
        if !success {
            self.errors += 1;
        }
    }

    /// Failed requests as a percentage of all requests
    pub(super) fn error_rate_pct(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.errors as f64 / self.count as f64 * 100.0
        }
    }

    /// Mean duration in seconds
    pub(super) fn avg_duration_secs(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.total_duration / self.count as f64
        }
    }

    pub(super) fn summary(&self) -> EndpointSummary {
        let success_rate = if self.count == 0 {
            0.0
        } else {
            (self.count - self.errors) as f64 / self.count as f64 * 100.0
        };

        EndpointSummary {
            total_requests: self.count,
            total_errors: self.errors,
            success_rate_pct: round_to(success_rate, 2),
            avg_duration_ms: round_to(self.avg_duration_secs() * 1000.0, 2),
            total_tokens: self.total_tokens,
            total_cost_usd: round_to(self.total_cost, 4),
            unique_users: self.users.len(),
        }
    }
}

/// Running totals for one user
#[derive(Debug, Default)]
pub(super) struct UserActivity {
    pub(super) add_count: u64,
    pub(super) search_count: u64,
    pub(super) update_count: u64,
    pub(super) delete_count: u64,
    pub(super) total_tokens: u64,
    pub(super) total_cost: f64,
    pub(super) first_seen: Option<DateTime<Utc>>,
    pub(super) last_seen: Option<DateTime<Utc>>,
}

impl UserActivity {
    pub(super) fn observe(
        &mut self,
        now: DateTime<Utc>,
        tokens: u64,
        cost: f64,
        action: Option<ActionKind>,
    ) {
        self.first_seen.get_or_insert(now);
        self.last_seen = Some(now);
        self.total_tokens += tokens;
        self.total_cost += cost;

        match action {
            Some(ActionKind::Add) => self.add_count += 1,
            Some(ActionKind::Search) => self.search_count += 1,
            Some(ActionKind::Update) => self.update_count += 1,
            Some(ActionKind::Delete) => self.delete_count += 1,
            None => {}
        }
    }

    pub(super) fn summary(&self) -> UserSummary {
        UserSummary {
            add_count: self.add_count,
            search_count: self.search_count,
            update_count: self.update_count,
            delete_count: self.delete_count,
            total_tokens: self.total_tokens,
            total_cost_usd: round_to(self.total_cost, 4),
            first_seen: self.first_seen,
            last_seen: self.last_seen,
        }
    }
}
