//! Request metrics collection and aggregation
//!
//! A single lock guards the endpoint table, the user table and the request
//! log, so each recording and each snapshot is atomic with respect to the
//! others.

mod classify;
mod collector;
mod getters;
mod record;
mod thresholds;
mod types;

pub use classify::{ACTION_RULES, ActionKind, classify_action, emits_log_line};
pub use collector::MetricsCollector;
pub use record::RequestRecord;
