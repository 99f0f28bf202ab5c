//! Request metering and alerting
//!
//! [`MetricsCollector`] aggregates observed requests per endpoint and per user;
//! [`AlertManager`] keeps the alerts raised from those aggregates.

pub mod alerts;
pub(crate) mod bounded;
pub mod metrics;
pub mod types;

pub use alerts::AlertManager;
pub use metrics::{MetricsCollector, RequestRecord};
pub use types::{
    Alert, AlertCondition, AlertKind, AlertSeverity, EndpointSummary, MetricsSnapshot,
    RequestLogEntry, UsageTotals, UserSummary,
};
