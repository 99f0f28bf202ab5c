//! HTTP middleware implementations

mod helpers;
mod observability;

pub use helpers::{carries_json_body, extract_user_id, is_admin_path};
pub use observability::{ObservabilityMiddleware, ObservabilityMiddlewareService};
