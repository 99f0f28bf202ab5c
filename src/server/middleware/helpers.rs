//! Helper functions for middleware

use actix_web::http::Method;
use actix_web::http::header::{CONTENT_TYPE, HeaderMap};

/// Whether a request body should be inspected for a `user_id`
pub fn carries_json_body(method: &Method, headers: &HeaderMap) -> bool {
    let body_method = matches!(*method, Method::POST | Method::PUT | Method::DELETE);

    body_method
        && headers
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|ct| ct.starts_with("application/json"))
}

/// Non-empty string `user_id` at the top level of a JSON object body
pub fn extract_user_id(body: &[u8]) -> Option<String> {
    if body.is_empty() {
        return None;
    }

    let value: serde_json::Value = serde_json::from_slice(body).ok()?;
    value
        .get("user_id")
        .and_then(|v| v.as_str())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Admin paths are logged even without a user
pub fn is_admin_path(path: &str) -> bool {
    path.contains("admin")
}
