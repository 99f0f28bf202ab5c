//! Pass-through of memory operations to the upstream memory API

use crate::server::state::AppState;
use crate::utils::error::{MeterError, Result};
use actix_web::http::StatusCode;
use actix_web::http::header::CONTENT_TYPE;
use actix_web::{HttpRequest, HttpResponse, web};
use tracing::debug;

/// Request headers copied onto the upstream request
const FORWARDED_HEADERS: [&str; 2] = ["content-type", "x-api-key"];

/// Configure memory routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/v1/memories", web::route().to(forward))
        .route("/v1/memories/{tail:.*}", web::route().to(forward));
}

/// Build the upstream URL for a request path and query
pub(crate) fn upstream_url(base_url: &str, path_and_query: &str) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), path_and_query)
}

/// Forward the request upstream and relay status, content type and body
async fn forward(
    req: HttpRequest,
    body: web::Bytes,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    let base_url = state
        .config
        .upstream()
        .base_url
        .as_deref()
        .ok_or_else(|| MeterError::unavailable("no upstream memory API configured"))?;

    let path_and_query = req
        .uri()
        .path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or_else(|| req.path());
    let target = upstream_url(base_url, path_and_query);

    let method = reqwest::Method::from_bytes(req.method().as_str().as_bytes())
        .map_err(|e| MeterError::validation(format!("Unsupported method: {}", e)))?;

    debug!("Forwarding {} {}", method, target);

    let mut upstream = state.http_client.request(method, &target).body(body.to_vec());
    for name in FORWARDED_HEADERS {
        if let Some(value) = req.headers().get(name).and_then(|v| v.to_str().ok()) {
            upstream = upstream.header(name, value);
        }
    }

    let response = upstream.send().await?;
    let status = StatusCode::from_u16(response.status().as_u16()).unwrap_or(StatusCode::BAD_GATEWAY);
    let content_type = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let bytes = response.bytes().await?;

    let mut builder = HttpResponse::build(status);
    if let Some(content_type) = content_type {
        builder.insert_header((CONTENT_TYPE, content_type));
    }
    Ok(builder.body(bytes))
}
