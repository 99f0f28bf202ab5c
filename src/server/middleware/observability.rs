//! Request observation middleware
//!
//! Times every request and records it into the [`MetricsCollector`] as
//! `"METHOD PATH"`. JSON bodies of POST/PUT/DELETE requests are buffered to
//! attribute the request to a `user_id`, then handed back to the handler.
//! A body that fails to arrive, or outgrows the inspection limit, reaches the
//! handler exactly as it was received and the request is metered unattributed.

use super::helpers::{carries_json_body, extract_user_id, is_admin_path};
use crate::monitoring::{MetricsCollector, RequestRecord};
use crate::utils::logging::log_structured;
use crate::utils::round_to;
use actix_web::HttpMessage;
use actix_web::dev::{Payload, Service, ServiceRequest, ServiceResponse, Transform, forward_ready};
use actix_web::error::PayloadError;
use actix_web::http::header::{CONTENT_LENGTH, HeaderMap, USER_AGENT};
use actix_web::web::{Bytes, BytesMut};
use futures::future::{Ready, ready};
use futures::{Stream, StreamExt, stream};
use serde_json::json;
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;
use std::sync::Arc;
use std::time::Instant;

/// Observation middleware for Actix-web
#[derive(Clone)]
pub struct ObservabilityMiddleware {
    collector: Arc<MetricsCollector>,
    body_limit: usize,
}

impl ObservabilityMiddleware {
    /// `body_limit` caps the bytes buffered while looking for a `user_id`
    pub fn new(collector: Arc<MetricsCollector>, body_limit: usize) -> Self {
        Self {
            collector,
            body_limit,
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for ObservabilityMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = actix_web::Error;
    type InitError = ();
    type Transform = ObservabilityMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(ObservabilityMiddlewareService {
            service: Rc::new(service),
            collector: Arc::clone(&self.collector),
            body_limit: self.body_limit,
        }))
    }
}

/// Service implementation for the observation middleware
pub struct ObservabilityMiddlewareService<S> {
    service: Rc<S>,
    collector: Arc<MetricsCollector>,
    body_limit: usize,
}

impl<S, B> Service<ServiceRequest> for ObservabilityMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = actix_web::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>>>>;

    forward_ready!(service);

    fn call(&self, mut req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let collector = Arc::clone(&self.collector);
        let body_limit = self.body_limit;

        Box::pin(async move {
            let started = Instant::now();
            let method = req.method().to_string();
            let path = req.path().to_string();
            let client_ip = req
                .connection_info()
                .peer_addr()
                .unwrap_or("unknown")
                .to_string();
            let user_agent = req
                .headers()
                .get(USER_AGENT)
                .and_then(|h| h.to_str().ok())
                .unwrap_or("unknown")
                .to_string();

            let mut body_error = None;
            let user_id = if carries_json_body(req.method(), req.headers())
                && !exceeds_limit(req.headers(), body_limit)
            {
                let inspection = inspect_body(req.take_payload(), body_limit).await;
                req.set_payload(inspection.payload);
                body_error = inspection.error;
                inspection.user_id
            } else {
                None
            };

            let logged = user_id.is_some() || is_admin_path(&path);
            if logged {
                log_structured(
                    "info",
                    &format!("Incoming {} request", method),
                    json!({
                        "path": path,
                        "method": method,
                        "client_ip": client_ip,
                        "user_agent": user_agent,
                        "user_id": user_id,
                    }),
                );
            }

            let result = service.call(req).await;

            let (status_code, error) = match &result {
                Ok(res) => (
                    res.status().as_u16(),
                    res.response()
                        .error()
                        .map(|e| e.to_string())
                        .or_else(|| body_error.clone()),
                ),
                Err(e) => {
                    let message = e.to_string();
                    log_structured(
                        "error",
                        &format!("Request failed: {}", message),
                        json!({
                            "path": path,
                            "method": method,
                            "error": message,
                            "user_id": user_id,
                        }),
                    );
                    (500, Some(message))
                }
            };
            let success = (200..400).contains(&status_code);
            let duration = started.elapsed();

            let mut metadata = json!({
                "method": method,
                "path": path,
                "status_code": status_code,
                "client_ip": client_ip,
            });
            if let Some(user_id) = &user_id {
                metadata["user_id"] = json!(user_id);
            }

            let mut record =
                RequestRecord::new(format!("{} {}", method, path), duration, success)
                    .with_metadata(metadata);
            if let Some(error) = error {
                record = record.with_error(error);
            }
            collector.record_request(record);

            if logged {
                log_structured(
                    if success { "info" } else { "error" },
                    &format!("Request completed: {} {}", method, path),
                    json!({
                        "path": path,
                        "method": method,
                        "status_code": status_code,
                        "duration_ms": round_to(duration.as_secs_f64() * 1000.0, 2),
                        "success": success,
                        "user_id": user_id,
                    }),
                );
            }

            result
        })
    }
}

type BodyStream = Pin<Box<dyn Stream<Item = Result<Bytes, PayloadError>>>>;

fn stream_payload<S>(chunks: S) -> Payload
where
    S: Stream<Item = Result<Bytes, PayloadError>> + 'static,
{
    let chunks: BodyStream = Box::pin(chunks);
    Payload::from(chunks)
}

/// Outcome of reading a request body for attribution
struct BodyInspection {
    user_id: Option<String>,
    /// Payload to hand to the handler in place of the consumed one
    payload: Payload,
    /// Read failure, replayed to the handler after the buffered bytes
    error: Option<String>,
}

/// Declared `Content-Length` above `limit`
fn exceeds_limit(headers: &HeaderMap, limit: usize) -> bool {
    headers
        .get(CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<usize>().ok())
        .is_some_and(|len| len > limit)
}

/// Buffer at most `limit` bytes of `payload` and look for a `user_id`.
///
/// Never fails: a stream error is handed back to the handler after the bytes
/// read so far, and an oversized body is stitched back onto the unread rest.
async fn inspect_body(mut payload: Payload, limit: usize) -> BodyInspection {
    let mut body = BytesMut::new();

    while let Some(chunk) = payload.next().await {
        match chunk {
            Ok(chunk) if body.len() + chunk.len() <= limit => body.extend_from_slice(&chunk),
            Ok(chunk) => {
                body.extend_from_slice(&chunk);
                let head = stream::iter([Ok(body.freeze())]);
                return BodyInspection {
                    user_id: None,
                    payload: stream_payload(head.chain(payload)),
                    error: None,
                };
            }
            Err(e) => {
                let error = format!("Failed to read request body: {}", e);
                let replay = stream::iter([Ok(body.freeze()), Err(e)]);
                return BodyInspection {
                    user_id: None,
                    payload: stream_payload(replay),
                    error: Some(error),
                };
            }
        }
    }

    let body = body.freeze();
    BodyInspection {
        user_id: extract_user_id(&body),
        payload: Payload::from(body),
        error: None,
    }
}
