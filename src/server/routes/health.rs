//! Health check and monitoring endpoints

use crate::monitoring::{Alert, RequestLogEntry};
use crate::server::routes::ApiResponse;
use crate::server::state::AppState;
use actix_web::{HttpResponse, Result as ActixResult, web};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::borrow::Cow;
use tracing::{debug, info};

/// Configure health check and monitoring routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(root))
        .service(
            web::scope("/health")
                .route("", web::get().to(health_check))
                .route("/detailed", web::get().to(detailed_health_check)),
        )
        .route("/metrics", web::get().to(metrics))
        .route("/alerts", web::get().to(alerts));
}

/// Service banner
#[derive(Debug, Clone, Serialize)]
pub struct ServiceInfo {
    pub status: Cow<'static, str>,
    pub service: Cow<'static, str>,
    pub version: Cow<'static, str>,
}

/// Health status response
#[derive(Debug, Clone, Serialize)]
pub struct HealthStatus {
    pub status: Cow<'static, str>,
    pub timestamp: DateTime<Utc>,
    pub version: Cow<'static, str>,
    pub components: ComponentStatus,
}

/// Per-component health
#[derive(Debug, Clone, Serialize)]
pub struct ComponentStatus {
    pub api: Cow<'static, str>,
    /// "configured" when an upstream memory API is set
    pub upstream: Cow<'static, str>,
}

/// Health status with request totals
#[derive(Debug, Clone, Serialize)]
pub struct DetailedHealthStatus {
    #[serde(flatten)]
    pub health: HealthStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metrics_summary: Option<MetricsSummary>,
    pub pricing: PricingSummary,
}

/// Pricing table in effect for cost estimation
#[derive(Debug, Clone, Serialize)]
pub struct PricingSummary {
    pub default_model: String,
    pub models: Vec<String>,
}

/// Request totals across all endpoints
#[derive(Debug, Clone, Serialize)]
pub struct MetricsSummary {
    pub total_requests: u64,
    pub total_errors: u64,
    pub observability: Cow<'static, str>,
}

/// Active alerts plus the latest failures
#[derive(Debug, Clone, Serialize)]
pub struct AlertsReport {
    pub active_alerts: Vec<Alert>,
    pub recent_errors: Vec<RequestLogEntry>,
}

const OBSERVABILITY_DISABLED: &str = "Observability not enabled";

async fn root() -> ActixResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(ApiResponse::success(ServiceInfo {
        status: Cow::Borrowed("online"),
        service: Cow::Borrowed(crate::NAME),
        version: Cow::Borrowed(crate::VERSION),
    })))
}

fn health_status(state: &AppState) -> HealthStatus {
    let upstream = if state.config.upstream().base_url.is_some() {
        "configured"
    } else {
        "not_configured"
    };

    HealthStatus {
        status: Cow::Borrowed("healthy"),
        timestamp: Utc::now(),
        version: Cow::Borrowed(crate::VERSION),
        components: ComponentStatus {
            api: Cow::Borrowed("operational"),
            upstream: Cow::Borrowed(upstream),
        },
    }
}

/// Basic health check endpoint
pub async fn health_check(state: web::Data<AppState>) -> ActixResult<HttpResponse> {
    debug!("Health check requested");
    Ok(HttpResponse::Ok().json(ApiResponse::success(health_status(&state))))
}

/// Health check with request totals when observation is enabled
async fn detailed_health_check(state: web::Data<AppState>) -> ActixResult<HttpResponse> {
    debug!("Detailed health check requested");

    let metrics_summary = state.config.monitoring().enabled.then(|| {
        let snapshot = state.collector.get_metrics();
        MetricsSummary {
            total_requests: snapshot.total_requests(),
            total_errors: snapshot.total_errors(),
            observability: Cow::Borrowed("enabled"),
        }
    });

    let mut models: Vec<String> = state.pricing.models().map(str::to_string).collect();
    models.sort_unstable();
    let pricing = PricingSummary {
        default_model: state.pricing.default_model().to_string(),
        models,
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(DetailedHealthStatus {
        health: health_status(&state),
        metrics_summary,
        pricing,
    })))
}

/// Metrics snapshot
async fn metrics(state: web::Data<AppState>) -> ActixResult<HttpResponse> {
    if !state.config.monitoring().enabled {
        return Ok(HttpResponse::ServiceUnavailable()
            .json(ApiResponse::<()>::error(OBSERVABILITY_DISABLED)));
    }

    Ok(HttpResponse::Ok().json(ApiResponse::success(state.collector.get_metrics())))
}

/// Evaluate thresholds, record new alerts and report the active ones
async fn alerts(state: web::Data<AppState>) -> ActixResult<HttpResponse> {
    if !state.config.monitoring().enabled {
        return Ok(HttpResponse::ServiceUnavailable()
            .json(ApiResponse::<()>::error(OBSERVABILITY_DISABLED)));
    }

    let candidates = state.collector.check_alert_conditions();
    let recorded = candidates
        .into_iter()
        .filter(|condition| state.alerts.record_alert(condition.clone()))
        .count();
    if recorded > 0 {
        info!("Recorded {} new alerts", recorded);
    }

    let report = AlertsReport {
        active_alerts: state.alerts.get_active_alerts(),
        recent_errors: state
            .collector
            .get_recent_errors(state.config.monitoring().recent_errors_limit),
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(report)))
}
