//! HTTP surface integration tests
//!
//! Requests go through the real application, including the observation
//! middleware, and the shared state is inspected afterwards.

#[cfg(test)]
mod tests {
    use crate::common::{RecordFactory, TestApp};
    use actix_web::{test, web};
    use memgate::server::HttpServer;
    use serde_json::{Value, json};

    macro_rules! init_app {
        ($state:expr) => {
            test::init_service(HttpServer::create_app(web::Data::new($state.clone()))).await
        };
    }

    // ==================== Health Routes ====================

    #[actix_web::test]
    async fn test_root_banner() {
        let state = TestApp::new().state();
        let app = init_app!(state);

        let resp: Value = test::call_and_read_body_json(&app, test::TestRequest::get().uri("/").to_request()).await;
        assert_eq!(resp["success"], true);
        assert_eq!(resp["data"]["status"], "online");
        assert_eq!(resp["data"]["service"], "memgate");

        // "/" is not on the denylist
        assert_eq!(state.collector.get_metrics().summary["GET /"].total_requests, 1);
    }

    #[actix_web::test]
    async fn test_health_is_not_metered() {
        let state = TestApp::new().state();
        let app = init_app!(state);

        for uri in ["/health", "/health/detailed", "/metrics", "/alerts"] {
            let resp = test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;
            assert!(resp.status().is_success(), "{} returned {}", uri, resp.status());
        }

        assert!(state.collector.get_metrics().summary.is_empty());
        assert!(state.collector.get_request_log().is_empty());
    }

    #[actix_web::test]
    async fn test_health_reports_components() {
        let state = TestApp::new().state();
        let app = init_app!(state);

        let resp: Value =
            test::call_and_read_body_json(&app, test::TestRequest::get().uri("/health").to_request()).await;
        assert_eq!(resp["data"]["status"], "healthy");
        assert_eq!(resp["data"]["components"]["api"], "operational");
        assert_eq!(resp["data"]["components"]["upstream"], "not_configured");
    }

    #[actix_web::test]
    async fn test_detailed_health_includes_totals() {
        let state = TestApp::new().state();
        state.collector.record_request(RecordFactory::ok("POST /v1/memories/add"));
        state.collector.record_request(RecordFactory::failed("POST /v1/memories/add", "boom"));
        let app = init_app!(state);

        let resp: Value = test::call_and_read_body_json(
            &app,
            test::TestRequest::get().uri("/health/detailed").to_request(),
        )
        .await;
        assert_eq!(resp["data"]["status"], "healthy");
        assert_eq!(resp["data"]["metrics_summary"]["total_requests"], 2);
        assert_eq!(resp["data"]["metrics_summary"]["total_errors"], 1);
        assert_eq!(resp["data"]["metrics_summary"]["observability"], "enabled");
        assert_eq!(resp["data"]["pricing"]["default_model"], "gpt-4o-mini");
        assert!(
            resp["data"]["pricing"]["models"]
                .as_array()
                .unwrap()
                .contains(&Value::from("gpt-4o"))
        );
    }

    // ==================== Monitoring Routes ====================

    #[actix_web::test]
    async fn test_metrics_snapshot() {
        let state = TestApp::new().state();
        state
            .collector
            .record_request(RecordFactory::for_user("POST /v1/memories/search", "riley_123").with_tokens(9));
        let app = init_app!(state);

        let resp: Value =
            test::call_and_read_body_json(&app, test::TestRequest::get().uri("/metrics").to_request()).await;
        let data = &resp["data"];
        assert_eq!(data["summary"]["POST /v1/memories/search"]["total_requests"], 1);
        assert_eq!(data["summary"]["POST /v1/memories/search"]["unique_users"], 1);
        assert_eq!(data["user_activity"]["riley_123"]["search_count"], 1);
        assert_eq!(data["total_unique_users"], 1);
        assert_eq!(data["model_usage"]["total_tokens"], 9);
        assert_eq!(data["openai_costs"], data["model_usage"]);
        assert_eq!(data["recent_user_requests"].as_array().unwrap().len(), 1);
    }

    #[actix_web::test]
    async fn test_alerts_route_records_and_reports() {
        let state = TestApp::new().state();
        for _ in 0..8 {
            state.collector.record_request(RecordFactory::ok("POST /v1/memories/add"));
        }
        for i in 0..4 {
            state
                .collector
                .record_request(RecordFactory::failed("POST /v1/memories/add", &format!("failure {}", i)));
        }
        let app = init_app!(state);

        let resp: Value =
            test::call_and_read_body_json(&app, test::TestRequest::get().uri("/alerts").to_request()).await;
        let alerts = resp["data"]["active_alerts"].as_array().unwrap();
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0]["type"], "high_error_rate");
        assert_eq!(alerts[0]["endpoint"], "POST /v1/memories/add");
        assert_eq!(alerts[0]["value"], 33.33);
        assert_eq!(alerts[0]["severity"], "high");
        assert_eq!(alerts[0]["acknowledged"], false);

        let errors = resp["data"]["recent_errors"].as_array().unwrap();
        assert_eq!(errors.len(), 4);
        assert_eq!(errors[3]["error"], "failure 3");

        // polling again records the same condition again
        test::call_service(&app, test::TestRequest::get().uri("/alerts").to_request()).await;
        assert_eq!(state.alerts.get_active_alerts().len(), 2);
    }

    #[actix_web::test]
    async fn test_monitoring_disabled() {
        let state = TestApp::new().with_monitoring(false).state();
        let app = init_app!(state);

        let resp = test::call_service(&app, test::TestRequest::get().uri("/metrics").to_request()).await;
        assert_eq!(resp.status().as_u16(), 503);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "Observability not enabled");

        let resp = test::call_service(&app, test::TestRequest::get().uri("/alerts").to_request()).await;
        assert_eq!(resp.status().as_u16(), 503);

        test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
        assert!(state.collector.get_request_log().is_empty());

        let resp: Value = test::call_and_read_body_json(
            &app,
            test::TestRequest::get().uri("/health/detailed").to_request(),
        )
        .await;
        assert!(resp["data"].get("metrics_summary").is_none());
    }

    // ==================== Observation Middleware ====================

    #[actix_web::test]
    async fn test_middleware_attributes_user_and_failure() {
        let state = TestApp::new().state();
        let app = init_app!(state);

        let req = test::TestRequest::post()
            .uri("/v1/memories/add")
            .set_json(json!({"user_id": "riley_123", "messages": [{"role": "user", "content": "hi"}]}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        // no upstream configured
        assert_eq!(resp.status().as_u16(), 503);

        let snapshot = state.collector.get_metrics();
        let summary = &snapshot.summary["POST /v1/memories/add"];
        assert_eq!(summary.total_requests, 1);
        assert_eq!(summary.total_errors, 1);
        assert_eq!(snapshot.user_activity["riley_123"].add_count, 1);

        let log = state.collector.get_request_log();
        assert_eq!(log[0].user_id.as_deref(), Some("riley_123"));
        assert_eq!(log[0].metadata["status_code"], 503);
        assert_eq!(log[0].metadata["method"], "POST");
        assert_eq!(log[0].metadata["path"], "/v1/memories/add");
        assert!(log[0].error.as_deref().unwrap().contains("no upstream"));
    }

    #[actix_web::test]
    async fn test_middleware_ignores_non_json_bodies() {
        let state = TestApp::new().state();
        let app = init_app!(state);

        let req = test::TestRequest::post()
            .uri("/v1/memories/add")
            .insert_header(("content-type", "text/plain"))
            .set_payload(r#"{"user_id": "riley_123"}"#)
            .to_request();
        test::call_service(&app, req).await;

        let req = test::TestRequest::get()
            .uri("/v1/memories/search")
            .to_request();
        test::call_service(&app, req).await;

        let snapshot = state.collector.get_metrics();
        assert_eq!(snapshot.total_unique_users, 0);
        assert_eq!(snapshot.summary.len(), 2);
    }

    #[actix_web::test]
    async fn test_middleware_tolerates_malformed_json() {
        let state = TestApp::new().state();
        let app = init_app!(state);

        let req = test::TestRequest::post()
            .uri("/v1/memories/add")
            .insert_header(("content-type", "application/json"))
            .set_payload("{not json")
            .to_request();
        test::call_service(&app, req).await;

        let log = state.collector.get_request_log();
        assert_eq!(log.len(), 1);
        assert!(log[0].user_id.is_none());
    }

    #[actix_web::test]
    async fn test_unknown_route_counts_as_failure() {
        let state = TestApp::new().state();
        let app = init_app!(state);

        let resp = test::call_service(&app, test::TestRequest::get().uri("/nope").to_request()).await;
        assert_eq!(resp.status().as_u16(), 404);

        let snapshot = state.collector.get_metrics();
        assert_eq!(snapshot.summary["GET /nope"].total_errors, 1);
        assert_eq!(snapshot.summary["GET /nope"].success_rate_pct, 0.0);
    }
}
