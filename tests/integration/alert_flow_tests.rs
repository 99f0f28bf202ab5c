//! Collector and alert manager integration tests
//!
//! Threshold checks on the collector feed the alert manager the same way the
//! `/alerts` route does.

#[cfg(test)]
mod tests {
    use crate::common::RecordFactory;
    use memgate::config::MonitoringConfig;
    use memgate::monitoring::{AlertKind, AlertManager, MetricsCollector, RequestRecord};
    use std::sync::Arc;
    use std::time::Duration;

    fn record_candidates(collector: &MetricsCollector, manager: &AlertManager) -> usize {
        collector
            .check_alert_conditions()
            .into_iter()
            .filter(|condition| manager.record_alert(condition.clone()))
            .count()
    }

    // ==================== Threshold to Alert ====================

    #[test]
    fn test_failing_endpoint_raises_alert() {
        let collector = MetricsCollector::default();
        let manager = AlertManager::default();

        for _ in 0..7 {
            collector.record_request(RecordFactory::ok("POST /v1/memories/add"));
        }
        for _ in 0..3 {
            collector.record_request(RecordFactory::failed("POST /v1/memories/add", "boom"));
        }

        assert_eq!(record_candidates(&collector, &manager), 1);

        let active = manager.get_active_alerts();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].condition.kind, AlertKind::HighErrorRate);
        assert_eq!(active[0].condition.value, 30.0);
    }

    #[test]
    fn test_repeated_polling_accumulates() {
        let collector = MetricsCollector::default();
        let manager = AlertManager::default();

        for _ in 0..10 {
            collector.record_request(RecordFactory::failed("POST /v1/memories/search", "boom"));
        }

        for _ in 0..3 {
            record_candidates(&collector, &manager);
        }
        assert_eq!(manager.get_active_alerts().len(), 3);
    }

    #[test]
    fn test_repeated_polling_with_suppression() {
        let mut config = MonitoringConfig::default();
        config.alerting.suppression_window_secs = 3600;
        let collector = MetricsCollector::new(&config);
        let manager = AlertManager::new(&config.alerting);

        for _ in 0..10 {
            collector.record_request(RecordFactory::failed("POST /v1/memories/search", "boom"));
        }

        assert_eq!(record_candidates(&collector, &manager), 1);
        assert_eq!(record_candidates(&collector, &manager), 0);
        assert_eq!(manager.get_active_alerts().len(), 1);
    }

    #[test]
    fn test_all_three_alert_kinds() {
        let collector = MetricsCollector::default();
        let manager = AlertManager::default();

        for _ in 0..10 {
            collector.record_request(
                RequestRecord::new("POST /v1/memories/add", Duration::from_secs(8), false)
                    .with_cost(0.2),
            );
        }

        assert_eq!(record_candidates(&collector, &manager), 3);

        let mut kinds: Vec<String> = manager
            .get_active_alerts()
            .iter()
            .map(|a| a.condition.kind.to_string())
            .collect();
        kinds.sort();
        assert_eq!(kinds, vec!["high_cost", "high_error_rate", "slow_response"]);
    }

    #[test]
    fn test_quiet_endpoints_raise_nothing() {
        let collector = MetricsCollector::default();
        let manager = AlertManager::default();

        for i in 0..100 {
            collector.record_request(RecordFactory::for_user(
                "POST /v1/memories/add",
                &format!("user_{}", i % 5),
            ));
        }

        assert_eq!(record_candidates(&collector, &manager), 0);
        assert!(manager.get_active_alerts().is_empty());
        assert_eq!(collector.get_metrics().total_unique_users, 5);
    }

    // ==================== Concurrency ====================

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_recording_and_polling() {
        let collector = Arc::new(MetricsCollector::default());
        let manager = Arc::new(AlertManager::default());

        let mut handles = Vec::new();
        for t in 0..8 {
            let collector = Arc::clone(&collector);
            handles.push(tokio::spawn(async move {
                for i in 0..250 {
                    let record = if i % 2 == 0 {
                        RecordFactory::ok("POST /v1/memories/add")
                    } else {
                        RecordFactory::failed("POST /v1/memories/add", "boom")
                    };
                    collector.record_request(record.with_tokens(t));
                }
            }));
        }
        for _ in 0..4 {
            let collector = Arc::clone(&collector);
            let manager = Arc::clone(&manager);
            handles.push(tokio::spawn(async move {
                for _ in 0..20 {
                    let snapshot = collector.get_metrics();
                    for summary in snapshot.summary.values() {
                        assert!(summary.total_errors <= summary.total_requests);
                    }
                    record_candidates(&collector, &manager);
                    tokio::task::yield_now().await;
                }
            }));
        }

        for handle in handles {
            handle.await.unwrap();
        }

        let snapshot = collector.get_metrics();
        let summary = &snapshot.summary["POST /v1/memories/add"];
        assert_eq!(summary.total_requests, 2000);
        assert_eq!(summary.total_errors, 1000);
        // 250 records per task, tokens 0..8
        assert_eq!(summary.total_tokens, 250 * (0..8).sum::<u64>());
        assert!(manager.get_active_alerts().len() <= 100);
    }
}
