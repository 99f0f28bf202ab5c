//! Configuration and pricing file integration tests

#[cfg(test)]
mod tests {
    use memgate::config::Config;
    use memgate::server::AppState;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_file(suffix: &str, content: &str) -> NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[tokio::test]
    async fn test_state_loads_pricing_file() {
        let pricing = write_file(
            ".json",
            r#"{"default_model": "house-model", "models": {"house-model": {"input": 1.0, "output": 2.0}}}"#,
        );
        let config = write_file(
            ".yaml",
            &format!(
                "monitoring:\n  pricing:\n    file: \"{}\"\n",
                pricing.path().display()
            ),
        );

        let config = Config::from_file(config.path()).await.unwrap();
        let state = AppState::from_config(config).await.unwrap();

        assert_eq!(state.pricing.default_model(), "house-model");
        let cost = state.pricing.calculate_cost("gpt-4o", 1_000_000, 1_000_000);
        assert!((cost - 3.0).abs() < 1e-12);
    }

    #[tokio::test]
    async fn test_state_without_pricing_file_uses_builtin_table() {
        let state = AppState::from_config(Config::default()).await.unwrap();
        assert_eq!(state.pricing.default_model(), "gpt-4o-mini");
    }

    #[tokio::test]
    async fn test_invalid_pricing_file_fails() {
        let pricing = write_file(".json", r#"{"default_model": "x", "models": {}}"#);
        let mut config = Config::default();
        config.gateway.monitoring.pricing.file = Some(pricing.path().to_path_buf());

        assert!(AppState::from_config(config).await.is_err());
    }

    #[tokio::test]
    async fn test_collector_honours_configured_capacity() {
        let config = write_file(
            ".yaml",
            "monitoring:\n  request_log_capacity: 5\n  excluded_endpoints: []\n",
        );
        let config = Config::from_file(config.path()).await.unwrap();
        let state = AppState::from_config(config).await.unwrap();

        for _ in 0..12 {
            state
                .collector
                .record_request(crate::common::RecordFactory::ok("GET /health"));
        }

        assert_eq!(state.collector.get_request_log().len(), 5);
        assert_eq!(state.collector.get_metrics().summary["GET /health"].total_requests, 12);
    }

    #[test]
    fn test_yaml_roundtrip_keeps_values() {
        let config = Config::from_yaml_str("server:\n  port: 9100\n").unwrap();
        let yaml = config.to_yaml().unwrap();
        let reloaded = Config::from_yaml_str(&yaml).unwrap();
        assert_eq!(reloaded.server().port, 9100);
        assert_eq!(
            reloaded.monitoring().excluded_endpoints,
            config.monitoring().excluded_endpoints
        );
    }

    #[tokio::test]
    async fn test_shipped_example_files_load() {
        let config = Config::from_file(concat!(
            env!("CARGO_MANIFEST_DIR"),
            "/config/memgate.yaml.example"
        ))
        .await
        .unwrap();
        assert_eq!(config.server().port, 8000);
        assert!(config.monitoring().pricing.file.is_none());

        let pricing = memgate::PricingTable::from_file(concat!(
            env!("CARGO_MANIFEST_DIR"),
            "/config/pricing.json"
        ))
        .await
        .unwrap();
        assert_eq!(pricing, memgate::PricingTable::default());
    }
}
