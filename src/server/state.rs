//! Application state shared across HTTP handlers

use crate::config::Config;
use crate::core::cost::PricingTable;
use crate::monitoring::{AlertManager, MetricsCollector};
use crate::utils::error::Result;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// HTTP server state shared across handlers
///
/// Every component is built once here and handed out by `Arc`; handlers and
/// middleware never reach for globals.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Service configuration (shared read-only)
    pub config: Arc<Config>,
    /// Request metrics
    pub collector: Arc<MetricsCollector>,
    /// Alert history
    pub alerts: Arc<AlertManager>,
    /// Model pricing used for cost estimation
    pub pricing: Arc<PricingTable>,
    /// Client for the upstream memory API
    pub http_client: reqwest::Client,
}

impl AppState {
    /// Build state from a configuration and an already loaded pricing table
    pub fn new(config: Config, pricing: PricingTable) -> Result<Self> {
        let monitoring = config.monitoring();
        let collector = MetricsCollector::new(monitoring);
        let alerts = AlertManager::new(&monitoring.alerting);

        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.upstream().timeout))
            .build()?;

        Ok(Self {
            config: Arc::new(config),
            collector: Arc::new(collector),
            alerts: Arc::new(alerts),
            pricing: Arc::new(pricing),
            http_client,
        })
    }

    /// Build state, loading the pricing table named by the configuration
    pub async fn from_config(config: Config) -> Result<Self> {
        let pricing = match &config.monitoring().pricing.file {
            Some(path) => PricingTable::from_file(path).await?,
            None => {
                info!("Using built-in pricing table");
                PricingTable::default()
            }
        };

        Self::new(config, pricing)
    }

    /// Get service configuration
    pub fn config(&self) -> &Config {
        &self.config
    }
}
