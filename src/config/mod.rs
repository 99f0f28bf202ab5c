//! Configuration management for the gateway
//!
//! This module handles loading and validation of the gateway configuration.

mod loader;
pub mod models;

pub use models::*;

use crate::utils::error::{MeterError, Result};
use std::path::Path;
use tracing::{debug, info};

/// Main configuration struct for the gateway
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Gateway configuration
    pub gateway: MeterConfig,
}

impl Config {
    /// Load configuration from a YAML file
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading configuration from: {:?}", path);

        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| MeterError::config(format!("Failed to read config file: {}", e)))?;

        Self::from_yaml_str(&content)
    }

    /// Parse configuration from YAML text
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let gateway: MeterConfig = serde_yaml::from_str(content)
            .map_err(|e| MeterError::config(format!("Failed to parse config: {}", e)))?;

        let config = Self { gateway };
        config.validate()?;

        debug!("Configuration loaded successfully");
        Ok(config)
    }

    /// Load configuration from defaults plus environment variables
    pub fn from_env() -> Result<Self> {
        info!("Loading configuration from environment variables");

        let mut gateway = MeterConfig::default();
        gateway.apply_overrides(|key| std::env::var(key).ok())?;

        let config = Self { gateway };
        config.validate()?;
        Ok(config)
    }

    /// Get server configuration
    pub fn server(&self) -> &ServerConfig {
        &self.gateway.server
    }

    /// Get upstream configuration
    pub fn upstream(&self) -> &UpstreamConfig {
        &self.gateway.upstream
    }

    /// Get monitoring configuration
    pub fn monitoring(&self) -> &MonitoringConfig {
        &self.gateway.monitoring
    }

    /// Validate the entire configuration
    pub fn validate(&self) -> Result<()> {
        debug!("Validating configuration");

        self.gateway
            .server
            .validate()
            .map_err(|e| MeterError::config(format!("Server config error: {}", e)))?;

        self.gateway
            .upstream
            .validate()
            .map_err(|e| MeterError::config(format!("Upstream config error: {}", e)))?;

        self.gateway
            .monitoring
            .validate()
            .map_err(|e| MeterError::config(format!("Monitoring config error: {}", e)))?;

        Ok(())
    }

    /// Convert to YAML string
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(&self.gateway)?)
    }
}
