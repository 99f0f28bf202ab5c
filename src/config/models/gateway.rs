//! Top-level gateway configuration

use super::*;
use serde::{Deserialize, Serialize};

/// Root of the YAML configuration file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MeterConfig {
    /// HTTP server settings
    #[serde(default)]
    pub server: ServerConfig,
    /// Memory API the gateway forwards to
    #[serde(default)]
    pub upstream: UpstreamConfig,
    /// Metering and alerting settings
    #[serde(default)]
    pub monitoring: MonitoringConfig,
}
