//! Upstream memory API configuration

use super::*;
use serde::{Deserialize, Serialize};

/// Where `/v1/memories/*` requests are forwarded
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpstreamConfig {
    /// Base URL of the memory API, e.g. `http://mem0:8000`
    pub base_url: Option<String>,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            timeout: default_timeout(),
        }
    }
}

impl UpstreamConfig {
    pub(crate) fn validate(&self) -> Result<(), String> {
        if let Some(url) = &self.base_url {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(format!("base_url must be an http(s) URL, got '{}'", url));
            }
        }
        if self.timeout == 0 {
            return Err("timeout must be greater than 0".to_string());
        }
        Ok(())
    }
}
