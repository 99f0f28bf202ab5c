//! Environment variable overrides
//!
//! This module applies `MEMGATE_*` variables on top of a loaded configuration.

use super::models::*;
use crate::utils::error::{MeterError, Result};
use std::path::PathBuf;
use tracing::debug;

impl MeterConfig {
    /// Apply overrides read through `lookup`, normally `std::env::var`
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("MEMGATE_HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("MEMGATE_PORT") {
            self.server.port = port
                .parse()
                .map_err(|e| MeterError::config(format!("Invalid port: {}", e)))?;
        }
        if let Some(workers) = lookup("MEMGATE_WORKERS") {
            self.server.workers = Some(
                workers
                    .parse()
                    .map_err(|e| MeterError::config(format!("Invalid workers count: {}", e)))?,
            );
        }
        if let Some(url) = lookup("MEMGATE_UPSTREAM_URL") {
            self.upstream.base_url = Some(url);
        }
        if let Some(flag) = lookup("MEMGATE_OBSERVABILITY") {
            self.monitoring.enabled = parse_flag(&flag).ok_or_else(|| {
                MeterError::config(format!("Invalid MEMGATE_OBSERVABILITY value: {}", flag))
            })?;
        }
        if let Some(path) = lookup("MEMGATE_PRICING_FILE") {
            self.monitoring.pricing.file = Some(PathBuf::from(path));
        }

        debug!("Environment overrides applied");
        Ok(())
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
