//! # memgate
//!
//! Request metering and alerting in front of a memory-storage API.
//!
//! ## Features
//!
//! - **Per-endpoint aggregates**: request counts, error rates, latency, tokens and cost
//! - **Per-user activity**: add/search/update/delete counters with first/last seen
//! - **Threshold alerts**: error rate, slow responses and cumulative cost
//! - **Cost estimation**: per-model token pricing with a fallback model
//! - **Structured logging**: one JSON object per line through `tracing`
//!
//! ## Metering a request
//!
//! ```rust
//! use memgate::monitoring::{MetricsCollector, RequestRecord};
//! use std::time::Duration;
//!
//! let collector = MetricsCollector::default();
//! collector.record_request(
//!     RequestRecord::new("POST /v1/memories/add", Duration::from_millis(120), true)
//!         .with_tokens(42)
//!         .with_metadata(serde_json::json!({ "user_id": "riley_123" })),
//! );
//!
//! let snapshot = collector.get_metrics();
//! assert_eq!(snapshot.summary["POST /v1/memories/add"].total_requests, 1);
//! ```
//!
//! ## Gateway Mode
//!
//! ```rust,no_run
//! use memgate::{Config, Gateway};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_file("config/memgate.yaml").await?;
//!     let gateway = Gateway::new(config).await?;
//!     gateway.run().await?;
//!     Ok(())
//! }
//! ```

#![warn(clippy::all)]
#![allow(clippy::module_inception)]

pub mod config;
pub mod core;
pub mod monitoring;
pub mod server;
pub mod utils;

// Re-export main types
pub use config::Config;
pub use core::cost::{ModelCallTracker, ModelPricing, PricingTable};
pub use monitoring::{AlertManager, MetricsCollector, RequestRecord};
pub use utils::error::{MeterError, Result};

use tracing::info;

/// The metering gateway: configuration plus a ready HTTP server
pub struct Gateway {
    config: Config,
    server: server::HttpServer,
}

impl Gateway {
    /// Create a new gateway instance
    pub async fn new(config: Config) -> Result<Self> {
        info!("Creating new gateway instance");

        let server = server::HttpServer::new(&config).await?;

        Ok(Self { config, server })
    }

    /// Run the gateway server
    pub async fn run(self) -> Result<()> {
        info!("Starting memgate");
        info!("Configuration: {:?}", self.config);

        self.server.start().await?;

        Ok(())
    }
}

/// Current version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
/// Name of the crate
pub const NAME: &str = env!("CARGO_PKG_NAME");
