//! Metering of individual model calls

use super::calculator::ModelCall;
use super::types::PricingTable;
use crate::monitoring::{MetricsCollector, RequestRecord};
use crate::utils::logging::log_structured;
use crate::utils::round_to;
use serde_json::json;
use std::time::Instant;

/// Tracks one in-flight model call and meters it on completion.
///
/// Completed and failed calls are both recorded in the collector under the
/// endpoint `openai.<operation>`.
#[derive(Debug)]
pub struct ModelCallTracker<'a> {
    collector: &'a MetricsCollector,
    pricing: &'a PricingTable,
    operation: String,
    model: String,
    started: Instant,
}

impl<'a> ModelCallTracker<'a> {
    /// Start timing a call
    pub fn start(
        collector: &'a MetricsCollector,
        pricing: &'a PricingTable,
        operation: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        let operation = operation.into();
        let model = model.into();

        log_structured(
            "info",
            &format!("Starting model operation: {}", operation),
            json!({ "operation": operation, "model": model }),
        );

        Self {
            collector,
            pricing,
            operation,
            model,
            started: Instant::now(),
        }
    }

    /// Endpoint key used for this call in the collector
    pub fn endpoint(&self) -> String {
        format!("openai.{}", self.operation)
    }

    /// Finish a successful call and return its cost in USD
    pub fn finish(self, input_tokens: u64, output_tokens: u64) -> f64 {
        let duration = self.started.elapsed();
        let (cost, total_tokens) = self.pricing.log_model_call(&ModelCall {
            operation: &self.operation,
            model: &self.model,
            input_tokens,
            output_tokens,
            duration,
            success: true,
            error: None,
        });

        self.collector.record_request(
            RequestRecord::new(self.endpoint(), duration, true)
                .with_tokens(total_tokens)
                .with_cost(cost)
                .with_metadata(json!({ "model": self.model, "operation": self.operation })),
        );

        cost
    }

    /// Finish a failed call
    pub fn fail(self, error: impl Into<String>) {
        let duration = self.started.elapsed();
        let error = error.into();

        log_structured(
            "error",
            &format!("Model operation failed: {}", self.operation),
            json!({
                "operation": self.operation,
                "error": error,
                "duration_ms": round_to(duration.as_secs_f64() * 1000.0, 2),
            }),
        );

        self.collector.record_request(
            RequestRecord::new(self.endpoint(), duration, false)
                .with_error(error)
                .with_metadata(json!({ "model": self.model, "operation": self.operation })),
        );
    }
}
