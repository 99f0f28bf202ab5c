//! Cost calculation and model call logging

use super::types::PricingTable;
use crate::utils::logging::{LogLevel, emit_json_line};
use crate::utils::round_to;
use serde::Serialize;
use std::time::Duration;

const TOKENS_PER_UNIT: f64 = 1_000_000.0;

/// A completed call to a priced model
#[derive(Debug, Clone)]
pub struct ModelCall<'a> {
    pub operation: &'a str,
    pub model: &'a str,
    pub input_tokens: u64,
    pub output_tokens: u64,
    pub duration: Duration,
    pub success: bool,
    pub error: Option<&'a str>,
}

#[derive(Serialize)]
struct ModelCallLog<'a> {
    timestamp: chrono::DateTime<chrono::Utc>,
    service: &'static str,
    operation: &'a str,
    model: &'a str,
    input_tokens: u64,
    output_tokens: u64,
    total_tokens: u64,
    duration_ms: f64,
    cost_usd: f64,
    success: bool,
    error: Option<&'a str>,
}

impl PricingTable {
    /// Cost in USD of a call with the given token counts.
    ///
    /// Unknown models are priced as the default model. The result is not
    /// rounded.
    pub fn calculate_cost(&self, model: &str, input_tokens: u64, output_tokens: u64) -> f64 {
        let pricing = self.pricing_for(model);

        let input_cost = (input_tokens as f64 / TOKENS_PER_UNIT) * pricing.input;
        let output_cost = (output_tokens as f64 / TOKENS_PER_UNIT) * pricing.output;

        input_cost + output_cost
    }

    /// Emit one structured line for `call` and return `(cost, total_tokens)`
    pub fn log_model_call(&self, call: &ModelCall<'_>) -> (f64, u64) {
        let cost = self.calculate_cost(call.model, call.input_tokens, call.output_tokens);
        let total_tokens = call.input_tokens + call.output_tokens;

        emit_json_line(
            LogLevel::Info,
            &ModelCallLog {
                timestamp: chrono::Utc::now(),
                service: "openai",
                operation: call.operation,
                model: call.model,
                input_tokens: call.input_tokens,
                output_tokens: call.output_tokens,
                total_tokens,
                duration_ms: round_to(call.duration.as_secs_f64() * 1000.0, 2),
                cost_usd: round_to(cost, 6),
                success: call.success,
                error: call.error,
            },
        );

        (cost, total_tokens)
    }
}
