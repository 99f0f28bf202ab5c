//! Model cost estimation
//!
//! A static per-model pricing table (USD per million tokens) with a designated
//! fallback entry, plus helpers that log and meter individual model calls.

mod calculator;
mod tracker;
mod types;

pub use calculator::ModelCall;
pub use tracker::ModelCallTracker;
pub use types::{ModelPricing, PricingTable};
