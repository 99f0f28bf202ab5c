//! Shared utilities: error types, structured logging and numeric helpers

pub mod error;
pub mod logging;

/// Round `value` to `decimals` places for presentation
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}
