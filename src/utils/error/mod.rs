//! Error handling for the metering gateway
//!
//! The metering core never fails on bad input; these errors cover config
//! loading, pricing tables and the HTTP surface.

mod helpers;
mod response;
mod types;

pub use response::{ErrorDetail, ErrorResponse};
pub use types::{MeterError, Result};
