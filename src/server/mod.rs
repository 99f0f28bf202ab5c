//! HTTP server implementation
//!
//! The server observes every request through [`middleware::ObservabilityMiddleware`],
//! exposes health and monitoring routes, and forwards memory operations to the
//! upstream memory API.

pub mod middleware;
pub mod routes;
pub mod server;
pub mod state;

pub use server::HttpServer;
pub use state::AppState;
