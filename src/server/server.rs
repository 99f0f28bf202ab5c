//! HTTP server core implementation

use crate::config::{Config, ServerConfig};
use crate::server::middleware::ObservabilityMiddleware;
use crate::server::routes;
use crate::server::state::AppState;
use crate::utils::error::{MeterError, Result};
use actix_cors::Cors;
use actix_web::{
    App, HttpServer as ActixHttpServer,
    middleware::{Condition, DefaultHeaders},
    web,
};
use std::sync::Arc;
use tracing::info;

/// HTTP server
pub struct HttpServer {
    /// Server configuration
    config: ServerConfig,
    /// Application state
    state: AppState,
}

impl HttpServer {
    /// Create a new HTTP server
    pub async fn new(config: &Config) -> Result<Self> {
        info!("Creating HTTP server");

        let state = AppState::from_config(config.clone()).await?;

        Ok(Self {
            config: config.server().clone(),
            state,
        })
    }

    /// Create the Actix-web application
    pub fn create_app(
        state: web::Data<AppState>,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        let monitoring_enabled = state.config.monitoring().enabled;
        let cors_enabled = state.config.server().cors_enabled;
        let observability = ObservabilityMiddleware::new(
            Arc::clone(&state.collector),
            state.config.monitoring().max_inspected_body_bytes,
        );

        App::new()
            .app_data(state)
            .wrap(Condition::new(monitoring_enabled, observability))
            .wrap(Condition::new(cors_enabled, Cors::permissive()))
            .wrap(DefaultHeaders::new().add(("Server", crate::NAME)))
            .configure(routes::health::configure_routes)
            .configure(routes::memories::configure_routes)
    }

    /// Start the HTTP server
    pub async fn start(self) -> Result<()> {
        let bind_addr = self.config.bind_addr();

        info!("Starting HTTP server on {}", bind_addr);
        if !self.state.config.monitoring().enabled {
            info!("Request observation disabled");
        }

        let state = web::Data::new(self.state);

        let mut server = ActixHttpServer::new(move || Self::create_app(state.clone()));
        if let Some(workers) = self.config.workers {
            server = server.workers(workers);
        }

        let server = server
            .bind(&bind_addr)
            .map_err(|e| Self::format_bind_error(e, &bind_addr))?
            .run();

        info!("HTTP server listening on {}", bind_addr);

        server
            .await
            .map_err(|e| MeterError::internal(format!("Server error: {}", e)))?;

        info!("HTTP server stopped");
        Ok(())
    }

    fn format_bind_error(e: std::io::Error, bind_addr: &str) -> MeterError {
        if e.kind() == std::io::ErrorKind::AddrInUse {
            MeterError::config(format!(
                "Address {} is already in use; pick another port with --port or MEMGATE_PORT",
                bind_addr
            ))
        } else {
            MeterError::config(format!("Failed to bind to {}: {}", bind_addr, e))
        }
    }

    /// Get server configuration
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Get application state
    pub fn state(&self) -> &AppState {
        &self.state
    }
}
