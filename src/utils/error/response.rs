//! HTTP response handling for errors

use super::types::MeterError;
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};

impl ResponseError for MeterError {
    fn status_code(&self) -> StatusCode {
        match self {
            MeterError::Validation(_) => StatusCode::BAD_REQUEST,
            MeterError::Upstream(_) => StatusCode::BAD_GATEWAY,
            MeterError::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let (error_code, message) = match self {
            MeterError::Config(_) => ("CONFIG_ERROR", self.to_string()),
            MeterError::Validation(_) => ("VALIDATION_ERROR", self.to_string()),
            MeterError::Upstream(_) => ("UPSTREAM_ERROR", self.to_string()),
            MeterError::Unavailable(_) => ("SERVICE_UNAVAILABLE", self.to_string()),
            _ => ("INTERNAL_ERROR", "An internal error occurred".to_string()),
        };

        let error_response = ErrorResponse {
            error: ErrorDetail {
                code: error_code.to_string(),
                message,
                timestamp: chrono::Utc::now().timestamp(),
            },
        };

        HttpResponse::build(self.status_code()).json(error_response)
    }
}

/// Standard error response format
#[derive(serde::Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

/// Error detail structure
#[derive(serde::Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    pub timestamp: i64,
}
