use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use std::fmt;
use tracing::{error, warn};

use crate::api::validation::ErrorResponse;
use crate::notify::NotifyError;

/// Service-level errors
#[derive(Debug)]
pub enum ServiceError {
    /// Database operation failed
    Database(sqlx::Error),

    /// Application email could not be composed or delivered
    Notification(NotifyError),

    /// Validation failed
    Validation(String),

    /// Job not found
    NotFound(i64),
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServiceError::Database(e) => write!(f, "Database error: {}", e),
            ServiceError::Notification(e) => write!(f, "Notification error: {}", e),
            ServiceError::Validation(msg) => write!(f, "Validation error: {}", msg),
            ServiceError::NotFound(id) => write!(f, "Job not found with ID: {}", id),
        }
    }
}

impl std::error::Error for ServiceError {}

impl ResponseError for ServiceError {
    fn status_code(&self) -> StatusCode {
        match self {
            ServiceError::Database(_) | ServiceError::Notification(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            ServiceError::Validation(_) => StatusCode::BAD_REQUEST,
            ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            ServiceError::Database(_) | ServiceError::Notification(_) => {
                error!("An unexpected error occurred: {}", self);
                HttpResponse::InternalServerError().json(ErrorResponse {
                    error: "An unexpected error occurred".to_string(),
                    fields: serde_json::json!({"message": self.to_string()}),
                })
            }
            ServiceError::Validation(msg) => {
                warn!("Validation error: {}", msg);
                HttpResponse::BadRequest().json(ErrorResponse {
                    error: "Validation failed".to_string(),
                    fields: serde_json::json!({"message": msg}),
                })
            }
            ServiceError::NotFound(_) => {
                warn!("{}", self);
                HttpResponse::NotFound().json(ErrorResponse {
                    error: "Not found".to_string(),
                    fields: serde_json::json!({"message": self.to_string()}),
                })
            }
        }
    }
}
