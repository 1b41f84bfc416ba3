//! Error handling for the Print Shop Management backend
//!
//! Every failure answers with the same envelope as a successful
//! recalculation: a `success` flag and a human readable `message`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use shared::CalculationError;
use thiserror::Error;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Validation errors
    #[error("Validation error: {message}")]
    Validation { field: String, message: String },

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Duplicate entry: {0}")]
    DuplicateEntry(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    // Business logic errors
    #[error("Calculation failed: {0}")]
    Calculation(#[from] CalculationError),

    // Database errors
    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),

    // Internal errors
    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Error response structure
#[derive(Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub message: String,
    pub error: ErrorDetail,
}

#[derive(Serialize)]
pub struct ErrorDetail {
    pub code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl AppError {
    fn status_and_detail(&self) -> (StatusCode, String, ErrorDetail) {
        match self {
            AppError::Validation { field, message } => (
                StatusCode::BAD_REQUEST,
                message.clone(),
                ErrorDetail {
                    code: "VALIDATION_ERROR".to_string(),
                    field: Some(field.clone()),
                },
            ),
            AppError::ValidationError(msg) => (
                StatusCode::BAD_REQUEST,
                msg.clone(),
                ErrorDetail {
                    code: "VALIDATION_ERROR".to_string(),
                    field: None,
                },
            ),
            AppError::DuplicateEntry(field) => (
                StatusCode::CONFLICT,
                format!("A record with this {} already exists", field),
                ErrorDetail {
                    code: "DUPLICATE_ENTRY".to_string(),
                    field: Some(field.clone()),
                },
            ),
            AppError::NotFound(resource) => (
                StatusCode::NOT_FOUND,
                format!("{} not found", resource),
                ErrorDetail {
                    code: "NOT_FOUND".to_string(),
                    field: None,
                },
            ),
            AppError::Calculation(err) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                format!("Failed to recalculate job metrics: {}", err),
                ErrorDetail {
                    code: "CALCULATION_ERROR".to_string(),
                    field: match err {
                        CalculationError::NegativeValue { field, .. } => Some(field.clone()),
                        CalculationError::Overflow(_) => None,
                    },
                },
            ),
            AppError::DatabaseError(err) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("A database error occurred: {}", err),
                ErrorDetail {
                    code: "DATABASE_ERROR".to_string(),
                    field: None,
                },
            ),
            AppError::Internal(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                msg.clone(),
                ErrorDetail {
                    code: "INTERNAL_ERROR".to_string(),
                    field: None,
                },
            ),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message, error) = self.status_and_detail();

        // Log the error for debugging
        if status.is_server_error() {
            tracing::error!("Error: {:?}", self);
        } else {
            tracing::warn!("Request failed: {}", self);
        }

        (
            status,
            Json(ErrorResponse {
                success: false,
                message,
                error,
            }),
        )
            .into_response()
    }
}

/// Result type alias for handlers
pub type AppResult<T> = Result<T, AppError>;
