//! Error types for Caserne EPI server

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Numeric error codes carried in every error body
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum ErrorCode {
    Success = 0,
    Failure = 1,
    DbFailure = 2,
    CacheFailure = 3,
    NoSuchData = 4,
    NoSuchEquipment = 5,
    NoSuchPersonnel = 6,
    NoSuchVerification = 7,
    BadValue = 8,
    Duplicate = 9,
}

/// Which kind of entity could not be found
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Missing {
    Equipment,
    Personnel,
    Verification,
    Other,
}

impl From<Missing> for ErrorCode {
    fn from(m: Missing) -> Self {
        match m {
            Missing::Equipment => ErrorCode::NoSuchEquipment,
            Missing::Personnel => ErrorCode::NoSuchPersonnel,
            Missing::Verification => ErrorCode::NoSuchVerification,
            Missing::Other => ErrorCode::NoSuchData,
        }
    }
}

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Not found: {1}")]
    NotFound(Missing, String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Cache error: {0}")]
    Cache(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn equipment_not_found(what: impl std::fmt::Display) -> Self {
        AppError::NotFound(Missing::Equipment, format!("Equipment {} not found", what))
    }

    pub fn personnel_not_found(what: impl std::fmt::Display) -> Self {
        AppError::NotFound(Missing::Personnel, format!("Personnel {} not found", what))
    }

    pub fn verification_not_found(what: impl std::fmt::Display) -> Self {
        AppError::NotFound(Missing::Verification, format!("Verification {} not found", what))
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        AppError::NotFound(Missing::Other, message.into())
    }

    /// Turn a unique-constraint violation into a `Conflict`, leave other errors as-is
    pub fn on_unique_violation(err: sqlx::Error, message: impl Into<String>) -> Self {
        let unique = err
            .as_database_error()
            .map(|db| db.is_unique_violation())
            .unwrap_or(false);
        if unique {
            AppError::Conflict(message.into())
        } else {
            AppError::Database(err)
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::Validation(errors.to_string())
    }
}

/// Error response body
#[derive(Serialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub code: u32,
    pub error: String,
    pub message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotFound(missing, msg) => {
                (StatusCode::NOT_FOUND, ErrorCode::from(*missing), msg.clone())
            }
            AppError::Validation(msg) => {
                (StatusCode::BAD_REQUEST, ErrorCode::BadValue, msg.clone())
            }
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorCode::DbFailure,
                    "Database error".to_string(),
                )
            }
            AppError::Cache(msg) => {
                tracing::error!("Cache error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorCode::CacheFailure,
                    "Cache error".to_string(),
                )
            }
            AppError::Conflict(msg) => {
                (StatusCode::CONFLICT, ErrorCode::Duplicate, msg.clone())
            }
            AppError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, ErrorCode::BadValue, msg.clone())
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorCode::Failure,
                    "Internal server error".to_string(),
                )
            }
        };

        let body = Json(ErrorResponse {
            code: code as u32,
            error: format!("{:?}", code),
            message,
        });

        (status, body).into_response()
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
