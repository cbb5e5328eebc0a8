//! Domain error types for the student registry.
//!
//! Uses thiserror for ergonomic error handling with automatic Display implementations.

use actix_web::{HttpResponse, ResponseError};
use std::fmt;

/// Application-level errors.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Blank required field, malformed mobile number or duplicate serial number
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Resource not found
    #[error("{0} not found")]
    NotFound(String),

    /// The school token does not resolve to any school
    #[error("Invalid school link: {token}")]
    InvalidLink { token: String, redirect: String },

    /// Export requested for a selection with no students
    #[error("No student data available {0}")]
    NoData(String),

    /// Dashboard key missing or wrong
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Operation not permitted in the current view mode
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// A pending submission did not complete in time
    #[error("Submission timed out: {0}")]
    Timeout(String),

    /// CSV serialization failed
    #[error("Export error: {0}")]
    Export(String),
}

impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        let (status, error_code, response_message) = match self {
            AppError::Validation(_) => (
                actix_web::http::StatusCode::BAD_REQUEST,
                "VALIDATION_ERROR",
                self.to_string(),
            ),
            AppError::NotFound(_) => (
                actix_web::http::StatusCode::NOT_FOUND,
                "NOT_FOUND",
                self.to_string(),
            ),
            AppError::InvalidLink { redirect, .. } => {
                return HttpResponse::NotFound().json(InvalidLinkResponse {
                    error: "INVALID_LINK".to_string(),
                    message: self.to_string(),
                    redirect: redirect.clone(),
                });
            }
            AppError::NoData(_) => (
                actix_web::http::StatusCode::NOT_FOUND,
                "NO_DATA",
                self.to_string(),
            ),
            AppError::Unauthorized(_) => (
                actix_web::http::StatusCode::UNAUTHORIZED,
                "UNAUTHORIZED",
                self.to_string(),
            ),
            AppError::Forbidden(_) => (
                actix_web::http::StatusCode::FORBIDDEN,
                "FORBIDDEN",
                self.to_string(),
            ),
            AppError::Timeout(_) => (
                actix_web::http::StatusCode::GATEWAY_TIMEOUT,
                "SUBMISSION_TIMEOUT",
                self.to_string(),
            ),
            AppError::Export(err_str) => {
                tracing::error!("Export error: {}", err_str);
                (
                    actix_web::http::StatusCode::INTERNAL_SERVER_ERROR,
                    "EXPORT_ERROR",
                    "An internal error occurred while exporting".to_string(),
                )
            }
        };

        HttpResponse::build(status).json(ErrorResponse {
            error: error_code.to_string(),
            message: response_message,
        })
    }
}

/// Error response body matching OpenAPI schema.
#[derive(Debug, serde::Serialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

impl fmt::Display for ErrorResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.error, self.message)
    }
}

/// Error body for an unresolvable school link.
///
/// `redirect` points the caller back at the dashboard entry point.
#[derive(Debug, serde::Serialize, utoipa::ToSchema)]
pub struct InvalidLinkResponse {
    pub error: String,
    pub message: String,
    pub redirect: String,
}

/// Convenience type alias for Results with AppError.
pub type AppResult<T> = Result<T, AppError>;

impl From<csv::Error> for AppError {
    fn from(err: csv::Error) -> Self {
        AppError::Export(err.to_string())
    }
}
