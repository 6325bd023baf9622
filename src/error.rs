//! Error types for the Coalición server

use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use axum_extra::extract::multipart::MultipartError;
use serde::Serialize;
use thiserror::Error;

/// SQLSTATE raised by PostgreSQL on a unique index violation
const UNIQUE_VIOLATION: &str = "23505";
/// SQLSTATE raised by PostgreSQL on a foreign key violation
const FOREIGN_KEY_VIOLATION: &str = "23503";

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Error while {operation} in {table}: {source}")]
    Repository {
        table: &'static str,
        operation: &'static str,
        #[source]
        source: sqlx::Error,
    },

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    /// Wrap a store error with the table and operation it came from.
    ///
    /// Unique and foreign key violations are classified from the SQLSTATE code
    /// so they surface as 409 and 400 instead of a generic 500.
    pub fn from_store(table: &'static str, operation: &'static str, source: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db) = &source {
            match db.code().as_deref() {
                Some(UNIQUE_VIOLATION) => {
                    return AppError::Conflict(format!(
                        "A record with these unique values already exists in {}: {}",
                        table,
                        db.message()
                    ));
                }
                Some(FOREIGN_KEY_VIOLATION) => {
                    return AppError::Validation(format!(
                        "Referenced record does not exist: {}",
                        db.message()
                    ));
                }
                _ => {}
            }
        }
        AppError::Repository {
            table,
            operation,
            source,
        }
    }

    fn status_and_message(&self) -> (StatusCode, &'static str) {
        match self {
            AppError::NotFound(_) => (StatusCode::NOT_FOUND, "Record not found"),
            AppError::Validation(_) => (StatusCode::BAD_REQUEST, "Invalid request"),
            AppError::Conflict(_) => {
                (StatusCode::CONFLICT, "A record with these unique values already exists")
            }
            AppError::Forbidden(_) => (StatusCode::FORBIDDEN, "Access denied"),
            AppError::Repository { .. }
            | AppError::Database(_)
            | AppError::Io(_)
            | AppError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error"),
        }
    }
}

/// Error response body, the failure side of the response envelope
#[derive(Serialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub success: bool,
    pub message: String,
    pub error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, summary) = self.status_and_message();

        if status.is_server_error() {
            tracing::error!("{}", self);
        }

        // Client errors carry their own explanation as the message
        let (message, error) = match &self {
            AppError::NotFound(msg) | AppError::Validation(msg) | AppError::Forbidden(msg) => {
                (msg.clone(), msg.clone())
            }
            other => (summary.to_string(), other.to_string()),
        };

        let body = Json(ErrorResponse {
            success: false,
            message,
            error,
        });

        (status, body).into_response()
    }
}

impl From<MultipartError> for AppError {
    fn from(error: MultipartError) -> Self {
        AppError::Validation(error.body_text())
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let messages: Vec<String> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |e| match &e.message {
                    Some(msg) => msg.to_string(),
                    None => format!("{} is invalid", field),
                })
            })
            .collect();
        AppError::Validation(messages.join("; "))
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
