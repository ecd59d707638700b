//! Application-wide error type and its HTTP mapping.
//!
//! Every layer (repositories, services, handlers) returns [`AppError`]. Database
//! errors are converted via `From<sqlx::Error>` so repositories can use `?`.

use axum::{
    Json,
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};
use thiserror::Error;

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorInfo,
}

/// Error payload returned to API clients.
#[derive(Debug, Serialize)]
pub struct ErrorInfo {
    pub code: &'static str,
    pub message: String,
    pub details: Value,
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {message}")]
    Validation { message: String, details: Value },

    #[error("Unauthorized: {message}")]
    Unauthorized { message: String, details: Value },

    #[error("Forbidden: {message}")]
    Forbidden { message: String, details: Value },

    #[error("Not found: {message}")]
    NotFound { message: String, details: Value },

    #[error("Conflict: {message}")]
    Conflict { message: String, details: Value },

    #[error("Service unavailable: {message}")]
    Unavailable { message: String, details: Value },

    #[error("Internal error: {message}")]
    Internal { message: String, details: Value },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }
    pub fn unauthorized(message: impl Into<String>, details: Value) -> Self {
        Self::Unauthorized {
            message: message.into(),
            details,
        }
    }
    pub fn forbidden(message: impl Into<String>, details: Value) -> Self {
        Self::Forbidden {
            message: message.into(),
            details,
        }
    }
    pub fn not_found(message: impl Into<String>, details: Value) -> Self {
        Self::NotFound {
            message: message.into(),
            details,
        }
    }
    pub fn conflict(message: impl Into<String>, details: Value) -> Self {
        Self::Conflict {
            message: message.into(),
            details,
        }
    }
    pub fn unavailable(message: impl Into<String>, details: Value) -> Self {
        Self::Unavailable {
            message: message.into(),
            details,
        }
    }
    pub fn internal(message: impl Into<String>, details: Value) -> Self {
        Self::Internal {
            message: message.into(),
            details,
        }
    }

    /// Stable machine-readable code for the error kind.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Validation { .. } => "validation_error",
            AppError::Unauthorized { .. } => "unauthorized",
            AppError::Forbidden { .. } => "forbidden",
            AppError::NotFound { .. } => "not_found",
            AppError::Conflict { .. } => "conflict",
            AppError::Unavailable { .. } => "service_unavailable",
            AppError::Internal { .. } => "internal_error",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation { .. } => StatusCode::BAD_REQUEST,
            AppError::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            AppError::Forbidden { .. } => StatusCode::FORBIDDEN,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Conflict { .. } => StatusCode::CONFLICT,
            AppError::Unavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Converts the error into the payload used in API responses.
    pub fn into_info(self) -> ErrorInfo {
        let code = self.code();
        let (message, details) = match self {
            AppError::Validation { message, details }
            | AppError::Unauthorized { message, details }
            | AppError::Forbidden { message, details }
            | AppError::NotFound { message, details }
            | AppError::Conflict { message, details }
            | AppError::Unavailable { message, details }
            | AppError::Internal { message, details } => (message, details),
        };

        ErrorInfo {
            code,
            message,
            details,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let is_unauthorized = matches!(self, AppError::Unauthorized { .. });

        let body = ErrorBody {
            error: self.into_info(),
        };

        let mut response = (status, Json(body)).into_response();

        // RFC 6750
        if is_unauthorized {
            response
                .headers_mut()
                .insert(header::WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
        }

        response
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        map_sqlx_error(e)
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let details = serde_json::to_value(errors.field_errors()).unwrap_or_else(|_| json!({}));
        AppError::bad_request("Request validation failed", details)
    }
}

pub fn map_sqlx_error(e: sqlx::Error) -> AppError {
    if let sqlx::Error::RowNotFound = e {
        return AppError::not_found("Record not found", json!({}));
    }

    if let Some(db) = e.as_database_error() {
        if db.is_unique_violation() {
            return AppError::conflict(
                "Unique constraint violation",
                json!({ "constraint": db.constraint() }),
            );
        }
        if db.is_foreign_key_violation() {
            return AppError::bad_request(
                "Referenced record does not exist",
                json!({ "constraint": db.constraint() }),
            );
        }
    }

    tracing::error!("Database error: {}", e);
    AppError::internal("Database error", json!({}))
}
