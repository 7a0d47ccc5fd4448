//! Application error taxonomy shared across all layers.
//!
//! Every error crossing the core boundary is one of these tagged variants,
//! so callers can pattern-match and render specific responses instead of
//! unwinding opaque exceptions.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorInfo,
}

/// Machine-readable error payload rendered to API callers.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorInfo {
    pub code: &'static str,
    pub message: String,
    pub details: Value,
}

/// Typed application error.
///
/// - `Validation` — malformed caller input (bad code format, out-of-range
///   expiry or click limit); correctable by the caller.
/// - `CodeTaken` — `(domain, code)` uniqueness violation at creation time,
///   whether detected by the advisory pre-check or by the storage
///   constraint when a concurrent create wins the race.
/// - `LimitExceeded` — a plan ceiling was reached; rendered with an
///   upgrade hint rather than a generic failure.
/// - `Forbidden` — the requester lacks the role or ownership for a
///   mutation. Never discloses whether the resource exists when the
///   requester has no relationship to it.
/// - `NotFound` — resource absent, or intentionally indistinguishable
///   from "exists but unavailable" on public paths.
#[derive(Debug)]
pub enum AppError {
    Validation { message: String, details: Value },
    Unauthorized { message: String, details: Value },
    Forbidden { message: String, details: Value },
    NotFound { message: String, details: Value },
    CodeTaken { message: String, details: Value },
    Conflict { message: String, details: Value },
    LimitExceeded { message: String, details: Value },
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
    pub fn code_taken(message: impl Into<String>, details: Value) -> Self {
        Self::CodeTaken {
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
    pub fn limit_exceeded(message: impl Into<String>, details: Value) -> Self {
        Self::LimitExceeded {
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

    fn parts(self) -> (StatusCode, &'static str, String, Value) {
        match self {
            AppError::Validation { message, details } => (
                StatusCode::BAD_REQUEST,
                "validation_error",
                message,
                details,
            ),
            AppError::Unauthorized { message, details } => {
                (StatusCode::UNAUTHORIZED, "unauthorized", message, details)
            }
            AppError::Forbidden { message, details } => {
                (StatusCode::FORBIDDEN, "forbidden", message, details)
            }
            AppError::NotFound { message, details } => {
                (StatusCode::NOT_FOUND, "not_found", message, details)
            }
            AppError::CodeTaken { message, details } => {
                (StatusCode::CONFLICT, "code_taken", message, details)
            }
            AppError::Conflict { message, details } => {
                (StatusCode::CONFLICT, "conflict", message, details)
            }
            AppError::LimitExceeded { message, details } => {
                (StatusCode::FORBIDDEN, "limit_exceeded", message, details)
            }
            AppError::Internal { message, details } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal_error",
                message,
                details,
            ),
        }
    }

    /// Serializable error payload for embedding in batch responses.
    pub fn to_error_info(&self) -> ErrorInfo {
        let (code, message, details) = match self {
            AppError::Validation { message, details } => ("validation_error", message, details),
            AppError::Unauthorized { message, details } => ("unauthorized", message, details),
            AppError::Forbidden { message, details } => ("forbidden", message, details),
            AppError::NotFound { message, details } => ("not_found", message, details),
            AppError::CodeTaken { message, details } => ("code_taken", message, details),
            AppError::Conflict { message, details } => ("conflict", message, details),
            AppError::LimitExceeded { message, details } => ("limit_exceeded", message, details),
            AppError::Internal { message, details } => ("internal_error", message, details),
        };
        ErrorInfo {
            code,
            message: message.clone(),
            details: details.clone(),
        }
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let info = self.to_error_info();
        write!(f, "{}: {}", info.code, info.message)
    }
}

impl std::error::Error for AppError {}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message, details) = self.parts();

        if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(%message, "internal error");
        }

        let body = ErrorBody {
            error: ErrorInfo {
                code,
                message,
                details,
            },
        };

        (status, Json(body)).into_response()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        map_sqlx_error(e)
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(e: validator::ValidationErrors) -> Self {
        AppError::bad_request(
            "Request validation failed",
            serde_json::to_value(&e).unwrap_or_else(|_| json!({})),
        )
    }
}

/// Translates database errors at the store boundary.
///
/// Unique violations become [`AppError::CodeTaken`] so a lost create race
/// surfaces the same way as a failed advisory pre-check.
pub fn map_sqlx_error(e: sqlx::Error) -> AppError {
    if let Some(db) = e.as_database_error() {
        if db.is_unique_violation() {
            return AppError::code_taken(
                "Unique constraint violation",
                json!({ "constraint": db.constraint() }),
            );
        }
    }

    tracing::error!(error = %e, "database error");
    AppError::internal("Database error", json!({}))
}
