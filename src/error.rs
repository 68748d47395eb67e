use axum::{Json, http::StatusCode, response::IntoResponse};
use serde::Serialize;
use serde_json::json;
use std::fmt;
use thiserror::Error as ThisError;
use tracing::error;

use crate::config::global_error_logging;
use crate::service::credential_store::HashError;

/// Coarse classification of a store failure, used by callers to pick a status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StoreErrorKind {
    UniqueViolation,
    FkViolation,
    NotFound,
    EngineError,
}

impl StoreErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::UniqueViolation => "UNIQUE_VIOLATION",
            Self::FkViolation => "FK_VIOLATION",
            Self::NotFound => "NOT_FOUND",
            Self::EngineError => "ENGINE_ERROR",
        }
    }
}

impl fmt::Display for StoreErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failure raised by the data-access layer, carrying the engine's own message.
#[derive(Debug, ThisError)]
#[error("{kind}: {message}")]
pub struct StoreError {
    pub kind: StoreErrorKind,
    pub message: String,
}

impl StoreError {
    pub fn new(kind: StoreErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn engine(message: impl Into<String>) -> Self {
        Self::new(StoreErrorKind::EngineError, message)
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        let kind = match &err {
            sqlx::Error::RowNotFound => StoreErrorKind::NotFound,
            sqlx::Error::Database(db) => match db.kind() {
                sqlx::error::ErrorKind::UniqueViolation => StoreErrorKind::UniqueViolation,
                sqlx::error::ErrorKind::ForeignKeyViolation => StoreErrorKind::FkViolation,
                _ => StoreErrorKind::EngineError,
            },
            _ => StoreErrorKind::EngineError,
        };
        Self::new(kind, err.to_string())
    }
}

#[derive(Debug, ThisError)]
pub enum ApiError {
    #[error("validation failed: {0:?}")]
    Validation(Vec<String>),

    #[error("access denied")]
    Unauthenticated,

    #[error("forbidden: {0}")]
    Forbidden(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("conflict: {0}")]
    Conflict(String),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<HashError> for ApiError {
    fn from(e: HashError) -> Self {
        ApiError::Internal(e.to_string())
    }
}

impl From<tokio::task::JoinError> for ApiError {
    fn from(e: tokio::task::JoinError) -> Self {
        ApiError::Internal(format!("blocking task failed: {e}"))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, body) = match self {
            ApiError::Validation(errors) => (StatusCode::BAD_REQUEST, json!({ "errors": errors })),
            ApiError::Unauthenticated => {
                (StatusCode::UNAUTHORIZED, json!({ "message": "Access Denied" }))
            }
            ApiError::Forbidden(message) => (StatusCode::FORBIDDEN, json!({ "message": message })),
            ApiError::NotFound(message) => (StatusCode::NOT_FOUND, json!({ "message": message })),
            ApiError::Conflict(message) => (StatusCode::CONFLICT, json!({ "errors": message })),
            err @ (ApiError::Store(_) | ApiError::Internal(_)) => {
                if global_error_logging() {
                    error!(error = %err, "Global error handler");
                }
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({
                        "message": "An internal server error occurred.",
                        "error": {}
                    }),
                )
            }
        };
        (status, Json(body)).into_response()
    }
}
