// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application error types with consistent API responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Application error type that converts to HTTP responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Authentication required")]
    Unauthorized,

    #[error("Invalid or expired token")]
    InvalidToken,

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Remote service error: {0}")]
    RemoteService(String),

    /// The cascade aborted mid-flight. Dependent records removed by earlier
    /// steps stay removed; the account record is still present.
    #[error("Cascade delete failed: {source}")]
    CascadeDeleteFailed {
        #[source]
        source: Box<AppError>,
    },

    #[error("Database error: {0}")]
    Database(#[from] redb::Error),

    #[error("Transaction error: {0}")]
    DbTransaction(#[from] redb::TransactionError),

    #[error("Table error: {0}")]
    DbTable(#[from] redb::TableError),

    #[error("Storage error: {0}")]
    DbStorage(#[from] redb::StorageError),

    #[error("Commit error: {0}")]
    DbCommit(#[from] redb::CommitError),

    #[error("Serialization error: {0}")]
    Encode(#[from] bincode::error::EncodeError),

    #[error("Deserialization error: {0}")]
    Decode(#[from] bincode::error::DecodeError),

    #[error("Task join error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Wrap the underlying cause of an aborted cascade delete.
    pub fn cascade(source: AppError) -> Self {
        AppError::CascadeDeleteFailed {
            source: Box::new(source),
        }
    }
}

/// JSON error response body
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error, details) = match &self {
            AppError::Unauthorized => (StatusCode::UNAUTHORIZED, "unauthorized", None),
            AppError::InvalidToken => (StatusCode::UNAUTHORIZED, "invalid_token", None),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", Some(msg.clone())),
            AppError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, "bad_request", Some(msg.clone()))
            }
            AppError::Conflict(msg) => (StatusCode::CONFLICT, "conflict", Some(msg.clone())),
            AppError::RemoteService(msg) => (
                StatusCode::BAD_GATEWAY,
                "remote_service_error",
                Some(msg.clone()),
            ),
            AppError::CascadeDeleteFailed { source } => {
                // The response only says the delete did not complete; which
                // steps already ran is log-only information.
                tracing::error!(cause = %source, "Cascade delete failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "cascade_delete_failed",
                    None,
                )
            }
            AppError::Database(e) => {
                tracing::error!(error = %e, "Database error");
                (StatusCode::INTERNAL_SERVER_ERROR, "database_error", None)
            }
            AppError::DbTransaction(e) => {
                tracing::error!(error = %e, "Database transaction error");
                (StatusCode::INTERNAL_SERVER_ERROR, "database_error", None)
            }
            AppError::DbTable(e) => {
                tracing::error!(error = %e, "Database table error");
                (StatusCode::INTERNAL_SERVER_ERROR, "database_error", None)
            }
            AppError::DbStorage(e) => {
                tracing::error!(error = %e, "Database storage error");
                (StatusCode::INTERNAL_SERVER_ERROR, "database_error", None)
            }
            AppError::DbCommit(e) => {
                tracing::error!(error = %e, "Database commit error");
                (StatusCode::INTERNAL_SERVER_ERROR, "database_error", None)
            }
            AppError::Encode(e) => {
                tracing::error!(error = %e, "Serialization error");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", None)
            }
            AppError::Decode(e) => {
                tracing::error!(error = %e, "Deserialization error");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", None)
            }
            AppError::TaskJoin(e) => {
                tracing::error!(error = %e, "Task join error");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", None)
            }
            AppError::Internal(err) => {
                tracing::error!(error = %err, "Internal server error");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", None)
            }
        };

        let body = ErrorResponse {
            error: error.to_string(),
            details,
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for handlers
pub type Result<T> = std::result::Result<T, AppError>;
