//! Error types for the Bookshelf server

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Message returned when a request body cannot be decoded
pub const INVALID_PAYLOAD: &str = "Invalid request payload";

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Write attempted without a valid bearer token
    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("{0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    /// Primary store failure, displayed verbatim
    #[error("{0}")]
    Database(#[from] sqlx::Error),

    /// Search index failure, displayed verbatim
    #[error("{0}")]
    Search(#[from] meilisearch_sdk::errors::Error),

    #[error("{operation} timed out after {millis}ms")]
    Timeout { operation: String, millis: u128 },

    /// A service failure wrapped with the operation that caused it
    #[error("{0}")]
    Operation(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    /// Wrap a service failure the way handlers report it, e.g. `Failed create book: ...`
    pub fn context(self, operation: &str) -> AppError {
        AppError::Operation(format!("Failed {}: {}", operation, self))
    }
}

/// Error response body
#[derive(Debug, Serialize, serde::Deserialize, PartialEq, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::Forbidden(_) => (StatusCode::FORBIDDEN, self.to_string()),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::NotFound(_) => (StatusCode::NOT_FOUND, self.to_string()),
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Database error".to_string())
            }
            AppError::Search(e) => {
                tracing::error!("Search index error: {:?}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Search index error".to_string())
            }
            AppError::Timeout { .. } => (StatusCode::GATEWAY_TIMEOUT, self.to_string()),
            AppError::Operation(msg) => {
                tracing::warn!("{}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, msg.clone())
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
