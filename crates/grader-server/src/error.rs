//! Server error types

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use grader_core::InputError;
use grader_repository::RepositoryError;
use serde_json::json;
use std::fmt;

/// Server error type
#[derive(Debug)]
pub enum ServerError {
    /// Malformed request (bad JSON, wrong content type)
    InvalidRequest(String),

    /// Well-formed request whose content does not fit the exam program
    Validation {
        message: String,
        field: Option<String>,
    },

    /// Caller is not allowed to use the endpoint
    Forbidden(String),

    /// Not found
    NotFound(String),

    /// Record store failure
    StorageError(String),

    /// Internal server error
    InternalError(String),
}

impl ServerError {
    /// Error for a missing exam record
    pub fn entry_not_found() -> Self {
        ServerError::NotFound("Entry not found".to_string())
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ServerError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            ServerError::Validation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            ServerError::Forbidden(_) => StatusCode::FORBIDDEN,
            ServerError::NotFound(_) => StatusCode::NOT_FOUND,
            ServerError::StorageError(_) | ServerError::InternalError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl fmt::Display for ServerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServerError::InvalidRequest(msg) => write!(f, "Invalid request: {}", msg),
            ServerError::Validation { message, .. } => write!(f, "Validation error: {}", message),
            ServerError::Forbidden(msg) => write!(f, "Forbidden: {}", msg),
            ServerError::NotFound(msg) => write!(f, "Not found: {}", msg),
            ServerError::StorageError(msg) => write!(f, "Storage error: {}", msg),
            ServerError::InternalError(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for ServerError {}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let body = match self {
            ServerError::Validation { message, field } => Json(json!({
                "error": message,
                "field": field,
                "status": status.as_u16(),
            })),
            ServerError::StorageError(msg) | ServerError::InternalError(msg) => {
                tracing::error!("Request failed: {}", msg);
                Json(json!({
                    "error": msg,
                    "status": status.as_u16(),
                }))
            }
            ServerError::InvalidRequest(msg)
            | ServerError::Forbidden(msg)
            | ServerError::NotFound(msg) => Json(json!({
                "error": msg,
                "status": status.as_u16(),
            })),
        };

        (status, body).into_response()
    }
}

impl From<InputError> for ServerError {
    fn from(err: InputError) -> Self {
        ServerError::Validation {
            field: Some(err.path().to_string()),
            message: err.to_string(),
        }
    }
}

impl From<RepositoryError> for ServerError {
    fn from(err: RepositoryError) -> Self {
        ServerError::StorageError(err.to_string())
    }
}

impl From<anyhow::Error> for ServerError {
    fn from(err: anyhow::Error) -> Self {
        ServerError::InternalError(err.to_string())
    }
}
