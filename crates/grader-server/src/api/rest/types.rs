//! REST API type definitions
//!
//! Application state and response types for the REST API endpoints.

use grader_core::ExamCalculator;
use grader_repository::RecordRepository;
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::Notify;

/// Application state
#[derive(Clone)]
pub struct AppState {
    pub calculator: ExamCalculator,
    pub repository: Arc<dyn RecordRepository>,
    /// Signalled by `POST /shutdown`
    pub shutdown: Arc<Notify>,
}

impl AppState {
    pub fn new(calculator: ExamCalculator, repository: Arc<dyn RecordRepository>) -> Self {
        Self {
            calculator,
            repository,
            shutdown: Arc::new(Notify::new()),
        }
    }
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Plain message response
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Message plus payload, as returned by the write endpoints
#[derive(Debug, Serialize)]
pub struct DataResponse<T> {
    pub message: String,
    pub data: T,
}

impl<T> DataResponse<T> {
    pub fn new(message: impl Into<String>, data: T) -> Self {
        Self {
            message: message.into(),
            data,
        }
    }
}
