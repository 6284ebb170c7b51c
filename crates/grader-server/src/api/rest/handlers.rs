//! API endpoint handlers
//!
//! HTTP request handlers for all REST API endpoints.

use super::extractors::JsonExtractor;
use super::types::*;
use crate::error::ServerError;
use axum::{
    extract::{ConnectInfo, Path, State},
    Json,
};
use grader_core::{ExamOutcome, ExamProgram};
use grader_repository::{record_id, Record};
use serde_json::Value;
use std::net::SocketAddr;
use tracing::{info, warn};

/// Validate a submitted record and bring it into canonical form
fn canonical_record(state: &AppState, payload: &Value) -> Result<Record, ServerError> {
    let sheet = state.calculator.read_sheet(payload)?;
    Ok(sheet.to_record(state.calculator.program()))
}

/// Root endpoint
pub(super) async fn root() -> Json<MessageResponse> {
    Json(MessageResponse::new("Exam grader is running"))
}

/// Health check endpoint
pub(super) async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Store a new exam record
pub(super) async fn save_exam(
    State(state): State<AppState>,
    JsonExtractor(payload): JsonExtractor<Value>,
) -> Result<Json<DataResponse<Record>>, ServerError> {
    let record = canonical_record(&state, &payload)?;
    let saved = state.repository.save(record).await?;
    info!("Saved exam record {}", record_id(&saved).unwrap_or_default());

    Ok(Json(DataResponse::new("Numbers saved successfully!", saved)))
}

/// List all exam records
pub(super) async fn list_exams(
    State(state): State<AppState>,
) -> Result<Json<Vec<Record>>, ServerError> {
    Ok(Json(state.repository.load_all().await?))
}

/// Fetch one exam record
pub(super) async fn get_exam(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Record>, ServerError> {
    state
        .repository
        .get_by_id(&id)
        .await?
        .map(Json)
        .ok_or_else(ServerError::entry_not_found)
}

/// Replace an exam record, keeping its id
pub(super) async fn update_exam(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonExtractor(payload): JsonExtractor<Value>,
) -> Result<Json<DataResponse<Record>>, ServerError> {
    let record = canonical_record(&state, &payload)?;
    let updated = state
        .repository
        .update_by_id(&id, record)
        .await?
        .ok_or_else(ServerError::entry_not_found)?;
    info!("Updated exam record {}", id);

    Ok(Json(DataResponse::new("Entry updated successfully", updated)))
}

/// Delete an exam record
pub(super) async fn delete_exam(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ServerError> {
    if !state.repository.delete_by_id(&id).await? {
        return Err(ServerError::entry_not_found());
    }
    info!("Deleted exam record {}", id);

    Ok(Json(MessageResponse::new("Entry deleted successfully")))
}

/// Grade a submitted record without storing it
pub(super) async fn calculate_exam(
    State(state): State<AppState>,
    JsonExtractor(payload): JsonExtractor<Value>,
) -> Result<Json<ExamOutcome>, ServerError> {
    Ok(Json(state.calculator.calculate_record(&payload)?))
}

/// Grade a stored record
pub(super) async fn calculate_stored_exam(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DataResponse<ExamOutcome>>, ServerError> {
    let record = state
        .repository
        .get_by_id(&id)
        .await?
        .ok_or_else(ServerError::entry_not_found)?;
    let outcome = state.calculator.calculate_record(&Value::Object(record))?;

    Ok(Json(DataResponse::new("Entry calculated successfully", outcome)))
}

/// Active exam program definition
pub(super) async fn get_program(State(state): State<AppState>) -> Json<ExamProgram> {
    Json(state.calculator.program().clone())
}

/// Request a graceful shutdown. Only loopback clients may do this.
pub(super) async fn shutdown(
    State(state): State<AppState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
) -> Result<Json<MessageResponse>, ServerError> {
    if !addr.ip().is_loopback() {
        warn!("Rejected shutdown request from {}", addr);
        return Err(ServerError::Forbidden("Forbidden".to_string()));
    }

    info!("Shutdown requested by {}", addr);
    state.shutdown.notify_one();
    Ok(Json(MessageResponse::new("Server shutting down")))
}
