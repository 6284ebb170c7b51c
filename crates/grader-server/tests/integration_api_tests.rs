//! Integration tests for REST API endpoints
//!
//! These tests build the real router over a calculator and a record store and
//! drive it end-to-end with `oneshot` requests.

use axum::{
    body::Body,
    extract::connect_info::MockConnectInfo,
    http::{Request, StatusCode},
    Router,
};
use grader_core::{ExamCalculator, ExamProgram};
use grader_repository::{JsonFileRepository, MemoryRepository, RecordRepository};
use grader_server::api::{create_router, rest::AppState};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::sync::Arc;
use tempfile::TempDir;
use tower::ServiceExt;

fn loopback() -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], 40000))
}

fn test_state() -> AppState {
    AppState::new(ExamCalculator::default(), Arc::new(MemoryRepository::new()))
}

fn test_router(state: AppState) -> Router {
    create_router(state).layer(MockConnectInfo(loopback()))
}

fn valid_payload() -> Value {
    json!({
        "Name": "test name",
        "AP1": 90,
        "ap2": {
            "planning": {"main": 80, "extra": 70},
            "development": {"main": 85},
            "economy": {"main": 95, "extra": 95}
        },
        "pw": {"project": 90, "presentation": 90}
    })
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(&body).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).unwrap()
    };
    (status, json)
}

async fn save(app: &Router, payload: Value) -> String {
    let (status, json) = send(app, "POST", "/exam/save", Some(payload)).await;
    assert_eq!(status, StatusCode::OK);
    json["data"]["id"].as_str().unwrap().to_string()
}

// =============================================================================
// Service endpoints
// =============================================================================

#[tokio::test]
async fn test_health_endpoint() {
    let app = test_router(test_state());

    let (status, json) = send(&app, "GET", "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "ok");
    assert!(json["version"].is_string());
}

#[tokio::test]
async fn test_root_endpoint() {
    let app = test_router(test_state());

    let (status, json) = send(&app, "GET", "/", None).await;

    assert_eq!(status, StatusCode::OK);
    assert!(json["message"].is_string());
}

#[tokio::test]
async fn test_program_endpoint() {
    let app = test_router(test_state());

    let (status, json) = send(&app, "GET", "/exam/program", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["id"], "ae-project-work");
    assert_eq!(json["components"].as_array().unwrap().len(), 3);
    assert_eq!(json["rules"]["pass_mark"], 50);
}

#[tokio::test]
async fn test_shutdown_from_loopback() {
    let state = test_state();
    let shutdown = state.shutdown.clone();
    let app = test_router(state);

    let (status, json) = send(&app, "POST", "/shutdown", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["message"], "Server shutting down");
    // The stored permit resolves immediately
    tokio::time::timeout(std::time::Duration::from_secs(1), shutdown.notified())
        .await
        .unwrap();
}

#[tokio::test]
async fn test_shutdown_from_remote_is_forbidden() {
    let app = create_router(test_state()).layer(MockConnectInfo(SocketAddr::from((
        [192, 168, 1, 20],
        40000,
    ))));

    let (status, json) = send(&app, "POST", "/shutdown", None).await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(json["status"], 403);
}

// =============================================================================
// Record CRUD
// =============================================================================

#[tokio::test]
async fn test_save_returns_canonical_record() {
    let app = test_router(test_state());

    let (status, json) = send(&app, "POST", "/exam/save", Some(valid_payload())).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["message"], "Numbers saved successfully!");
    let data = &json["data"];
    assert!(data["id"].is_string());
    assert_eq!(data["name"], "test name");
    assert_eq!(data["AP1"], 90);
    assert_eq!(data["AP2"]["development"], json!({"main": 85, "extra": null}));
    assert_eq!(data["PW"], json!({"project": 90, "presentation": 90}));
}

#[tokio::test]
async fn test_save_rejects_out_of_range_points() {
    let app = test_router(test_state());
    let mut payload = valid_payload();
    payload["AP1"] = json!(101);

    let (status, json) = send(&app, "POST", "/exam/save", Some(payload)).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(json["status"], 422);
    assert_eq!(json["field"], "AP1");
}

#[tokio::test]
async fn test_save_rejects_unknown_field() {
    let app = test_router(test_state());

    let (status, json) = send(&app, "POST", "/exam/save", Some(json!({"AP9": 10}))).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(json["field"], "AP9");
}

#[tokio::test]
async fn test_save_rejects_malformed_json() {
    let app = test_router(test_state());

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/exam/save")
                .header("content-type", "application/json")
                .body(Body::from("{\"AP1\": "))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_list_records() {
    let app = test_router(test_state());

    let (status, json) = send(&app, "GET", "/exam/all", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, json!([]));

    save(&app, valid_payload()).await;
    save(&app, json!({"AP1": 40})).await;

    let (_, json) = send(&app, "GET", "/exam/all", None).await;
    assert_eq!(json.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_get_record() {
    let app = test_router(test_state());
    let id = save(&app, valid_payload()).await;

    let (status, json) = send(&app, "GET", &format!("/exam/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["id"], id.as_str());
    assert_eq!(json["name"], "test name");

    let (status, json) = send(&app, "GET", "/exam/an_id_that_does_not_exist", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json, json!({"error": "Entry not found", "status": 404}));
}

#[tokio::test]
async fn test_update_record() {
    let app = test_router(test_state());
    let id = save(&app, valid_payload()).await;

    let mut updated = valid_payload();
    updated["Name"] = json!("test name the second");
    let (status, json) = send(&app, "PUT", &format!("/exam/{}", id), Some(updated)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["message"], "Entry updated successfully");
    assert_eq!(json["data"]["name"], "test name the second");
    assert_eq!(json["data"]["id"], id.as_str());

    let (_, json) = send(&app, "GET", &format!("/exam/{}", id), None).await;
    assert_eq!(json["name"], "test name the second");
}

#[tokio::test]
async fn test_update_missing_record() {
    let app = test_router(test_state());

    let (status, _) = send(&app, "PUT", "/exam/missing", Some(valid_payload())).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_validates_payload() {
    let app = test_router(test_state());
    let id = save(&app, valid_payload()).await;

    let (status, _) = send(
        &app,
        "PUT",
        &format!("/exam/{}", id),
        Some(json!({"AP2": {"planning": {"main": 150}}})),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_delete_record() {
    let app = test_router(test_state());
    let id = save(&app, valid_payload()).await;

    let (status, json) = send(&app, "DELETE", &format!("/exam/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, json!({"message": "Entry deleted successfully"}));

    let (status, _) = send(&app, "DELETE", &format!("/exam/{}", id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// =============================================================================
// Calculation
// =============================================================================

#[tokio::test]
async fn test_calculate_submitted_record() {
    let app = test_router(test_state());

    let (status, json) = send(&app, "POST", "/exam/calculate", Some(valid_payload())).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["program"], "ae-project-work");
    assert_eq!(json["name"], "test name");
    assert_eq!(json["AP2"]["planning"], json!({"points": 77, "grade": 3}));
    assert_eq!(json["PW"]["overall"], json!({"points": 90, "grade": 2}));
    assert_eq!(json["overall"], json!({"points": 89, "grade": 2}));
    assert_eq!(json["status"], json!({"passed": true, "reasons": []}));

    // Nothing is stored
    let (_, all) = send(&app, "GET", "/exam/all", None).await;
    assert_eq!(all, json!([]));
}

#[tokio::test]
async fn test_calculate_failing_record() {
    let app = test_router(test_state());
    let mut payload = valid_payload();
    payload["ap2"]["planning"] = json!({"main": 20});

    let (status, json) = send(&app, "POST", "/exam/calculate", Some(payload)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"]["passed"], false);
    assert_eq!(json["status"]["reasons"], json!(["COMPONENT_BELOW_MINIMUM"]));
}

#[tokio::test]
async fn test_calculate_rejects_non_object() {
    let app = test_router(test_state());

    let (status, json) = send(&app, "POST", "/exam/calculate", Some(json!([1, 2]))).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(json["field"], "record");
}

#[tokio::test]
async fn test_calculate_stored_record() {
    let app = test_router(test_state());
    let id = save(&app, valid_payload()).await;

    let (status, json) = send(&app, "GET", &format!("/exam/calculate/{}", id), None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["message"], "Entry calculated successfully");
    assert_eq!(json["data"]["overall"], json!({"points": 89, "grade": 2}));

    let (status, json) = send(&app, "GET", "/exam/calculate/missing", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"], "Entry not found");
}

#[tokio::test]
async fn test_calculate_with_ml_program() {
    let calculator = ExamCalculator::new(ExamProgram::builtin("ml").unwrap()).unwrap();
    let app = test_router(AppState::new(calculator, Arc::new(MemoryRepository::new())));

    let (status, json) = send(
        &app,
        "POST",
        "/exam/calculate",
        Some(json!({"AP1": 80, "ml": {"ML1": 95, "ML2": 90}})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["program"], "ml");
    assert_eq!(json["ML"]["presentation"], json!({"points": 95, "grade": 1}));
    assert_eq!(json["overall"], json!({"points": 89, "grade": 2}));
}

#[tokio::test]
async fn test_calculate_stored_record_with_nested_project_work() {
    let program = ExamProgram::builtin("ae-nested-project-work").unwrap();
    let calculator = ExamCalculator::new(program).unwrap();
    let app = test_router(AppState::new(calculator, Arc::new(MemoryRepository::new())));

    let id = save(
        &app,
        json!({
            "name": "test name",
            "ap1": 90,
            "ap2": {
                "planning": {"main": 80, "extra": 70},
                "development": {"main": 85},
                "economy": {"main": 95, "extra": 95},
                "pw": {"presentation": 90, "project": 90}
            }
        }),
    )
    .await;

    let (status, json) = send(&app, "GET", &format!("/exam/calculate/{}", id), None).await;

    assert_eq!(status, StatusCode::OK);
    let data = &json["data"];
    assert_eq!(data["AP2"]["pw"]["overall"], json!({"points": 90, "grade": 2}));
    assert_eq!(data["AP2"]["overall"], json!({"points": 88, "grade": 2}));
    assert_eq!(data["Overall"], json!({"points": 89, "grade": 2}));
    assert_eq!(data["Status"], json!({"passed": true, "reasons": []}));
}

// =============================================================================
// File-backed store
// =============================================================================

#[tokio::test]
async fn test_records_persist_in_json_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("data/storage.json");
    let repository = Arc::new(JsonFileRepository::open(&path).await.unwrap());
    let app = test_router(AppState::new(ExamCalculator::default(), repository));

    let id = save(&app, valid_payload()).await;

    let reopened = JsonFileRepository::open(&path).await.unwrap();
    let stored = reopened.get_by_id(&id).await.unwrap().unwrap();
    assert_eq!(stored["name"], json!("test name"));
    assert_eq!(stored["AP1"], json!(90));
}
