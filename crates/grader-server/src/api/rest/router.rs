//! Router creation and configuration
//!
//! Creates Axum routers for REST API endpoints.

use super::handlers::*;
use super::types::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Create REST API router
///
/// `POST /shutdown` reads the client address, so the router must be served
/// with `into_make_service_with_connect_info::<SocketAddr>()`.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/shutdown", post(shutdown))
        .nest("/exam", exam_routes())
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

fn exam_routes() -> Router<AppState> {
    Router::new()
        .route("/save", post(save_exam))
        .route("/all", get(list_exams))
        .route("/program", get(get_program))
        .route("/calculate", post(calculate_exam))
        .route("/calculate/:id", get(calculate_stored_exam))
        .route("/:id", get(get_exam).put(update_exam).delete(delete_exam))
}
