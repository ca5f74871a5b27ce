use crate::response::ApiResponse;
use axum::{Json, Router, http::StatusCode, response::IntoResponse, routing::get};
use common::{config, state::AppState};
use serde::Serialize;

#[derive(Serialize)]
struct HealthResponse {
    service: String,
    status: String,
}

/// GET /api/health
///
/// Liveness probe; no authentication required.
async fn health() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(ApiResponse::success(
            HealthResponse {
                service: config::project_name(),
                status: "ok".to_string(),
            },
            "Service is healthy",
        )),
    )
}

pub fn health_routes() -> Router<AppState> {
    Router::new().route("/", get(health))
}
