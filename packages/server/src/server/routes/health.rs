use axum::{extract::Extension, Json};
use serde::Serialize;

use crate::server::app::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    status: String,
    storage_backends: Vec<&'static str>,
}

/// Health check endpoint. The service has no hard startup dependencies, so
/// this reports the assembled persistence chain rather than probing it.
pub async fn health_handler(Extension(state): Extension<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        storage_backends: state.deps.leads.backend_names(),
    })
}
