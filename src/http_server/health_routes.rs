//! Health HTTP Routes

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::get, Json, Router};
use serde::Serialize;

use crate::app::App;

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub tables: usize,
}

/// Health check route at root level
pub fn health_routes(state: Arc<App>) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .with_state(state)
}

/// Reports "degraded" when the record store cannot list its tables
async fn health_handler(State(state): State<Arc<App>>) -> impl IntoResponse {
    let (status, tables) = match state.store.list_tables() {
        Ok(tables) => ("ok", tables.len()),
        Err(_) => ("degraded", 0),
    };

    let response = HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        tables,
    };

    (StatusCode::OK, Json(response))
}
