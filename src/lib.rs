pub mod config;
pub mod db;
pub mod errors;
pub mod models;
pub mod routes;
pub mod swagger;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

#[cfg(test)]
mod tests;

use axum::{extract::State, Json};
use std::sync::Arc;

use db::CollectionAccessor;
use errors::AccessorError;

#[derive(Clone, Debug)]
pub struct AppState {
    pub accessor: CollectionAccessor,
}

/// Health check endpoint for monitoring; pings the document store.
#[utoipa::path(
    get,
    path = "/api/health",
    tag = "health",
    responses(
        (status = 200, description = "Document store reachable"),
        (status = 503, description = "Document store unavailable"),
        (status = 500, description = "Document store error")
    )
)]
pub async fn health_check(
    State(state): State<Arc<AppState>>,
) -> Result<Json<serde_json::Value>, AccessorError> {
    state.accessor.ping().await?;
    Ok(Json(serde_json::json!({"status": "ok"})))
}
