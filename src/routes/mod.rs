use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::cors::CorsLayer;

use crate::AppState;

pub mod animals;

/// API routes shared by the binary and the router tests.
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/health", get(crate::health_check))
        .nest("/api/animals", animals::router())
        .merge(crate::swagger::create_swagger_router())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
