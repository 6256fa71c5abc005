use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};
use serde_json::Value;
use std::sync::Arc;

use crate::{
    errors::AccessorError,
    models::{
        record_to_json, CreateResponse, DeleteRequest, DeleteResponse, ReadParams, UpdateRequest,
        UpdateResponse,
    },
    AppState,
};

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route(
        "/",
        get(list_animals)
            .post(create_animal)
            .patch(update_animals)
            .delete(delete_animals),
    )
}

#[utoipa::path(
    get,
    path = "/api/animals",
    tag = "animals",
    params(ReadParams),
    responses(
        (status = 200, description = "Records matching the filter", body = Vec<serde_json::Value>),
        (status = 400, description = "Filter is not a JSON object"),
        (status = 503, description = "Document store unavailable")
    )
)]
pub async fn list_animals(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ReadParams>,
) -> Result<Json<Vec<Value>>, AccessorError> {
    let filter = match params.filter.as_deref() {
        Some(raw) if !raw.trim().is_empty() => serde_json::from_str::<Value>(raw).map_err(|e| {
            AccessorError::invalid_argument(format!("filter is not valid JSON: {}", e))
        })?,
        _ => Value::Null,
    };

    let records = state.accessor.read(&filter).await?;
    Ok(Json(records.into_iter().map(record_to_json).collect()))
}

#[utoipa::path(
    post,
    path = "/api/animals",
    tag = "animals",
    request_body = serde_json::Value,
    responses(
        (status = 201, description = "Record inserted", body = CreateResponse),
        (status = 400, description = "Body is null or not a JSON object"),
        (status = 503, description = "Document store unavailable")
    )
)]
pub async fn create_animal(
    State(state): State<Arc<AppState>>,
    Json(record): Json<Value>,
) -> Result<(StatusCode, Json<CreateResponse>), AccessorError> {
    state.accessor.create(&record).await?;

    Ok((
        StatusCode::CREATED,
        Json(CreateResponse {
            status: "created".to_string(),
        }),
    ))
}

#[utoipa::path(
    patch,
    path = "/api/animals",
    tag = "animals",
    request_body = UpdateRequest,
    responses(
        (status = 200, description = "Number of records changed", body = UpdateResponse),
        (status = 400, description = "Query or patch missing"),
        (status = 503, description = "Document store unavailable")
    )
)]
pub async fn update_animals(
    State(state): State<Arc<AppState>>,
    Json(request): Json<UpdateRequest>,
) -> Result<Json<UpdateResponse>, AccessorError> {
    let modified = state.accessor.update(&request.query, &request.patch).await?;
    Ok(Json(UpdateResponse { modified }))
}

#[utoipa::path(
    delete,
    path = "/api/animals",
    tag = "animals",
    request_body = DeleteRequest,
    responses(
        (status = 200, description = "Number of records removed", body = DeleteResponse),
        (status = 400, description = "Query missing"),
        (status = 503, description = "Document store unavailable")
    )
)]
pub async fn delete_animals(
    State(state): State<Arc<AppState>>,
    Json(request): Json<DeleteRequest>,
) -> Result<Json<DeleteResponse>, AccessorError> {
    let deleted = state.accessor.delete(&request.query).await?;
    Ok(Json(DeleteResponse { deleted }))
}
