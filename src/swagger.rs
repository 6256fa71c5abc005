use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;
use axum::Router;
use std::sync::Arc;

use crate::{
    models::{CreateResponse, DeleteRequest, DeleteResponse, UpdateRequest, UpdateResponse},
    AppState,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::health_check,
        crate::routes::animals::list_animals,
        crate::routes::animals::create_animal,
        crate::routes::animals::update_animals,
        crate::routes::animals::delete_animals,
    ),
    components(
        schemas(CreateResponse, DeleteRequest, DeleteResponse, UpdateRequest, UpdateResponse)
    ),
    tags(
        (name = "health", description = "Service health"),
        (name = "animals", description = "Create, read, update and delete animal records"),
    ),
    info(
        title = "Shelter API",
        version = "0.1.0",
        description = "CRUD access to the animal shelter collection"
    )
)]
pub struct ApiDoc;

pub fn create_swagger_router() -> Router<Arc<AppState>> {
    SwaggerUi::new("/swagger-ui")
        .url("/api-docs/openapi.json", ApiDoc::openapi())
        .into()
}
