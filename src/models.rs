use mongodb::bson::{Bson, Document};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::{IntoParams, ToSchema};

/// One schema-less document from the collection.
pub type Record = Document;

/// Filter predicates in the store's query language.
pub type Query = Document;

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ReadParams {
    /// Filter document as JSON, e.g. `{"animal_type":"Dog"}`. Omit to match all.
    pub filter: Option<String>,
}

/// Missing members deserialize to null so the accessor reports them as invalid arguments.
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateRequest {
    #[serde(default)]
    pub query: Value,
    #[serde(default)]
    pub patch: Value,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct DeleteRequest {
    #[serde(default)]
    pub query: Value,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateResponse {
    pub status: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UpdateResponse {
    pub modified: u64,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DeleteResponse {
    pub deleted: u64,
}

/// Renders a record as relaxed extended JSON (`_id` becomes `{"$oid": "..."}`).
pub fn record_to_json(record: Record) -> Value {
    Bson::Document(record).into_relaxed_extjson()
}
