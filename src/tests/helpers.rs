use async_trait::async_trait;
use mongodb::bson::Document;
use std::sync::{Arc, Mutex};

use crate::db::{CollectionAccessor, DocumentStore, MongoStore};
use crate::errors::AccessorError;

/// A store call as seen by the `DocumentStore` seam.
#[derive(Debug, Clone, PartialEq)]
pub enum StoreCall {
    InsertOne(Document),
    FindMany(Document),
    UpdateMany(Document, Document),
    DeleteMany(Document),
    Ping,
}

/// In-process store that records every call and answers with canned results.
#[derive(Default)]
pub struct RecordingStore {
    pub(crate) calls: Mutex<Vec<StoreCall>>,
    pub find_result: Vec<Document>,
    pub modified_count: u64,
    pub deleted_count: u64,
}

impl RecordingStore {
    pub fn calls(&self) -> Vec<StoreCall> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: StoreCall) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl DocumentStore for RecordingStore {
    fn collection_name(&self) -> &str {
        "recording"
    }

    async fn insert_one(&self, record: Document) -> Result<(), AccessorError> {
        self.record(StoreCall::InsertOne(record));
        Ok(())
    }

    async fn find_many(&self, query: Document) -> Result<Vec<Document>, AccessorError> {
        self.record(StoreCall::FindMany(query));
        Ok(self.find_result.clone())
    }

    async fn update_many(&self, query: Document, update: Document) -> Result<u64, AccessorError> {
        self.record(StoreCall::UpdateMany(query, update));
        Ok(self.modified_count)
    }

    async fn delete_many(&self, query: Document) -> Result<u64, AccessorError> {
        self.record(StoreCall::DeleteMany(query));
        Ok(self.deleted_count)
    }

    async fn ping(&self) -> Result<(), AccessorError> {
        self.record(StoreCall::Ping);
        Ok(())
    }
}

pub fn recording_accessor(store: RecordingStore) -> (CollectionAccessor, Arc<RecordingStore>) {
    let store = Arc::new(store);
    let accessor = CollectionAccessor::with_store(store.clone());
    (accessor, store)
}

/// Accessor pointed at a closed local port with a short server selection timeout.
pub async fn unreachable_accessor() -> CollectionAccessor {
    let client = mongodb::Client::with_uri_str(
        "mongodb://127.0.0.1:1/?serverSelectionTimeoutMS=200&connectTimeoutMS=200",
    )
    .await
    .expect("client construction does not contact the server");

    CollectionAccessor::with_store(Arc::new(MongoStore::from_client(&client, "AAC", "animals")))
}
