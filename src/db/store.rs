use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{bson::doc, bson::Document, Client, Collection};

use crate::config::StoreConfig;
use crate::errors::AccessorError;

/// The four collection calls the accessor needs, plus a connectivity probe.
///
/// Implementations must be safe to share between tasks; the accessor clones the
/// `Arc` holding them freely.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    fn collection_name(&self) -> &str;

    async fn insert_one(&self, record: Document) -> Result<(), AccessorError>;

    async fn find_many(&self, query: Document) -> Result<Vec<Document>, AccessorError>;

    /// Returns the number of documents the store actually modified.
    async fn update_many(&self, query: Document, update: Document) -> Result<u64, AccessorError>;

    /// Returns the number of documents removed.
    async fn delete_many(&self, query: Document) -> Result<u64, AccessorError>;

    async fn ping(&self) -> Result<(), AccessorError>;
}

/// `DocumentStore` backed by a MongoDB collection.
#[derive(Clone, Debug)]
pub struct MongoStore {
    database: mongodb::Database,
    collection: Collection<Document>,
}

impl MongoStore {
    /// Creates the driver client. No server is contacted here; the driver opens
    /// connections on first use, so a bad host only shows up on the first call.
    pub async fn connect(config: &StoreConfig) -> Result<Self, AccessorError> {
        let uri = config
            .connection_uri()
            .map_err(|e| AccessorError::invalid_argument(e.to_string()))?;
        let client = Client::with_uri_str(&uri).await?;

        Ok(Self::from_client(&client, &config.database, &config.collection))
    }

    pub fn from_client(client: &Client, database: &str, collection: &str) -> Self {
        let database = client.database(database);
        let collection = database.collection::<Document>(collection);
        Self { database, collection }
    }
}

#[async_trait]
impl DocumentStore for MongoStore {
    fn collection_name(&self) -> &str {
        self.collection.name()
    }

    async fn insert_one(&self, record: Document) -> Result<(), AccessorError> {
        self.collection.insert_one(record).await?;
        Ok(())
    }

    async fn find_many(&self, query: Document) -> Result<Vec<Document>, AccessorError> {
        let cursor = self.collection.find(query).await?;
        let records: Vec<Document> = cursor.try_collect().await?;
        Ok(records)
    }

    async fn update_many(&self, query: Document, update: Document) -> Result<u64, AccessorError> {
        let result = self.collection.update_many(query, update).await?;
        Ok(result.modified_count)
    }

    async fn delete_many(&self, query: Document) -> Result<u64, AccessorError> {
        let result = self.collection.delete_many(query).await?;
        Ok(result.deleted_count)
    }

    async fn ping(&self) -> Result<(), AccessorError> {
        self.database.run_command(doc! { "ping": 1 }).await?;
        Ok(())
    }
}
