use mongodb::bson::doc;
use serde::Serialize;
use tracing::debug;

use super::helpers::{require_document, to_document};
use crate::db::CollectionAccessor;
use crate::errors::AccessorError;
use crate::models::Record;

impl CollectionAccessor {
    /// Inserts exactly one record into the collection.
    ///
    /// The record must serialize to a mapping; `None`/null is rejected with
    /// `InvalidArgument` before the store is contacted.
    pub async fn create<R>(&self, record: &R) -> Result<(), AccessorError>
    where
        R: Serialize + ?Sized,
    {
        let record = require_document(
            record,
            "record",
            "Nothing to save, because the record is empty",
        )?;

        self.store.insert_one(record).await?;
        debug!(collection = self.collection_name(), "record created");
        Ok(())
    }

    /// Returns every record matching `query`, in the order the store yields them.
    ///
    /// An empty or null query matches all records. No match is an empty `Vec`.
    pub async fn read<Q>(&self, query: &Q) -> Result<Vec<Record>, AccessorError>
    where
        Q: Serialize + ?Sized,
    {
        let query = to_document(query, "query")?.unwrap_or_default();

        let records = self.store.find_many(query).await?;
        debug!(collection = self.collection_name(), count = records.len(), "records read");
        Ok(records)
    }

    /// Sets the fields of `patch` on every record matching `query`.
    ///
    /// Returns how many records changed; a record that already held every patched value
    /// is matched but not counted.
    pub async fn update<Q, P>(&self, query: &Q, patch: &P) -> Result<u64, AccessorError>
    where
        Q: Serialize + ?Sized,
        P: Serialize + ?Sized,
    {
        let query = require_document(query, "query", "Query cannot be empty")?;
        let patch = require_document(patch, "patch", "Patch cannot be empty")?;

        let modified = self.store.update_many(query, doc! { "$set": patch }).await?;
        debug!(collection = self.collection_name(), modified, "records updated");
        Ok(modified)
    }

    /// Removes every record matching `query` and returns how many were removed.
    pub async fn delete<Q>(&self, query: &Q) -> Result<u64, AccessorError>
    where
        Q: Serialize + ?Sized,
    {
        let query = require_document(query, "query", "Query cannot be empty")?;

        let deleted = self.store.delete_many(query).await?;
        debug!(collection = self.collection_name(), deleted, "records deleted");
        Ok(deleted)
    }
}
