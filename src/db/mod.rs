use std::fmt;
use std::sync::Arc;

use crate::config::StoreConfig;
use crate::errors::AccessorError;

pub mod store;
mod crud;
mod helpers;

pub use store::{DocumentStore, MongoStore};

/// Create/read/update/delete access to a single document collection.
///
/// The accessor holds no state of its own beyond the store handle; cloning it is cheap
/// and clones share the driver's connection pool. The MongoDB driver is safe for
/// concurrent use, so one accessor can serve any number of tasks at once.
#[derive(Clone)]
pub struct CollectionAccessor {
    store: Arc<dyn DocumentStore>,
}

impl CollectionAccessor {
    /// Builds an accessor for the collection named in `config`.
    ///
    /// Connectivity is not verified: an unreachable or misconfigured server surfaces as
    /// `StoreUnavailable` on the first operation. Call [`ping`](Self::ping) to check
    /// eagerly.
    pub async fn connect(config: &StoreConfig) -> Result<Self, AccessorError> {
        let store = MongoStore::connect(config).await?;
        tracing::debug!(
            host = %config.host,
            port = config.port,
            database = %config.database,
            collection = %config.collection,
            "collection accessor created"
        );
        Ok(Self::with_store(Arc::new(store)))
    }

    pub fn with_store(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    pub fn collection_name(&self) -> &str {
        self.store.collection_name()
    }

    /// Round trip to the server without touching the collection.
    pub async fn ping(&self) -> Result<(), AccessorError> {
        self.store.ping().await
    }
}

impl fmt::Debug for CollectionAccessor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CollectionAccessor")
            .field("collection", &self.collection_name())
            .finish()
    }
}
