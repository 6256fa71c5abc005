//! Test utilities backed by a real MongoDB container.
//!
//! One container is started per test binary and shared by every test in it. Each
//! `TestContext` gets its own collection so tests never see each other's records.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use axum::Router;
use mongodb::bson::{doc, Document};
use testcontainers::{runners::AsyncRunner, ContainerAsync, ImageExt};
use testcontainers_modules::mongo::Mongo;
use tokio::sync::OnceCell;

use crate::config::StoreConfig;
use crate::db::{CollectionAccessor, MongoStore};
use crate::AppState;

const TEST_DATABASE: &str = "shelter_test";

static SHARED_MONGO: OnceCell<SharedMongo> = OnceCell::const_new();
static COLLECTION_COUNTER: AtomicU64 = AtomicU64::new(0);

/// The container handle is kept alive for the whole test binary. Only the mapped port is
/// read after startup because the container's docker client belongs to the runtime of
/// whichever test started it.
struct SharedMongo {
    _container: ContainerAsync<Mongo>,
    port: u16,
}

impl SharedMongo {
    async fn start() -> Result<SharedMongo, Box<dyn std::error::Error + Send + Sync>> {
        let container = Mongo::default()
            .with_tag("7.0")
            .start()
            .await
            .map_err(|e| format!("Failed to start shared mongo container: {}", e))?;

        let port = container
            .get_host_port_ipv4(27017)
            .await
            .map_err(|e| format!("Failed to get mongo port: {}", e))?;

        Ok(SharedMongo {
            _container: container,
            port,
        })
    }
}

/// Unique per-test collection on the shared container.
pub struct TestContext {
    pub accessor: CollectionAccessor,
    pub config: StoreConfig,
    client: mongodb::Client,
}

impl TestContext {
    pub async fn new() -> Self {
        let shared = SHARED_MONGO
            .get_or_try_init(SharedMongo::start)
            .await
            .expect("Failed to create shared mongo container");

        let collection = format!(
            "animals_{}_{}",
            std::process::id(),
            COLLECTION_COUNTER.fetch_add(1, Ordering::Relaxed)
        );

        let config = StoreConfig {
            host: "127.0.0.1".to_string(),
            port: shared.port,
            database: TEST_DATABASE.to_string(),
            collection,
            ..StoreConfig::default()
        };

        // Each test runs on its own runtime, so each gets its own driver client.
        let uri = config.connection_uri().expect("test connection uri");
        let client = mongodb::Client::with_uri_str(&uri)
            .await
            .expect("Failed to create mongo client");
        let store = MongoStore::from_client(&client, &config.database, &config.collection);
        let accessor = CollectionAccessor::with_store(Arc::new(store));

        let mut retries = 0;
        const MAX_RETRIES: u32 = 30;
        while let Err(e) = accessor.ping().await {
            retries += 1;
            if retries == MAX_RETRIES {
                panic!("Mongo did not become ready after {} retries: {}", MAX_RETRIES, e);
            }
            tokio::time::sleep(std::time::Duration::from_millis(500)).await;
        }

        Self { accessor, config, client }
    }

    pub fn state(&self) -> Arc<AppState> {
        Arc::new(AppState {
            accessor: self.accessor.clone(),
        })
    }

    pub fn app(&self) -> Router {
        crate::routes::create_router(self.state())
    }

    /// Raw collection handle, for asserting on the store without going through the
    /// accessor.
    pub fn raw_collection(&self) -> mongodb::Collection<Document> {
        self.client
            .database(&self.config.database)
            .collection::<Document>(&self.config.collection)
    }

    pub async fn count(&self) -> u64 {
        self.raw_collection()
            .count_documents(doc! {})
            .await
            .expect("count documents")
    }

    pub async fn cleanup(&self) -> Result<(), mongodb::error::Error> {
        self.raw_collection().drop().await
    }
}
