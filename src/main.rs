use std::path::Path;
use std::sync::Arc;
use tower_http::services::{ServeDir, ServeFile};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use shelter::{config::Config, db::CollectionAccessor, routes, AppState};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env()?;
    info!(
        "Using collection {}.{} on {}:{}",
        config.store.database, config.store.collection, config.store.host, config.store.port
    );

    let accessor = CollectionAccessor::connect(&config.store).await?;

    // The driver connects lazily; report reachability now but keep serving either way.
    match accessor.ping().await {
        Ok(()) => info!("✅ Document store reachable"),
        Err(e) => warn!("Document store not reachable yet: {}", e),
    }

    let state = Arc::new(AppState { accessor });
    let mut app = routes::create_router(state);

    if let Some(static_dir) = &config.static_dir {
        let index = Path::new(static_dir).join("index.html");
        info!("Serving static files from {}", static_dir);
        app = app.fallback_service(ServeDir::new(static_dir).fallback(ServeFile::new(index)));
    }

    let listener = tokio::net::TcpListener::bind(&config.server_address).await?;
    info!("Server starting on {}", config.server_address);

    axum::serve(listener, app).await?;

    Ok(())
}
