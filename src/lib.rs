pub mod api;
pub mod config;
pub mod logic;
pub mod model;
pub mod seed;
pub mod store;

// Export API types
pub use api::handlers;
pub use api::routes;

pub use logic::PlanetService;

// Export all model types
pub use model::*;

// Export store types
pub use store::{InMemoryPlanetStore, PlanetStore, PostgresStore, StoreError};

use crate::config::{AppConfig, StorageBackend};

/// Connect the configured store and serve the API until shutdown.
pub async fn run_server(config: AppConfig) -> anyhow::Result<()> {
    match config.database.backend {
        StorageBackend::Postgres => {
            log::info!("Connecting to PostgreSQL...");
            let store =
                PostgresStore::new(&config.database_url(), config.database.max_connections).await?;

            log::info!("Running database migrations...");
            store.migrate().await?;

            serve(store, &config).await
        }
        StorageBackend::Memory => {
            log::info!("Using in-memory planet store");
            serve(InMemoryPlanetStore::new(), &config).await
        }
    }
}

async fn serve<S: PlanetStore + 'static>(store: S, config: &AppConfig) -> anyhow::Result<()> {
    use tokio::net::TcpListener;

    // Load seed data for demonstration (optional)
    if std::env::var("LOAD_SEED_DATA").unwrap_or_default() == "true" {
        let inserted = seed::load_seed_data(&store).await?;
        log::info!("Seed data loaded: {} planets inserted", inserted);
    }

    let app = routes::build_app(store);

    let bind_address = config.server_address();
    let listener = TcpListener::bind(&bind_address).await?;
    log::info!("Planet API running on http://{}", bind_address);

    axum::serve(listener, app).await?;

    Ok(())
}
