//! Shared application state

use crate::{
    config::Config,
    db::{create_pool, BookStore, PostgresBookStore},
    services::{CatalogService, CrudService},
    Result,
};
use sqlx::PgPool;
use std::sync::Arc;

/// State of the document-store service, passed to all its handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    /// `None` when the state was built over a non-Postgres store.
    pub db_pool: Option<PgPool>,
    pub crud_service: Arc<CrudService>,
}

impl AppState {
    /// Connect to the configured database and make sure the collection exists.
    pub async fn new(config: Config) -> Result<Self> {
        let url = config.database.url.clone();
        Self::connect(config, &url).await
    }

    /// Same as [`AppState::new`] against an explicit server URL
    pub async fn connect(config: Config, url: &str) -> Result<Self> {
        tracing::info!("Initializing application state...");

        let db_pool = create_pool(&config.database, url).await?;

        let store = PostgresBookStore::new(db_pool.clone(), config.database.collection.clone());
        store.ensure_collection().await?;
        tracing::info!(collection = store.collection(), "Book collection ready");

        tracing::info!("Application state initialized successfully");

        let mut state = Self::with_store(config, Arc::new(store));
        state.db_pool = Some(db_pool);
        Ok(state)
    }

    /// Build the state over any store implementation
    pub fn with_store(config: Config, store: Arc<dyn BookStore>) -> Self {
        Self {
            config: Arc::new(config),
            db_pool: None,
            crud_service: Arc::new(CrudService::new(store)),
        }
    }
}

/// State of the in-memory catalog service
#[derive(Clone)]
pub struct CatalogState {
    pub config: Arc<Config>,
    pub catalog: Arc<CatalogService>,
}

impl CatalogState {
    /// Seed the catalog from `catalog.source_path`
    pub fn new(config: Config) -> Self {
        let catalog = CatalogService::load(&config.catalog.source_path);
        Self::with_catalog(config, catalog)
    }

    pub fn with_catalog(config: Config, catalog: CatalogService) -> Self {
        Self {
            config: Arc::new(config),
            catalog: Arc::new(catalog),
        }
    }
}
