//! Application context shared by all route handlers via Axum state.

use std::sync::Arc;

use vt_core::config::Config;
use vt_store::StoreHandle;

use crate::catalog::CatalogService;

/// Application context shared by all request handlers.
///
/// This is cheaply cloneable because it only holds `Arc`s and the shared
/// store handle. Nothing in it is mutated after startup.
#[derive(Clone)]
pub struct AppContext {
    /// Immutable application configuration snapshot.
    pub config: Arc<Config>,
    /// Catalog operations over the store.
    pub catalog: CatalogService,
}

impl AppContext {
    /// Build a context around an already-resolved store handle.
    pub fn new(config: Config, store: StoreHandle) -> Self {
        let catalog = CatalogService::new(store, &config.store);
        Self {
            config: Arc::new(config),
            catalog,
        }
    }

    /// Connect to the store described by `config` and build the context.
    pub fn connect(config: Config) -> Self {
        let store = StoreHandle::from_config(&config.store);
        Self::new(config, store)
    }
}
