//! Shared test harness for integration tests.
//!
//! Provides [`TestHarness`] which builds an [`AppContext`] over a private
//! in-memory store (or an unavailable one). [`TestHarness::serve`] starts
//! Axum on a random port for HTTP-level testing.

#![allow(dead_code)]

use std::net::SocketAddr;

use vt_core::config::Config;
use vt_core::Document;
use vt_server::context::AppContext;
use vt_server::router::build_router;
use vt_store::{DocumentStore, SqliteStore, StoreHandle};

/// Test harness wrapping a fully-constructed [`AppContext`].
pub struct TestHarness {
    pub ctx: AppContext,
}

impl TestHarness {
    /// Harness backed by a fresh in-memory store.
    pub fn new() -> Self {
        let mut config = Config::default();
        config.store.url = Some("sqlite::memory:".into());
        config.store.name = Some("catalog".into());
        let store = SqliteStore::open_memory("catalog").expect("failed to open memory store");
        Self::with_store(config, StoreHandle::with_store(store))
    }

    /// Harness with no store configured.
    pub fn unavailable() -> Self {
        Self {
            ctx: AppContext::connect(Config::default()),
        }
    }

    /// Harness around an arbitrary store handle.
    pub fn with_store(config: Config, store: StoreHandle) -> Self {
        Self {
            ctx: AppContext::new(config, store),
        }
    }

    /// Start an Axum server on a random port and return the harness together
    /// with the bound socket address.
    pub async fn serve(self) -> (Self, SocketAddr) {
        let app = build_router(self.ctx.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind random port");
        let addr = listener.local_addr().expect("failed to get local addr");

        tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        (self, addr)
    }

    /// Direct access to the underlying store.
    pub fn store(&self) -> &dyn DocumentStore {
        self.ctx
            .catalog
            .store()
            .get()
            .expect("harness store is unavailable")
    }

    /// Insert a raw JSON document, bypassing validation.
    pub fn insert(&self, collection: &str, value: serde_json::Value) -> String {
        let serde_json::Value::Object(doc) = value else {
            panic!("expected a JSON object");
        };
        self.store()
            .create_document(collection, &doc)
            .expect("insert failed")
    }

    /// Number of documents in `collection`.
    pub fn count(&self, collection: &str) -> usize {
        self.store()
            .get_documents(collection, &Document::new(), 100_000)
            .expect("query failed")
            .len()
    }
}
