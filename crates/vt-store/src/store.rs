//! The document store seam and its SQLite implementation.
//!
//! [`StoreHandle`] is built once at startup. It is either connected to a
//! [`DocumentStore`] or carries the reason it is not, so callers can degrade
//! instead of failing at boot.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use vt_core::config::StoreConfig;
use vt_core::{Document, Error, Result};

use crate::pool::{self, DbPool};
use crate::queries::{collections, documents};

/// Generic create/query operations over named collections.
pub trait DocumentStore: Send + Sync {
    /// Insert one document, creating the collection implicitly.
    ///
    /// Returns the store-assigned id. No uniqueness check is made on any
    /// field of `doc`.
    fn create_document(&self, collection: &str, doc: &Document) -> Result<String>;

    /// Up to `limit` documents whose fields equal those in `filter`, in
    /// insertion order. Each carries its store id as a string under `_id`.
    fn get_documents(&self, collection: &str, filter: &Document, limit: usize)
        -> Result<Vec<Document>>;

    /// Names of the collections that exist.
    fn list_collection_names(&self) -> Result<Vec<String>>;

    /// First document matching `filter`, if any.
    fn find_document(&self, collection: &str, filter: &Document) -> Result<Option<Document>> {
        Ok(self.get_documents(collection, filter, 1)?.into_iter().next())
    }
}

// ---------------------------------------------------------------------------
// SqliteStore
// ---------------------------------------------------------------------------

/// [`DocumentStore`] over a pooled SQLite database, scoped to one database
/// name.
#[derive(Clone)]
pub struct SqliteStore {
    pool: DbPool,
    database: String,
}

impl SqliteStore {
    pub fn new(pool: DbPool, database: impl Into<String>) -> Self {
        Self {
            pool,
            database: database.into(),
        }
    }

    /// Open a private in-memory store.
    pub fn open_memory(database: impl Into<String>) -> Result<Self> {
        Ok(Self::new(pool::init_memory_pool()?, database))
    }

    /// Open (or create) a store at `url`.
    pub fn open(url: &str, database: impl Into<String>) -> Result<Self> {
        match parse_location(url)? {
            Location::Memory => Self::open_memory(database),
            Location::File(path) => {
                if let Some(parent) = path.parent() {
                    if !parent.as_os_str().is_empty() && !parent.exists() {
                        std::fs::create_dir_all(parent)?;
                        tracing::info!("Created store directory {}", parent.display());
                    }
                }
                let pool = pool::init_pool(&path.to_string_lossy())?;
                Ok(Self::new(pool, database))
            }
        }
    }

    pub fn database(&self) -> &str {
        &self.database
    }
}

impl DocumentStore for SqliteStore {
    fn create_document(&self, collection: &str, doc: &Document) -> Result<String> {
        let conn = pool::get_conn(&self.pool)?;
        documents::insert_document(&conn, &self.database, collection, doc)
    }

    fn get_documents(
        &self,
        collection: &str,
        filter: &Document,
        limit: usize,
    ) -> Result<Vec<Document>> {
        let conn = pool::get_conn(&self.pool)?;
        documents::find_documents(&conn, &self.database, collection, filter, limit)
    }

    fn list_collection_names(&self) -> Result<Vec<String>> {
        let conn = pool::get_conn(&self.pool)?;
        collections::list_collections(&conn, &self.database)
    }
}

#[derive(Debug, PartialEq)]
enum Location {
    Memory,
    File(PathBuf),
}

/// Accepts `sqlite://<path>`, `sqlite:<path>`, `sqlite::memory:`,
/// `:memory:` or a bare path.
fn parse_location(url: &str) -> Result<Location> {
    let url = url.trim();
    let rest = url
        .strip_prefix("sqlite://")
        .or_else(|| url.strip_prefix("sqlite:"));

    let target = match rest {
        Some(rest) => rest,
        None if url.contains("://") => {
            let scheme = url.split("://").next().unwrap_or_default();
            return Err(Error::StoreUnavailable(format!(
                "unsupported store scheme `{scheme}`"
            )));
        }
        None => url,
    };

    match target {
        "" => Err(Error::StoreUnavailable("store URL has no path".into())),
        ":memory:" => Ok(Location::Memory),
        path => Ok(Location::File(Path::new(path).to_path_buf())),
    }
}

// ---------------------------------------------------------------------------
// StoreHandle
// ---------------------------------------------------------------------------

/// Process-wide store state: connected, or unavailable with a reason.
///
/// Cheaply cloneable.
#[derive(Clone)]
pub enum StoreHandle {
    Connected(Arc<dyn DocumentStore>),
    Unavailable { reason: String },
}

impl StoreHandle {
    /// Try to connect; never fails hard.
    ///
    /// Both `url` and `name` must be set. Any failure is logged and turned
    /// into [`StoreHandle::Unavailable`].
    pub fn connect(url: Option<&str>, name: Option<&str>) -> Self {
        let (Some(url), Some(name)) = (url, name) else {
            tracing::warn!("Store not configured; catalog endpoints will fail until it is");
            return Self::unavailable("Database not configured");
        };

        match SqliteStore::open(url, name) {
            Ok(store) => {
                tracing::info!("Connected to store database `{name}`");
                Self::Connected(Arc::new(store))
            }
            Err(e) => {
                tracing::warn!("Store unavailable: {e}");
                Self::unavailable(e.to_string())
            }
        }
    }

    /// Connect using the store section of the configuration.
    pub fn from_config(config: &StoreConfig) -> Self {
        Self::connect(config.url.as_deref(), config.name.as_deref())
    }

    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self::Unavailable {
            reason: reason.into(),
        }
    }

    /// Wrap an existing store.
    pub fn with_store(store: impl DocumentStore + 'static) -> Self {
        Self::Connected(Arc::new(store))
    }

    pub fn is_connected(&self) -> bool {
        matches!(self, Self::Connected(_))
    }

    /// Borrow the store, or fail with [`Error::StoreUnavailable`].
    pub fn get(&self) -> Result<&dyn DocumentStore> {
        match self {
            Self::Connected(store) => Ok(store.as_ref()),
            Self::Unavailable { reason } => Err(Error::StoreUnavailable(reason.clone())),
        }
    }
}

impl std::fmt::Debug for StoreHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Connected(_) => f.write_str("StoreHandle::Connected"),
            Self::Unavailable { reason } => f
                .debug_struct("StoreHandle::Unavailable")
                .field("reason", reason)
                .finish(),
        }
    }
}
