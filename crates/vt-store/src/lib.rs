//! vt-store: document store adapter.
//!
//! Schema-less JSON documents grouped into named collections, persisted in
//! SQLite with connection pooling and embedded migrations. The rest of the
//! system talks to it through the [`DocumentStore`] trait and a
//! [`StoreHandle`] that may be unavailable.

pub mod migrations;
pub mod pool;
pub mod queries;
pub mod store;

pub use store::{DocumentStore, SqliteStore, StoreHandle};
