//! Connection pool management for SQLite via r2d2.

use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;
use vt_core::{Error, Result};

use crate::migrations;

/// Type alias for the database connection pool.
pub type DbPool = Pool<SqliteConnectionManager>;

/// Type alias for a pooled database connection.
pub type PooledConnection = r2d2::PooledConnection<SqliteConnectionManager>;

/// Initialize a database pool backed by a file on disk.
///
/// Creates the SQLite file if it does not exist, enables foreign keys and
/// WAL journal mode on every new connection, and runs pending migrations.
pub fn init_pool(db_path: &str) -> Result<DbPool> {
    let manager = SqliteConnectionManager::file(db_path).with_init(|conn| {
        conn.execute_batch(
            "PRAGMA foreign_keys = ON;
             PRAGMA journal_mode = WAL;",
        )
    });

    let pool = Pool::builder()
        .max_size(4)
        .build(manager)
        .map_err(|e| Error::StoreUnavailable(format!("Failed to create connection pool: {e}")))?;

    let conn = get_conn(&pool)?;
    migrations::run_migrations(&conn)?;

    Ok(pool)
}

/// Initialize an in-memory database pool.
///
/// Each call creates a uniquely-named in-memory database so that parallel
/// tests do not interfere with each other. The pool holds a single
/// connection: shared-cache table locks fail with `SQLITE_LOCKED` instead of
/// honouring the busy timeout, so concurrent callers queue on checkout.
/// That connection is never recycled, since closing it drops the database.
pub fn init_memory_pool() -> Result<DbPool> {
    use std::sync::atomic::{AtomicU64, Ordering};
    static COUNTER: AtomicU64 = AtomicU64::new(0);
    let n = COUNTER.fetch_add(1, Ordering::Relaxed);
    let uri = format!("file:vitrine_mem_{}_{n}?mode=memory&cache=shared", std::process::id());

    let manager = SqliteConnectionManager::file(uri)
        .with_init(|conn| conn.execute_batch("PRAGMA foreign_keys = ON;"));

    let pool = Pool::builder()
        .max_size(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .build(manager)
        .map_err(|e| Error::StoreUnavailable(format!("Failed to create in-memory pool: {e}")))?;

    let conn = get_conn(&pool)?;
    migrations::run_migrations(&conn)?;

    Ok(pool)
}

/// Get a connection from the pool.
///
/// A checkout failure means the store is unreachable, not that a query was
/// wrong, so it maps to [`Error::StoreUnavailable`].
pub fn get_conn(pool: &DbPool) -> Result<PooledConnection> {
    pool.get()
        .map_err(|e| Error::StoreUnavailable(format!("Failed to get connection from pool: {e}")))
}
