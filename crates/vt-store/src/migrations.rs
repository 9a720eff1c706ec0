//! Embedded SQL migrations and runner.
//!
//! Migrations are stored as `&str` constants and executed in order.  A
//! `schema_migrations` table tracks which versions have been applied.

use rusqlite::Connection;
use vt_core::{Error, Result};

/// V1: collections registry and document table.
const V1_INITIAL: &str = r#"
-- Named collections, created implicitly on first insert
CREATE TABLE collections (
    database   TEXT NOT NULL,
    name       TEXT NOT NULL,
    created_at TEXT NOT NULL,
    PRIMARY KEY (database, name)
);

-- Documents; seq gives insertion order
CREATE TABLE documents (
    seq        INTEGER PRIMARY KEY AUTOINCREMENT,
    oid        TEXT NOT NULL UNIQUE,
    database   TEXT NOT NULL,
    collection TEXT NOT NULL,
    body       TEXT NOT NULL,
    created_at TEXT NOT NULL,
    FOREIGN KEY (database, collection) REFERENCES collections(database, name)
);

CREATE INDEX idx_documents_collection ON documents(database, collection, seq);
"#;

/// All migrations in order. Each entry is `(version, sql)`.
const MIGRATIONS: &[(i64, &str)] = &[(1, V1_INITIAL)];

/// Run all pending migrations on `conn`.
///
/// Creates the `schema_migrations` tracking table if it does not exist,
/// then applies each outstanding migration inside a transaction.
pub fn run_migrations(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS schema_migrations (
            version    INTEGER PRIMARY KEY,
            applied_at TEXT NOT NULL DEFAULT (datetime('now'))
        )",
    )
    .map_err(|e| Error::query(format!("Failed to create schema_migrations: {e}")))?;

    for &(version, sql) in MIGRATIONS {
        let already: bool = conn
            .query_row(
                "SELECT COUNT(*) > 0 FROM schema_migrations WHERE version = ?1",
                [version],
                |row| row.get(0),
            )
            .map_err(|e| Error::query(e.to_string()))?;

        if already {
            continue;
        }

        let tx = conn
            .unchecked_transaction()
            .map_err(|e| Error::query(e.to_string()))?;

        tx.execute_batch(sql)
            .map_err(|e| Error::query(format!("Migration V{version} failed: {e}")))?;

        tx.execute(
            "INSERT INTO schema_migrations (version) VALUES (?1)",
            [version],
        )
        .map_err(|e| Error::query(e.to_string()))?;

        tx.commit().map_err(|e| Error::query(e.to_string()))?;

        tracing::debug!("Applied store migration V{version}");
    }

    Ok(())
}
