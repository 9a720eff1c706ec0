//! Collection registry: implicit creation and introspection.

use chrono::Utc;
use rusqlite::Connection;
use vt_core::{Error, Result};

/// Reject collection names the store cannot address.
pub fn check_collection_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(Error::query("collection name must not be empty"));
    }
    if name.contains('$') || name.contains('\0') {
        return Err(Error::query(format!("invalid collection name `{name}`")));
    }
    Ok(())
}

/// Register `name` in `database` if it is not there yet.
///
/// Returns `true` when the collection was created by this call.
pub fn ensure_collection(conn: &Connection, database: &str, name: &str) -> Result<bool> {
    check_collection_name(name)?;
    let n = conn
        .execute(
            "INSERT OR IGNORE INTO collections (database, name, created_at)
             VALUES (?1, ?2, ?3)",
            rusqlite::params![database, name, Utc::now().to_rfc3339()],
        )
        .map_err(|e| Error::query(e.to_string()))?;
    Ok(n > 0)
}

/// List collection names of `database` in creation order.
pub fn list_collections(conn: &Connection, database: &str) -> Result<Vec<String>> {
    let mut stmt = conn
        .prepare("SELECT name FROM collections WHERE database = ?1 ORDER BY rowid ASC")
        .map_err(|e| Error::query(e.to_string()))?;
    let rows = stmt
        .query_map([database], |row| row.get(0))
        .map_err(|e| Error::query(e.to_string()))?
        .collect::<std::result::Result<Vec<String>, _>>()
        .map_err(|e| Error::query(e.to_string()))?;
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{get_conn, init_memory_pool};

    #[test]
    fn ensure_is_idempotent() {
        let pool = init_memory_pool().unwrap();
        let conn = get_conn(&pool).unwrap();

        assert!(ensure_collection(&conn, "catalog", "mediaitem").unwrap());
        assert!(!ensure_collection(&conn, "catalog", "mediaitem").unwrap());
        assert_eq!(list_collections(&conn, "catalog").unwrap(), vec!["mediaitem"]);
    }

    #[test]
    fn listed_in_creation_order_per_database() {
        let pool = init_memory_pool().unwrap();
        let conn = get_conn(&pool).unwrap();

        ensure_collection(&conn, "catalog", "mediaitem").unwrap();
        ensure_collection(&conn, "other", "users").unwrap();
        ensure_collection(&conn, "catalog", "channel").unwrap();

        assert_eq!(
            list_collections(&conn, "catalog").unwrap(),
            vec!["mediaitem", "channel"]
        );
        assert_eq!(list_collections(&conn, "other").unwrap(), vec!["users"]);
        assert!(list_collections(&conn, "empty").unwrap().is_empty());
    }

    #[test]
    fn bad_names_rejected() {
        assert!(check_collection_name("").is_err());
        assert!(check_collection_name("$cmd").is_err());
        assert!(check_collection_name("mediaitem").is_ok());
    }
}
