//! Document insert and filtered lookup.
//!
//! Bodies are stored as JSON text. Filters are equality constraints on
//! (optionally dotted) field paths, evaluated with SQLite's `json_extract`.

use chrono::Utc;
use rusqlite::types::ToSql;
use rusqlite::Connection;
use serde_json::Value;
use uuid::Uuid;
use vt_core::{Document, Error, Result, STORE_ID_FIELD};

use super::collections::ensure_collection;

/// Insert `doc` into `collection`, creating the collection if needed.
///
/// Any `_id` in `doc` is discarded; the store assigns its own. Returns the
/// new store id.
pub fn insert_document(
    conn: &Connection,
    database: &str,
    collection: &str,
    doc: &Document,
) -> Result<String> {
    let mut body = doc.clone();
    body.remove(STORE_ID_FIELD);
    let body = serde_json::to_string(&body).map_err(Error::query)?;

    let oid = Uuid::new_v4().to_string();
    let now = Utc::now().to_rfc3339();

    let tx = conn
        .unchecked_transaction()
        .map_err(|e| Error::query(e.to_string()))?;

    ensure_collection(&tx, database, collection)?;

    tx.execute(
        "INSERT INTO documents (oid, database, collection, body, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        rusqlite::params![oid, database, collection, body, now],
    )
    .map_err(|e| Error::query(e.to_string()))?;

    tx.commit().map_err(|e| Error::query(e.to_string()))?;

    Ok(oid)
}

/// Return up to `limit` documents of `collection` matching `filter`, in
/// insertion order, each carrying its store id under `_id`.
pub fn find_documents(
    conn: &Connection,
    database: &str,
    collection: &str,
    filter: &Document,
    limit: usize,
) -> Result<Vec<Document>> {
    let (clause, filter_params) = filter_clause(filter)?;
    if limit == 0 {
        return Ok(Vec::new());
    }

    let q = format!(
        "SELECT oid, body FROM documents
         WHERE database = ? AND collection = ?{clause}
         ORDER BY seq ASC LIMIT ?"
    );

    let mut params: Vec<Box<dyn ToSql>> =
        vec![Box::new(database.to_string()), Box::new(collection.to_string())];
    params.extend(filter_params);
    params.push(Box::new(i64::try_from(limit).unwrap_or(i64::MAX)));

    let params_refs: Vec<&dyn ToSql> = params.iter().map(|p| p.as_ref()).collect();
    let mut stmt = conn.prepare(&q).map_err(|e| Error::query(e.to_string()))?;
    let rows = stmt
        .query_map(params_refs.as_slice(), |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
        })
        .map_err(|e| Error::query(e.to_string()))?
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|e| Error::query(e.to_string()))?;

    rows.into_iter()
        .map(|(oid, body)| {
            let mut doc: Document = serde_json::from_str(&body)
                .map_err(|e| Error::query(format!("corrupt document {oid}: {e}")))?;
            doc.insert(STORE_ID_FIELD.to_string(), Value::String(oid));
            Ok(doc)
        })
        .collect()
}

/// Translate an equality filter into ` AND ...` SQL plus bound parameters.
fn filter_clause(filter: &Document) -> Result<(String, Vec<Box<dyn ToSql>>)> {
    let mut clause = String::new();
    let mut params: Vec<Box<dyn ToSql>> = Vec::new();

    for (key, value) in filter {
        if key == STORE_ID_FIELD {
            let Value::String(oid) = value else {
                return Err(Error::query("`_id` filter must be a string"));
            };
            clause.push_str(" AND oid = ?");
            params.push(Box::new(oid.clone()));
            continue;
        }

        let path = json_path(key)?;
        match value {
            Value::Null => {
                clause.push_str(" AND json_extract(body, ?) IS NULL");
                params.push(Box::new(path));
            }
            Value::Bool(b) => {
                // json_extract yields 1/0 for booleans, so compare on type.
                clause.push_str(" AND json_type(body, ?) = ?");
                params.push(Box::new(path));
                params.push(Box::new(b.to_string()));
            }
            Value::Number(n) => {
                clause.push_str(
                    " AND json_type(body, ?) IN ('integer', 'real') AND json_extract(body, ?) = ?",
                );
                params.push(Box::new(path.clone()));
                params.push(Box::new(path));
                match n.as_i64() {
                    Some(i) => params.push(Box::new(i)),
                    None => params.push(Box::new(n.as_f64().unwrap_or(f64::NAN))),
                }
            }
            Value::String(s) => {
                clause.push_str(" AND json_extract(body, ?) = ?");
                params.push(Box::new(path));
                params.push(Box::new(s.clone()));
            }
            Value::Array(_) | Value::Object(_) => {
                return Err(Error::query(format!(
                    "filter on `{key}` must be a scalar value"
                )));
            }
        }
    }

    Ok((clause, params))
}

/// Build a JSON path (`$."a"."b"`) from a dotted field name.
fn json_path(key: &str) -> Result<String> {
    if key.is_empty() || key.starts_with('$') {
        return Err(Error::query(format!("invalid filter key `{key}`")));
    }

    let mut path = String::from("$");
    for segment in key.split('.') {
        if segment.is_empty() || segment.contains('"') {
            return Err(Error::query(format!("invalid filter key `{key}`")));
        }
        path.push_str(".\"");
        path.push_str(segment);
        path.push('"');
    }
    Ok(path)
}
