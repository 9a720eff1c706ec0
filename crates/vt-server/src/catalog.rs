//! Catalog service: status, seeding, home carousels, item detail and
//! channel listing on top of a [`StoreHandle`].
//!
//! Every operation is a stateless read (or seed) against the store. The home
//! carousels are five independent queries, so they are not a consistent
//! snapshot under concurrent writes.

use serde::Serialize;
use serde_json::Value;

use vt_core::config::StoreConfig;
use vt_core::schema::{validate_channel, validate_media_item};
use vt_core::{
    kind, Document, Error, Result, StoredChannel, StoredMediaItem, CHANNEL_COLLECTION,
    MEDIA_ITEM_COLLECTION, STORE_ID_FIELD,
};
use vt_store::{DocumentStore, StoreHandle};

use crate::demo;

/// Items per home carousel.
pub const CAROUSEL_LIMIT: usize = 12;

/// Upper bound of the channel listing.
pub const CHANNEL_LIST_LIMIT: usize = 50;

/// Collections shown in the status report.
pub const STATUS_COLLECTION_LIMIT: usize = 10;

/// Longest diagnostic shown in the status report.
pub const STATUS_ERROR_MAX_CHARS: usize = 80;

/// Health report; building one never fails.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct StatusReport {
    pub backend: String,
    /// `connected`, `not connected` or `error`.
    pub database: String,
    pub database_url_set: bool,
    pub database_name_set: bool,
    pub store_configured: bool,
    pub store_connected: bool,
    pub collections: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Outcome of a seed run.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct SeedReport {
    pub seeded: bool,
    pub media_items_inserted: usize,
    pub channels_inserted: usize,
}

/// Homepage carousels.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct HomeCarousels {
    pub novelas: Vec<StoredMediaItem>,
    pub series: Vec<StoredMediaItem>,
    pub filmes: Vec<StoredMediaItem>,
    pub programas: Vec<StoredMediaItem>,
    pub canais: Vec<StoredChannel>,
}

/// The catalog operations behind every endpoint.
///
/// Cheaply cloneable; the store handle is shared.
#[derive(Debug, Clone)]
pub struct CatalogService {
    store: StoreHandle,
    url_set: bool,
    name_set: bool,
}

impl CatalogService {
    pub fn new(store: StoreHandle, store_config: &StoreConfig) -> Self {
        Self {
            store,
            url_set: store_config.url.is_some(),
            name_set: store_config.name.is_some(),
        }
    }

    pub fn store(&self) -> &StoreHandle {
        &self.store
    }

    /// Report backend and store health without failing.
    pub fn status(&self) -> StatusReport {
        let mut report = self.disconnected_report();

        let store = match self.store.get() {
            Ok(store) => store,
            Err(e) => {
                if report.store_configured {
                    report.error = Some(truncate_chars(&e.to_string(), STATUS_ERROR_MAX_CHARS));
                }
                return report;
            }
        };

        match store.list_collection_names() {
            Ok(mut names) => {
                names.truncate(STATUS_COLLECTION_LIMIT);
                report.database = "connected".into();
                report.store_connected = true;
                report.collections = names;
            }
            Err(e) => {
                tracing::warn!("Status check failed to list collections: {e}");
                report.database = "error".into();
                report.error = Some(truncate_chars(&e.to_string(), STATUS_ERROR_MAX_CHARS));
            }
        }

        report
    }

    /// Status report for a check that could not run at all.
    pub fn status_failed(&self, reason: &str) -> StatusReport {
        tracing::warn!("Status check failed: {reason}");
        StatusReport {
            database: "error".into(),
            error: Some(truncate_chars(reason, STATUS_ERROR_MAX_CHARS)),
            ..self.disconnected_report()
        }
    }

    fn disconnected_report(&self) -> StatusReport {
        StatusReport {
            backend: "running".into(),
            database: "not connected".into(),
            database_url_set: self.url_set,
            database_name_set: self.name_set,
            store_configured: self.url_set && self.name_set,
            store_connected: false,
            collections: Vec::new(),
            error: None,
        }
    }

    /// Load the demo catalog.
    ///
    /// Each collection is seeded only if it does not exist yet; the two are
    /// checked independently. Documents are validated before insert.
    pub fn seed(&self) -> Result<SeedReport> {
        let store = self.store.get()?;
        let existing = store.list_collection_names()?;
        let has = |name: &str| existing.iter().any(|c| c == name);

        let mut media_items_inserted = 0;
        if !has(MEDIA_ITEM_COLLECTION) {
            for doc in demo::media_items() {
                validate_media_item(&doc)?;
                store.create_document(MEDIA_ITEM_COLLECTION, &doc)?;
                media_items_inserted += 1;
            }
        }

        let mut channels_inserted = 0;
        if !has(CHANNEL_COLLECTION) {
            for doc in demo::channels() {
                validate_channel(&doc)?;
                store.create_document(CHANNEL_COLLECTION, &doc)?;
                channels_inserted += 1;
            }
        }

        tracing::info!(
            media_items = media_items_inserted,
            channels = channels_inserted,
            "Seed complete"
        );

        Ok(SeedReport {
            seeded: true,
            media_items_inserted,
            channels_inserted,
        })
    }

    /// Build the five home carousels. Any failing query fails the whole call.
    pub fn home(&self) -> Result<HomeCarousels> {
        Ok(HomeCarousels {
            novelas: self.media_by_kind(kind::NOVELA)?,
            series: self.media_by_kind(kind::SERIE)?,
            filmes: self.media_by_kind(kind::FILME)?,
            programas: self.media_by_kind(kind::PROGRAMA)?,
            canais: self.channels(CAROUSEL_LIMIT)?,
        })
    }

    /// Look up one media item by its natural key.
    pub fn item_detail(&self, id: &str) -> Result<StoredMediaItem> {
        let store = self.store.get()?;
        let filter = single_filter("id", id);
        let doc = store
            .find_document(MEDIA_ITEM_COLLECTION, &filter)?
            .ok_or_else(|| Error::not_found("item", id))?;

        stored_media_item(doc)
            .map_err(|e| Error::Internal(format!("stored item {id} is malformed: {e}")))
    }

    /// List live channels, at most [`CHANNEL_LIST_LIMIT`].
    pub fn list_channels(&self) -> Result<Vec<StoredChannel>> {
        self.channels(CHANNEL_LIST_LIMIT)
    }

    fn media_by_kind(&self, kind: &str) -> Result<Vec<StoredMediaItem>> {
        let filter = single_filter("type", kind);
        self.valid_documents(MEDIA_ITEM_COLLECTION, &filter, CAROUSEL_LIMIT, stored_media_item)
    }

    fn channels(&self, limit: usize) -> Result<Vec<StoredChannel>> {
        self.valid_documents(CHANNEL_COLLECTION, &Document::new(), limit, stored_channel)
    }

    /// Up to `limit` documents that pass validation.
    ///
    /// Malformed documents are skipped, so the query is widened until
    /// `limit` valid ones are found or the collection runs out.
    fn valid_documents<T>(
        &self,
        collection: &str,
        filter: &Document,
        limit: usize,
        convert: fn(Document) -> Result<T>,
    ) -> Result<Vec<T>> {
        let store = self.store.get()?;
        let mut fetch = limit;
        loop {
            let docs = store.get_documents(collection, filter, fetch)?;
            let exhausted = docs.len() < fetch;
            let mut valid = keep_valid(docs, convert);
            if valid.len() >= limit || exhausted {
                valid.truncate(limit);
                return Ok(valid);
            }
            fetch = fetch.saturating_mul(2);
        }
    }
}

fn single_filter(key: &str, value: &str) -> Document {
    let mut filter = Document::new();
    filter.insert(key.to_string(), Value::String(value.to_string()));
    filter
}

/// Convert documents, skipping (and logging) any that fail validation.
fn keep_valid<T>(docs: Vec<Document>, convert: fn(Document) -> Result<T>) -> Vec<T> {
    docs.into_iter()
        .filter_map(|doc| match convert(doc) {
            Ok(v) => Some(v),
            Err(e) => {
                tracing::warn!("Skipping malformed stored document: {e}");
                None
            }
        })
        .collect()
}

fn store_id(doc: &Document) -> Result<String> {
    doc.get(STORE_ID_FIELD)
        .and_then(Value::as_str)
        .map(String::from)
        .ok_or_else(|| Error::Internal("document has no store id".into()))
}

fn stored_media_item(doc: Document) -> Result<StoredMediaItem> {
    Ok(StoredMediaItem {
        store_id: store_id(&doc)?,
        item: validate_media_item(&doc)?,
    })
}

fn stored_channel(doc: Document) -> Result<StoredChannel> {
    Ok(StoredChannel {
        store_id: store_id(&doc)?,
        channel: validate_channel(&doc)?,
    })
}

fn truncate_chars(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}
