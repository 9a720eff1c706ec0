//! Catalog document shapes: media items, channels and their sub-records.
//!
//! URL-typed fields are kept as `String` and checked by [`crate::schema`],
//! so a document round-trips through the store byte-for-byte.

use serde::{Deserialize, Serialize};

/// A raw schema-less document as held by the store.
pub type Document = serde_json::Map<String, serde_json::Value>;

/// Collection holding [`MediaItem`] documents.
pub const MEDIA_ITEM_COLLECTION: &str = "mediaitem";

/// Collection holding [`Channel`] documents.
pub const CHANNEL_COLLECTION: &str = "channel";

/// Key under which the store exposes its internal identifier.
pub const STORE_ID_FIELD: &str = "_id";

/// Language assumed for a channel that does not declare one.
pub const DEFAULT_CHANNEL_LANGUAGE: &str = "pt-BR";

/// Content categories surfaced as home carousels.
///
/// `MediaItem::kind` is free text; items of any other kind are stored but
/// never appear in a carousel.
pub mod kind {
    pub const NOVELA: &str = "novela";
    pub const SERIE: &str = "serie";
    pub const FILME: &str = "filme";
    pub const PROGRAMA: &str = "programa";
}

/// An alternate audio rendition attached to a media item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct AudioTrack {
    /// e.g. "Original", "Audiodescrição".
    pub label: String,
    pub url: String,
    /// ISO language tag, e.g. `pt-BR`.
    #[serde(default)]
    pub language: Option<String>,
    /// Channel layout, e.g. `stereo`, `5.1`.
    #[serde(default)]
    pub channels: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct Season {
    pub number: i64,
    pub episodes: i64,
}

/// One piece of long-form content (novela, serie, filme, programa).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct MediaItem {
    /// Caller-assigned natural key.
    pub id: String,
    pub title: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub synopsis: String,
    #[serde(default)]
    pub cast: Vec<String>,
    #[serde(default)]
    pub seasons: Vec<Season>,
    pub banner: String,
    pub thumb: String,
    #[serde(default)]
    pub video_url: Option<String>,
    #[serde(default)]
    pub audio_tracks: Vec<AudioTrack>,
}

/// A live-stream channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct Channel {
    pub id: String,
    pub name: String,
    pub thumb: String,
    /// Live manifest endpoint.
    pub stream_url: String,
    /// Supplementary audio-description stream.
    #[serde(default)]
    pub alt_audio_url: Option<String>,
    #[serde(default = "default_channel_language")]
    pub language: Option<String>,
}

fn default_channel_language() -> Option<String> {
    Some(DEFAULT_CHANNEL_LANGUAGE.to_string())
}

/// A [`MediaItem`] read back from the store, with its internal id.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct StoredMediaItem {
    #[serde(rename = "_id")]
    pub store_id: String,
    #[serde(flatten)]
    pub item: MediaItem,
}

/// A [`Channel`] read back from the store, with its internal id.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct StoredChannel {
    #[serde(rename = "_id")]
    pub store_id: String,
    #[serde(flatten)]
    pub channel: Channel,
}
