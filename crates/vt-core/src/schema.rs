//! Shape and URL validation for catalog documents.
//!
//! The store enforces no schema, so every document is checked here before it
//! is inserted and again when it is read back.

use serde::de::DeserializeOwned;
use url::Url;

use crate::error::{Error, Result};
use crate::media::{Channel, Document, MediaItem};

/// Longest URL accepted, matching what browsers reliably handle.
pub const MAX_URL_LEN: usize = 2083;

/// Validate `doc` as a [`MediaItem`].
///
/// Fails if `id`, `title`, `type`, `synopsis`, `banner` or `thumb` is
/// missing, or if any URL field (including each audio-track `url`) is not
/// an absolute http(s) URL.
pub fn validate_media_item(doc: &Document) -> Result<MediaItem> {
    let item: MediaItem = decode("media item", doc)?;

    check_url("banner", &item.banner)?;
    check_url("thumb", &item.thumb)?;
    if let Some(ref video_url) = item.video_url {
        check_url("video_url", video_url)?;
    }
    for (i, track) in item.audio_tracks.iter().enumerate() {
        check_url(&format!("audio_tracks[{i}].url"), &track.url)?;
    }

    Ok(item)
}

/// Validate `doc` as a [`Channel`].
pub fn validate_channel(doc: &Document) -> Result<Channel> {
    let channel: Channel = decode("channel", doc)?;

    check_url("thumb", &channel.thumb)?;
    check_url("stream_url", &channel.stream_url)?;
    if let Some(ref alt) = channel.alt_audio_url {
        check_url("alt_audio_url", alt)?;
    }

    Ok(channel)
}

fn decode<T: DeserializeOwned>(what: &str, doc: &Document) -> Result<T> {
    serde_json::from_value(serde_json::Value::Object(doc.clone()))
        .map_err(|e| Error::Validation(format!("{what}: {e}")))
}

/// Check that `value` is an absolute http(s) URL with a host.
pub fn check_url(field: &str, value: &str) -> Result<()> {
    if value.len() > MAX_URL_LEN {
        return Err(Error::Validation(format!(
            "{field}: URL longer than {MAX_URL_LEN} characters"
        )));
    }

    let parsed = Url::parse(value)
        .map_err(|e| Error::Validation(format!("{field}: invalid URL `{value}`: {e}")))?;

    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(Error::Validation(format!(
            "{field}: unsupported URL scheme `{}`",
            parsed.scheme()
        )));
    }
    if parsed.host_str().map_or(true, str::is_empty) {
        return Err(Error::Validation(format!("{field}: URL has no host")));
    }

    Ok(())
}
