//! Demo catalog loaded by the seed operation.

use serde_json::{json, Value};
use vt_core::Document;

fn into_doc(v: Value) -> Document {
    match v {
        Value::Object(map) => map,
        _ => Document::new(),
    }
}

/// Demo media items: one novela and one serie.
pub fn media_items() -> Vec<Document> {
    [
        json!({
            "id": "novela-1",
            "title": "Amor em Vermelho",
            "type": "novela",
            "synopsis": "Uma história de paixão e segredos.",
            "cast": ["Ana Souza", "Carlos Lima"],
            "seasons": [{"number": 1, "episodes": 20}],
            "banner": "https://images.unsplash.com/photo-1517604931442-7e0c8ed2963f?q=80&w=1600&auto=format&fit=crop",
            "thumb": "https://images.unsplash.com/photo-1512428559087-560fa5ceab42?q=80&w=600&auto=format&fit=crop",
            "video_url": "https://commondatastorage.googleapis.com/gtv-videos-bucket/sample/BigBuckBunny.mp4",
            "audio_tracks": [
                {
                    "label": "Original",
                    "url": "https://www2.cs.uic.edu/~i101/SoundFiles/StarWars60.wav",
                    "language": "pt-BR",
                    "channels": "stereo"
                },
                {
                    "label": "Audiodescrição",
                    "url": "https://www2.cs.uic.edu/~i101/SoundFiles/ImperialMarch60.wav",
                    "language": "pt-BR",
                    "channels": "stereo"
                }
            ]
        }),
        json!({
            "id": "serie-1",
            "title": "Código 5.1",
            "type": "serie",
            "synopsis": "Suspense tecnológico com áudio imersivo.",
            "cast": ["Marina Dias", "João Pedro"],
            "seasons": [{"number": 1, "episodes": 8}],
            "banner": "https://images.unsplash.com/photo-1526948128573-703ee1aeb6fa?q=80&w=1600&auto=format&fit=crop",
            "thumb": "https://images.unsplash.com/photo-1515378791036-0648a3ef77b2?q=80&w=600&auto=format&fit=crop",
            "video_url": "https://commondatastorage.googleapis.com/gtv-videos-bucket/sample/ElephantsDream.mp4",
            "audio_tracks": [
                {
                    "label": "Original 5.1",
                    "url": "https://www2.cs.uic.edu/~i101/SoundFiles/CantinaBand60.wav",
                    "language": "en",
                    "channels": "5.1"
                }
            ]
        }),
    ]
    .into_iter()
    .map(into_doc)
    .collect()
}

/// Demo live channels.
pub fn channels() -> Vec<Document> {
    [
        json!({
            "id": "globo",
            "name": "Globo Ao Vivo",
            "thumb": "https://images.unsplash.com/photo-1522770179533-24471fcdba45?q=80&w=600&auto=format&fit=crop",
            "stream_url": "https://stream.mux.com/taW02VhFI02o02.m3u8",
            "alt_audio_url": "https://www2.cs.uic.edu/~i101/SoundFiles/Front_Center.wav"
        }),
        json!({
            "id": "sportv",
            "name": "SporTV",
            "thumb": "https://images.unsplash.com/photo-1517649763962-0c623066013b?q=80&w=600&auto=format&fit=crop",
            "stream_url": "https://test-streams.mux.dev/x36xhzz/x36xhzz.m3u8"
        }),
    ]
    .into_iter()
    .map(into_doc)
    .collect()
}
