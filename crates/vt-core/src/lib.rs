//! vt-core: shared error type, configuration, catalog models and schema
//! validation.
//!
//! This crate is the foundational dependency for the other vt-* crates.

pub mod config;
pub mod error;
pub mod media;
pub mod schema;

// Re-export the most commonly used items at the crate root.
pub use error::{Error, Result};
pub use media::*;
