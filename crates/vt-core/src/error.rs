//! Unified error type for the catalog service.
//!
//! Every layer funnels its failures into [`Error`]; API handlers derive the
//! HTTP status from [`Error::http_status`].

use std::fmt;

/// Unified error type covering all failure modes of the catalog.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// No store connection is configured, or the connection was lost.
    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    /// A read or write against the store failed.
    #[error("Query error: {source}")]
    Query {
        /// The underlying store error.
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// A document does not match the MediaItem or Channel shape.
    #[error("Validation error: {0}")]
    Validation(String),

    /// A natural-key lookup found nothing.
    #[error("{entity} not found: {id}")]
    NotFound {
        /// The kind of entity (e.g. "item", "channel").
        entity: String,
        /// The identifier that was looked up.
        id: String,
    },

    /// An I/O operation failed.
    #[error("IO error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    /// Catch-all for unexpected internal errors.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Map this error to an HTTP status code.
    ///
    /// Only [`Error::NotFound`] is distinguished; everything else is a 500.
    pub fn http_status(&self) -> u16 {
        match self {
            Error::NotFound { .. } => 404,
            Error::StoreUnavailable(_)
            | Error::Query { .. }
            | Error::Validation(_)
            | Error::Io { .. }
            | Error::Internal(_) => 500,
        }
    }

    /// Short machine-readable code for the error kind.
    pub fn code(&self) -> &'static str {
        match self {
            Error::StoreUnavailable(_) => "store_unavailable",
            Error::Query { .. } => "query_error",
            Error::Validation(_) => "validation_error",
            Error::NotFound { .. } => "not_found",
            Error::Io { .. } => "io_error",
            Error::Internal(_) => "internal_error",
        }
    }

    /// Convenience constructor for [`Error::NotFound`].
    pub fn not_found(entity: impl Into<String>, id: impl fmt::Display) -> Self {
        Error::NotFound {
            entity: entity.into(),
            id: id.to_string(),
        }
    }

    /// Convenience constructor for [`Error::Query`].
    pub fn query(source: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Error::Query {
            source: source.into(),
        }
    }
}

/// Result alias using the crate-level [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
