//! Database query modules.

pub mod collections;
pub mod documents;
