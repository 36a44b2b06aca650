//! Errors returned by store backends and the query layer.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum StoreError {
    /// The string is not a well-formed identifier for this store.
    #[error("invalid recipe id: {0}")]
    InvalidId(String),

    #[error("invalid page: number {number}, size {size}")]
    InvalidPage { number: i64, size: i64 },

    /// A unique key already exists (e.g. a taken username).
    #[error("already exists: {0}")]
    Conflict(String),

    /// Failure inside the database driver.
    #[error("store backend error: {0}")]
    Backend(String),
}
