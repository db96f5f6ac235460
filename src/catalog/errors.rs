//! # Catalog Errors
//!
//! Failures of provisioning and bulk loading. Search never returns these;
//! it degrades to empty results instead.

use thiserror::Error;

use crate::object_store::ObjectStoreError;
use crate::store::StoreError;

/// Result type for catalog operations
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Catalog errors
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    ObjectStore(#[from] ObjectStoreError),

    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid song file: {0}")]
    InvalidFile(#[from] serde_json::Error),

    #[error("Invalid song '{title}': {reason}")]
    InvalidSong { title: String, reason: String },

    #[error("{0} items still unprocessed after {1} retries")]
    RetriesExhausted(usize, usize),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_error_is_transparent() {
        let err = CatalogError::from(StoreError::ConditionFailed);
        assert_eq!(err.to_string(), "The conditional request failed");
    }

    #[test]
    fn test_retries_message() {
        let err = CatalogError::RetriesExhausted(3, 5);
        assert_eq!(err.to_string(), "3 items still unprocessed after 5 retries");
    }
}
