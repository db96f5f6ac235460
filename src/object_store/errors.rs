//! # Object Store Errors

use thiserror::Error;

/// Result type for object store operations
pub type ObjectStoreResult<T> = Result<T, ObjectStoreError>;

/// Object store errors
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ObjectStoreError {
    #[error("Bucket not found: {0}")]
    BucketNotFound(String),

    #[error("Bucket already exists: {0}")]
    BucketAlreadyExists(String),

    /// Signed URL could not be produced
    #[error("Sign error: {0}")]
    SignError(String),

    // Signed URL verification
    #[error("URL expired")]
    UrlExpired,

    #[error("Invalid signature")]
    InvalidSignature,

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ObjectStoreError {
    /// Get HTTP status code
    pub fn status_code(&self) -> u16 {
        match self {
            ObjectStoreError::BucketNotFound(_) => 404,
            ObjectStoreError::BucketAlreadyExists(_) => 409,
            ObjectStoreError::SignError(_) => 500,
            ObjectStoreError::UrlExpired => 403,
            ObjectStoreError::InvalidSignature => 403,
            ObjectStoreError::Internal(_) => 500,
        }
    }
}
