//! # Object Store Trait

use super::errors::ObjectStoreResult;

/// Object store capability used by the catalog
pub trait ObjectStore: Send + Sync + std::fmt::Debug {
    /// Short-lived retrieval URL for an object
    fn signed_url(&self, bucket: &str, key: &str, ttl_secs: u64) -> ObjectStoreResult<String>;

    /// Check if a bucket exists
    fn bucket_exists(&self, bucket: &str) -> ObjectStoreResult<bool>;

    /// Create a bucket
    fn create_bucket(&self, bucket: &str) -> ObjectStoreResult<()>;
}
