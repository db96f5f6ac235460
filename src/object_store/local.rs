//! # Local Object Store
//!
//! Tracks bucket names and signs retrieval URLs against a configured base
//! URL. Object bytes are served elsewhere.

use std::collections::BTreeSet;
use std::sync::RwLock;

use super::backend::ObjectStore;
use super::errors::{ObjectStoreError, ObjectStoreResult};
use super::signed_url::SignedUrlGenerator;

/// Bucket registry plus URL signer
#[derive(Debug)]
pub struct LocalObjectStore {
    base_url: String,
    generator: SignedUrlGenerator,
    buckets: RwLock<BTreeSet<String>>,
}

impl LocalObjectStore {
    /// Create a new store signing with `secret`
    pub fn new(base_url: impl Into<String>, secret: &[u8]) -> Self {
        Self {
            base_url: base_url.into(),
            generator: SignedUrlGenerator::new(secret),
            buckets: RwLock::new(BTreeSet::new()),
        }
    }
}

impl ObjectStore for LocalObjectStore {
    fn signed_url(&self, bucket: &str, key: &str, ttl_secs: u64) -> ObjectStoreResult<String> {
        if !self.bucket_exists(bucket)? {
            return Err(ObjectStoreError::SignError(format!("Bucket not found: {}", bucket)));
        }
        let signed = self.generator.generate(bucket, key, ttl_secs)?;
        Ok(signed.to_url(&self.base_url))
    }

    fn bucket_exists(&self, bucket: &str) -> ObjectStoreResult<bool> {
        let buckets = self
            .buckets
            .read()
            .map_err(|_| ObjectStoreError::Internal("Lock poisoned".to_string()))?;
        Ok(buckets.contains(bucket))
    }

    fn create_bucket(&self, bucket: &str) -> ObjectStoreResult<()> {
        let mut buckets = self
            .buckets
            .write()
            .map_err(|_| ObjectStoreError::Internal("Lock poisoned".to_string()))?;
        if !buckets.insert(bucket.to_string()) {
            return Err(ObjectStoreError::BucketAlreadyExists(bucket.to_string()));
        }
        Ok(())
    }
}
