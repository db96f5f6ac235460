//! # Signed URL Generation

use chrono::{DateTime, Duration, Utc};
use sha2::{Sha256, Digest};
use subtle::ConstantTimeEq;
use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};

use super::errors::{ObjectStoreError, ObjectStoreResult};

/// Default validity of a signed URL in seconds
pub const DEFAULT_URL_TTL_SECS: u64 = 3600;

/// Signed URL generator
#[derive(Debug)]
pub struct SignedUrlGenerator {
    secret: Vec<u8>,
}

impl SignedUrlGenerator {
    /// Create a new generator
    pub fn new(secret: &[u8]) -> Self {
        Self {
            secret: secret.to_vec(),
        }
    }

    /// Generate a signed URL valid for `ttl_secs` from now
    pub fn generate(&self, bucket: &str, key: &str, ttl_secs: u64) -> ObjectStoreResult<SignedUrl> {
        if key.is_empty() {
            return Err(ObjectStoreError::SignError("Object key must not be empty".to_string()));
        }
        let ttl = i64::try_from(ttl_secs)
            .ok()
            .and_then(Duration::try_seconds)
            .ok_or_else(|| ObjectStoreError::SignError(format!("TTL out of range: {}", ttl_secs)))?;
        let expires_at = Utc::now() + ttl;
        let signature = self.sign(bucket, key, expires_at.timestamp());

        Ok(SignedUrl {
            bucket: bucket.to_string(),
            key: key.to_string(),
            expires_at,
            signature,
        })
    }

    /// Verify a signed URL
    pub fn verify(&self, url: &SignedUrl) -> ObjectStoreResult<()> {
        if Utc::now() > url.expires_at {
            return Err(ObjectStoreError::UrlExpired);
        }

        let expected = self.sign(&url.bucket, &url.key, url.expires_at.timestamp());
        if !bool::from(url.signature.as_bytes().ct_eq(expected.as_bytes())) {
            return Err(ObjectStoreError::InvalidSignature);
        }

        Ok(())
    }

    fn sign(&self, bucket: &str, key: &str, expires_ts: i64) -> String {
        let mut hasher = Sha256::new();
        hasher.update(&self.secret);
        hasher.update(format!("{}/{}/{}", bucket, key, expires_ts).as_bytes());
        URL_SAFE_NO_PAD.encode(hasher.finalize())
    }
}

/// A signed URL
#[derive(Debug, Clone)]
pub struct SignedUrl {
    pub bucket: String,
    pub key: String,
    pub expires_at: DateTime<Utc>,
    pub signature: String,
}

impl SignedUrl {
    /// Render the URL string; the key is percent-encoded as one path segment
    pub fn to_url(&self, base_url: &str) -> String {
        format!(
            "{}/{}/{}?signature={}&expires={}",
            base_url.trim_end_matches('/'),
            self.bucket,
            urlencoding::encode(&self.key),
            self.signature,
            self.expires_at.timestamp()
        )
    }
}
