//! # Image URL Resolution
//!
//! Exchanges each record's image key for a signed URL. A failure affects
//! only the record it happened on.

use std::sync::Arc;

use tracing::warn;

use super::record::{MusicRecord, MusicView};
use crate::object_store::ObjectStore;

/// Prefix of the placeholder written in place of a URL that could not be signed
pub const IMAGE_ERROR_PREFIX: &str = "Error generating URL: ";

/// Resolves image keys against one bucket
#[derive(Debug, Clone)]
pub struct ImageResolver {
    objects: Arc<dyn ObjectStore>,
    bucket: String,
    ttl_secs: u64,
}

impl ImageResolver {
    pub fn new(objects: Arc<dyn ObjectStore>, bucket: impl Into<String>, ttl_secs: u64) -> Self {
        Self {
            objects,
            bucket: bucket.into(),
            ttl_secs,
        }
    }

    /// Turns a record into its response shape
    pub fn resolve(&self, record: MusicRecord) -> MusicView {
        let key = record.image_key.as_deref().unwrap_or_default();
        let img_url = match self.objects.signed_url(&self.bucket, key, self.ttl_secs) {
            Ok(url) => url,
            Err(e) => {
                warn!(
                    title = %record.title,
                    album = %record.album,
                    image_key = key,
                    error = %e,
                    "image URL exchange failed"
                );
                format!("{}{}", IMAGE_ERROR_PREFIX, e)
            }
        };

        MusicView {
            title: record.title,
            album: record.album,
            artist: record.artist,
            year: record.year,
            img_url,
        }
    }

    /// Resolves every record, preserving order
    pub fn resolve_all(&self, records: Vec<MusicRecord>) -> Vec<MusicView> {
        records.into_iter().map(|r| self.resolve(r)).collect()
    }
}
