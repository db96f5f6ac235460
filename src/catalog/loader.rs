//! # Seed Loader
//!
//! Reads a `{"songs": [...]}` file and writes the songs into the music
//! table in batches, resubmitting unprocessed items until the store
//! accepts them or the retry budget runs out.

use std::path::Path;
use std::sync::Arc;

use serde::Deserialize;
use tracing::{info, warn};

use super::errors::{CatalogError, CatalogResult};
use super::record::MusicRecord;
use crate::planner::YearInput;
use crate::store::{Item, RecordStore, MAX_BATCH_WRITE};

/// Default resubmission budget per batch
pub const DEFAULT_MAX_RETRIES: usize = 5;

/// Seed file layout
#[derive(Debug, Clone, Deserialize)]
pub struct SongFile {
    pub songs: Vec<Song>,
}

/// A song as it appears in the seed file
#[derive(Debug, Clone, Deserialize)]
pub struct Song {
    pub title: String,
    pub album: String,
    pub artist: String,
    pub year: YearInput,
}

impl Song {
    /// Record with a coerced year and an image key derived from the artist
    pub fn to_record(&self) -> CatalogResult<MusicRecord> {
        let year = self.year.coerce().ok_or_else(|| CatalogError::InvalidSong {
            title: self.title.clone(),
            reason: format!("year '{}' is not an integer", self.year),
        })?;

        Ok(MusicRecord {
            title: self.title.clone(),
            album: self.album.clone(),
            artist: Some(self.artist.clone()),
            year: Some(year),
            image_key: Some(image_key_for(&self.artist)),
        })
    }
}

/// Object key of an artist's image: spaces become underscores
pub fn image_key_for(artist: &str) -> String {
    format!("{}.jpg", artist.replace(' ', "_"))
}

/// Outcome of a load
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub items_written: usize,
    pub batches: usize,
    pub retries: usize,
}

/// Batch writer into the music table
#[derive(Debug, Clone)]
pub struct BatchLoader {
    store: Arc<dyn RecordStore>,
    table: String,
    max_retries: usize,
}

impl BatchLoader {
    pub fn new(store: Arc<dyn RecordStore>, table: impl Into<String>) -> Self {
        Self {
            store,
            table: table.into(),
            max_retries: DEFAULT_MAX_RETRIES,
        }
    }

    pub fn with_max_retries(mut self, max_retries: usize) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Parse and load a seed file
    pub fn load_file(&self, path: &Path) -> CatalogResult<LoadReport> {
        let raw = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let file: SongFile = serde_json::from_str(&raw)?;
        info!(path = %path.display(), songs = file.songs.len(), "loading seed file");
        self.load_songs(&file.songs)
    }

    /// Write songs in chunks of [`MAX_BATCH_WRITE`]
    ///
    /// Every song is validated before the first write.
    pub fn load_songs(&self, songs: &[Song]) -> CatalogResult<LoadReport> {
        let items = songs
            .iter()
            .map(|s| s.to_record().map(|r| r.to_item()))
            .collect::<CatalogResult<Vec<Item>>>()?;

        let mut report = LoadReport::default();
        for chunk in items.chunks(MAX_BATCH_WRITE) {
            report.retries += self.write_batch(chunk.to_vec())?;
            report.items_written += chunk.len();
            report.batches += 1;
        }

        info!(
            table = %self.table,
            items = report.items_written,
            batches = report.batches,
            retries = report.retries,
            "seed load complete"
        );
        Ok(report)
    }

    /// Returns the number of resubmissions the batch needed
    fn write_batch(&self, mut batch: Vec<Item>) -> CatalogResult<usize> {
        let mut attempts = 0;
        loop {
            let unprocessed = self.store.batch_write(&self.table, batch)?;
            if unprocessed.is_empty() {
                return Ok(attempts);
            }
            if attempts == self.max_retries {
                return Err(CatalogError::RetriesExhausted(unprocessed.len(), attempts));
            }
            attempts += 1;
            warn!(
                table = %self.table,
                unprocessed = unprocessed.len(),
                attempt = attempts,
                "resubmitting unprocessed items"
            );
            batch = unprocessed;
        }
    }
}
