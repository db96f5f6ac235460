//! # Music Catalog
//!
//! Search over the music table with signed image URLs, table and bucket
//! provisioning, and bulk loading of seed data.

pub mod errors;
pub mod images;
pub mod loader;
pub mod provision;
pub mod record;
pub mod search;

pub use errors::{CatalogError, CatalogResult};
pub use images::{ImageResolver, IMAGE_ERROR_PREFIX};
pub use loader::{image_key_for, BatchLoader, LoadReport, Song, SongFile, DEFAULT_MAX_RETRIES};
pub use provision::{login_table, music_table, provision, subscribe_table, ProvisionReport};
pub use record::{MusicRecord, MusicView, IMAGE_ATTRIBUTE};
pub use search::MusicSearch;
