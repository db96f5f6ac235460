//! # Music Records
//!
//! Conversion between stored items and the typed record, plus the response
//! shape returned to callers once the image key has been exchanged for a URL.

use serde::Serialize;

use crate::store::{AttributeValue, Item, Key};

/// Attribute holding the object key of the record's image
pub const IMAGE_ATTRIBUTE: &str = "img_url";

/// A catalog entry; (title, album) is its identity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MusicRecord {
    pub title: String,
    pub album: String,
    pub artist: Option<String>,
    pub year: Option<i64>,
    pub image_key: Option<String>,
}

impl MusicRecord {
    /// Primary key for a (title, album) pair
    pub fn key(title: &str, album: &str) -> Key {
        let mut key = Key::new();
        key.insert("title".into(), AttributeValue::from(title));
        key.insert("album".into(), AttributeValue::from(album));
        key
    }

    /// Typed view of a stored item; `None` if title or album is missing
    pub fn from_item(item: &Item) -> Option<Self> {
        let text = |attr: &str| item.get(attr).and_then(|v| v.as_str()).map(str::to_string);

        Some(Self {
            title: text("title")?,
            album: text("album")?,
            artist: text("artist"),
            year: item.get("year").and_then(|v| v.as_i64()),
            image_key: text(IMAGE_ATTRIBUTE),
        })
    }

    pub fn to_item(&self) -> Item {
        let mut item = Self::key(&self.title, &self.album);
        if let Some(artist) = &self.artist {
            item.insert("artist".into(), AttributeValue::from(artist.as_str()));
        }
        if let Some(year) = self.year {
            item.insert("year".into(), AttributeValue::N(year));
        }
        if let Some(key) = &self.image_key {
            item.insert(IMAGE_ATTRIBUTE.into(), AttributeValue::from(key.as_str()));
        }
        item
    }
}

/// Record as returned to callers: `img_url` is a signed URL or an error
/// placeholder for that record alone
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MusicView {
    pub title: String,
    pub album: String,
    pub artist: Option<String>,
    pub year: Option<i64>,
    pub img_url: String,
}
