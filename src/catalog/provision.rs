//! # Provisioning
//!
//! Creates the login, music and subscription tables and the image bucket
//! when they are missing. Existing resources are left untouched, so
//! provisioning can run on every start.

use tracing::info;

use super::errors::CatalogResult;
use crate::auth::EMAIL_ATTRIBUTE;
use crate::config::TableNames;
use crate::object_store::ObjectStore;
use crate::planner::SearchField;
use crate::store::{IndexSchema, KeySchema, RecordStore, TableSchema};
use crate::subscription::{SONG_KEY_ATTRIBUTE, USER_INDEX};

/// Users, keyed by email address
pub fn login_table(name: &str) -> TableSchema {
    TableSchema::new(name, KeySchema::hash(EMAIL_ATTRIBUTE))
}

/// Songs, keyed by (title, album) with one index per searchable attribute
pub fn music_table(name: &str) -> TableSchema {
    SearchField::ALL.iter().fold(
        TableSchema::new(name, KeySchema::hash("title").with_range("album")),
        |schema, field| {
            schema.with_index(IndexSchema::new(
                field.index_name(),
                KeySchema::hash(field.attribute()),
            ))
        },
    )
}

/// Subscriptions, keyed by (email, "title#album")
pub fn subscribe_table(name: &str) -> TableSchema {
    TableSchema::new(
        name,
        KeySchema::hash(EMAIL_ATTRIBUTE).with_range(SONG_KEY_ATTRIBUTE),
    )
    .with_index(IndexSchema::new(USER_INDEX, KeySchema::hash(EMAIL_ATTRIBUTE)))
}

/// What a provisioning run created
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProvisionReport {
    pub created_tables: Vec<String>,
    pub created_bucket: bool,
}

impl ProvisionReport {
    pub fn is_noop(&self) -> bool {
        self.created_tables.is_empty() && !self.created_bucket
    }
}

/// Create any missing table or bucket
pub fn provision(
    store: &dyn RecordStore,
    objects: &dyn ObjectStore,
    tables: &TableNames,
    bucket: &str,
) -> CatalogResult<ProvisionReport> {
    let existing = store.list_tables()?;
    let mut report = ProvisionReport::default();

    for schema in [
        login_table(&tables.login),
        music_table(&tables.music),
        subscribe_table(&tables.subscribe),
    ] {
        if existing.iter().any(|t| t == &schema.name) {
            info!(table = %schema.name, "table already exists");
            continue;
        }
        let name = schema.name.clone();
        store.create_table(schema)?;
        info!(table = %name, "created table");
        report.created_tables.push(name);
    }

    if objects.bucket_exists(bucket)? {
        info!(bucket, "bucket already exists");
    } else {
        objects.create_bucket(bucket)?;
        info!(bucket, "created bucket");
        report.created_bucket = true;
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object_store::LocalObjectStore;
    use crate::store::InMemoryRecordStore;

    fn names() -> TableNames {
        TableNames::default()
    }

    #[test]
    fn test_music_table_indexes() {
        let schema = music_table("music");
        let names: Vec<&str> = schema.indexes.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["TitleIndex", "AlbumIndex", "ArtistIndex", "YearIndex"]);
        assert!(schema.key_for(Some("YearIndex")).is_ok());
        assert_eq!(schema.key.range_key.as_deref(), Some("album"));
    }

    #[test]
    fn test_provision_creates_everything() {
        let store = InMemoryRecordStore::new();
        let objects = LocalObjectStore::new("http://img.local", b"secret");

        let report = provision(&store, &objects, &names(), "images").unwrap();
        assert_eq!(report.created_tables, vec!["login", "music", "subscribe"]);
        assert!(report.created_bucket);
        assert!(objects.bucket_exists("images").unwrap());
    }

    #[test]
    fn test_provision_is_idempotent() {
        let store = InMemoryRecordStore::new();
        let objects = LocalObjectStore::new("http://img.local", b"secret");

        provision(&store, &objects, &names(), "images").unwrap();
        let again = provision(&store, &objects, &names(), "images").unwrap();
        assert!(again.is_noop());
    }

    #[test]
    fn test_provision_fills_gaps() {
        let store = InMemoryRecordStore::new();
        store.create_table(music_table("music")).unwrap();
        let objects = LocalObjectStore::new("http://img.local", b"secret");
        objects.create_bucket("images").unwrap();

        let report = provision(&store, &objects, &names(), "images").unwrap();
        assert_eq!(report.created_tables, vec!["login", "subscribe"]);
        assert!(!report.created_bucket);
    }
}
