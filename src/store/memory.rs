//! # In-Memory Record Store
//!
//! Tables are held in ordered maps keyed by primary key, so scans return
//! items in a stable order. Secondary indexes are evaluated by scanning the
//! table for items that carry the index key; items lacking it are simply not
//! part of the index.

use std::collections::{BTreeMap, HashMap};
use std::sync::RwLock;

use super::backend::{QueryInput, RecordStore, MAX_BATCH_WRITE};
use super::errors::{StoreError, StoreResult};
use super::expression::Condition;
use super::item::{Item, Key};
use super::schema::TableSchema;

#[derive(Debug)]
struct Table {
    schema: TableSchema,
    items: BTreeMap<Key, Item>,
}

impl Table {
    fn check_condition(&self, key: &Key, condition: Option<&Condition>) -> StoreResult<()> {
        match condition {
            Some(c) if !c.evaluate(self.items.get(key)) => Err(StoreError::ConditionFailed),
            _ => Ok(()),
        }
    }
}

/// In-memory record store
#[derive(Debug, Default)]
pub struct InMemoryRecordStore {
    tables: RwLock<HashMap<String, Table>>,
}

impl InMemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of items in a table
    pub fn item_count(&self, table: &str) -> StoreResult<usize> {
        let tables = self.tables.read().map_err(|_| StoreError::poisoned())?;
        tables
            .get(table)
            .map(|t| t.items.len())
            .ok_or_else(|| StoreError::TableNotFound(table.to_string()))
    }
}

impl RecordStore for InMemoryRecordStore {
    fn create_table(&self, schema: TableSchema) -> StoreResult<()> {
        let mut tables = self.tables.write().map_err(|_| StoreError::poisoned())?;
        if tables.contains_key(&schema.name) {
            return Err(StoreError::TableAlreadyExists(schema.name));
        }
        tables.insert(
            schema.name.clone(),
            Table {
                schema,
                items: BTreeMap::new(),
            },
        );
        Ok(())
    }

    fn list_tables(&self) -> StoreResult<Vec<String>> {
        let tables = self.tables.read().map_err(|_| StoreError::poisoned())?;
        let mut names: Vec<String> = tables.keys().cloned().collect();
        names.sort();
        Ok(names)
    }

    fn get_item(&self, table: &str, key: &Key) -> StoreResult<Option<Item>> {
        let tables = self.tables.read().map_err(|_| StoreError::poisoned())?;
        let t = tables
            .get(table)
            .ok_or_else(|| StoreError::TableNotFound(table.to_string()))?;
        t.schema.key.validate_key(key)?;
        Ok(t.items.get(key).cloned())
    }

    fn query(&self, table: &str, input: &QueryInput) -> StoreResult<Vec<Item>> {
        let tables = self.tables.read().map_err(|_| StoreError::poisoned())?;
        let t = tables
            .get(table)
            .ok_or_else(|| StoreError::TableNotFound(table.to_string()))?;

        let key_schema = t.schema.key_for(input.index.as_deref())?;
        if input.key_condition.partition.attribute != key_schema.hash_key {
            return Err(StoreError::Validation(format!(
                "Key condition must target hash key '{}'",
                key_schema.hash_key
            )));
        }
        if let Some(sort) = &input.key_condition.sort {
            if key_schema.range_key.as_deref() != Some(sort.attribute.as_str()) {
                return Err(StoreError::Validation(format!(
                    "'{}' is not the range key",
                    sort.attribute
                )));
            }
        }

        Ok(t.items
            .values()
            .filter(|item| input.key_condition.matches(item))
            .filter(|item| input.filter.as_ref().map_or(true, |f| f.matches(item)))
            .cloned()
            .collect())
    }

    fn put_item(&self, table: &str, item: Item, condition: Option<&Condition>) -> StoreResult<()> {
        let mut tables = self.tables.write().map_err(|_| StoreError::poisoned())?;
        let t = tables
            .get_mut(table)
            .ok_or_else(|| StoreError::TableNotFound(table.to_string()))?;
        let key = t.schema.key.key_of(&item)?;
        t.check_condition(&key, condition)?;
        t.items.insert(key, item);
        Ok(())
    }

    fn delete_item(&self, table: &str, key: &Key, condition: Option<&Condition>) -> StoreResult<()> {
        let mut tables = self.tables.write().map_err(|_| StoreError::poisoned())?;
        let t = tables
            .get_mut(table)
            .ok_or_else(|| StoreError::TableNotFound(table.to_string()))?;
        t.schema.key.validate_key(key)?;
        t.check_condition(key, condition)?;
        t.items.remove(key);
        Ok(())
    }

    fn batch_write(&self, table: &str, items: Vec<Item>) -> StoreResult<Vec<Item>> {
        if items.len() > MAX_BATCH_WRITE {
            return Err(StoreError::BatchTooLarge(items.len(), MAX_BATCH_WRITE));
        }
        let mut tables = self.tables.write().map_err(|_| StoreError::poisoned())?;
        let t = tables
            .get_mut(table)
            .ok_or_else(|| StoreError::TableNotFound(table.to_string()))?;

        // Validate the whole batch before applying any of it
        let keyed = items
            .into_iter()
            .map(|item| t.schema.key.key_of(&item).map(|k| (k, item)))
            .collect::<StoreResult<Vec<_>>>()?;
        for (key, item) in keyed {
            t.items.insert(key, item);
        }
        Ok(Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::expression::{FilterExpression, KeyCondition};
    use crate::store::item::{item, AttributeValue};
    use crate::store::schema::{IndexSchema, KeySchema};

    fn store_with_music() -> InMemoryRecordStore {
        let store = InMemoryRecordStore::new();
        store
            .create_table(
                TableSchema::new("music", KeySchema::hash("title").with_range("album"))
                    .with_index(IndexSchema::new("ArtistIndex", KeySchema::hash("artist")))
                    .with_index(IndexSchema::new("YearIndex", KeySchema::hash("year"))),
            )
            .unwrap();
        store
    }

    fn song(title: &str, album: &str, artist: &str, year: i64) -> Item {
        let mut it = item([("title", title), ("album", album), ("artist", artist)]);
        it.insert("year".into(), AttributeValue::N(year));
        it
    }

    #[test]
    fn test_put_get() {
        let store = store_with_music();
        store
            .put_item("music", song("Yellow", "Parachutes", "Coldplay", 2000), None)
            .unwrap();

        let key = item([("title", "Yellow"), ("album", "Parachutes")]);
        let found = store.get_item("music", &key).unwrap().unwrap();
        assert_eq!(found.get("artist"), Some(&AttributeValue::from("Coldplay")));
    }

    #[test]
    fn test_create_table_twice() {
        let store = store_with_music();
        let result = store.create_table(TableSchema::new("music", KeySchema::hash("title")));
        assert!(matches!(result, Err(StoreError::TableAlreadyExists(_))));
    }

    #[test]
    fn test_query_index_with_filter() {
        let store = store_with_music();
        store.put_item("music", song("Yellow", "Parachutes", "Coldplay", 2000), None).unwrap();
        store.put_item("music", song("Clocks", "A Rush of Blood", "Coldplay", 2002), None).unwrap();
        store.put_item("music", song("Hurt", "American IV", "Johnny Cash", 2002), None).unwrap();

        let all = store
            .query("music", &QueryInput::on_index("ArtistIndex", KeyCondition::partition("artist", "Coldplay")))
            .unwrap();
        assert_eq!(all.len(), 2);

        let filtered = store
            .query(
                "music",
                &QueryInput::on_index("ArtistIndex", KeyCondition::partition("artist", "Coldplay"))
                    .with_filter(FilterExpression::new().and_eq("year", 2002_i64)),
            )
            .unwrap();
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].get("title"), Some(&AttributeValue::from("Clocks")));
    }

    #[test]
    fn test_query_rejects_wrong_hash_key() {
        let store = store_with_music();
        let result = store.query(
            "music",
            &QueryInput::on_index("ArtistIndex", KeyCondition::partition("title", "Yellow")),
        );
        assert!(matches!(result, Err(StoreError::Validation(_))));
    }

    #[test]
    fn test_query_unknown_index() {
        let store = store_with_music();
        let result = store.query(
            "music",
            &QueryInput::on_index("GenreIndex", KeyCondition::partition("genre", "Rock")),
        );
        assert!(matches!(result, Err(StoreError::IndexNotFound { .. })));
    }

    #[test]
    fn test_conditional_put() {
        let store = store_with_music();
        let cond = Condition::attribute_not_exists("title");
        let s = song("Yellow", "Parachutes", "Coldplay", 2000);

        store.put_item("music", s.clone(), Some(&cond)).unwrap();
        assert_eq!(
            store.put_item("music", s, Some(&cond)),
            Err(StoreError::ConditionFailed)
        );
    }

    #[test]
    fn test_conditional_delete() {
        let store = store_with_music();
        let key = item([("title", "Yellow"), ("album", "Parachutes")]);
        let cond = Condition::attribute_exists("title");

        assert_eq!(
            store.delete_item("music", &key, Some(&cond)),
            Err(StoreError::ConditionFailed)
        );

        store.put_item("music", song("Yellow", "Parachutes", "Coldplay", 2000), None).unwrap();
        store.delete_item("music", &key, Some(&cond)).unwrap();
        assert!(store.get_item("music", &key).unwrap().is_none());
    }

    #[test]
    fn test_batch_write_limit() {
        let store = store_with_music();
        let items: Vec<Item> = (0..26)
            .map(|i| song(&format!("Song {}", i), "Album", "Artist", 2000))
            .collect();
        assert_eq!(
            store.batch_write("music", items),
            Err(StoreError::BatchTooLarge(26, MAX_BATCH_WRITE))
        );

        let items: Vec<Item> = (0..25)
            .map(|i| song(&format!("Song {}", i), "Album", "Artist", 2000))
            .collect();
        assert!(store.batch_write("music", items).unwrap().is_empty());
        assert_eq!(store.item_count("music").unwrap(), 25);
    }

    #[test]
    fn test_batch_write_is_all_or_nothing_on_invalid_item() {
        let store = store_with_music();
        let items = vec![
            song("Yellow", "Parachutes", "Coldplay", 2000),
            item([("title", "No Album")]),
        ];
        assert!(store.batch_write("music", items).is_err());
        assert_eq!(store.item_count("music").unwrap(), 0);
    }

    #[test]
    fn test_missing_table() {
        let store = InMemoryRecordStore::new();
        let key = item([("emailAddress", "a@b.co")]);
        assert!(matches!(
            store.get_item("login", &key),
            Err(StoreError::TableNotFound(_))
        ));
    }
}
