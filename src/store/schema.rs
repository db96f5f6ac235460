//! # Table Schemas
//!
//! Key layout of a table and its global secondary indexes. Every index
//! projects all attributes.

use super::errors::{StoreError, StoreResult};
use super::item::{Item, Key};

/// Hash (partition) key with an optional range (sort) key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeySchema {
    pub hash_key: String,
    pub range_key: Option<String>,
}

impl KeySchema {
    pub fn hash(attribute: impl Into<String>) -> Self {
        Self {
            hash_key: attribute.into(),
            range_key: None,
        }
    }

    pub fn with_range(mut self, attribute: impl Into<String>) -> Self {
        self.range_key = Some(attribute.into());
        self
    }

    /// Attribute names making up the key, hash first
    pub fn attributes(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.hash_key.as_str()).chain(self.range_key.as_deref())
    }

    /// Extracts the key of an item, failing if a key attribute is missing
    pub fn key_of(&self, item: &Item) -> StoreResult<Key> {
        self.attributes()
            .map(|attr| {
                item.get(attr)
                    .map(|v| (attr.to_string(), v.clone()))
                    .ok_or_else(|| {
                        StoreError::Validation(format!("Missing key attribute '{}'", attr))
                    })
            })
            .collect()
    }

    /// Checks that `key` names exactly the key attributes
    pub fn validate_key(&self, key: &Key) -> StoreResult<()> {
        let expected = self.attributes().count();
        if key.len() != expected || !self.attributes().all(|a| key.contains_key(a)) {
            return Err(StoreError::Validation(format!(
                "Key must consist of exactly: {}",
                self.attributes().collect::<Vec<_>>().join(", ")
            )));
        }
        Ok(())
    }
}

/// Global secondary index definition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexSchema {
    pub name: String,
    pub key: KeySchema,
}

impl IndexSchema {
    pub fn new(name: impl Into<String>, key: KeySchema) -> Self {
        Self {
            name: name.into(),
            key,
        }
    }
}

/// Table definition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSchema {
    pub name: String,
    pub key: KeySchema,
    pub indexes: Vec<IndexSchema>,
}

impl TableSchema {
    pub fn new(name: impl Into<String>, key: KeySchema) -> Self {
        Self {
            name: name.into(),
            key,
            indexes: Vec::new(),
        }
    }

    pub fn with_index(mut self, index: IndexSchema) -> Self {
        self.indexes.push(index);
        self
    }

    /// Key schema of the named index, or of the table itself for `None`
    pub fn key_for(&self, index: Option<&str>) -> StoreResult<&KeySchema> {
        match index {
            None => Ok(&self.key),
            Some(name) => self
                .indexes
                .iter()
                .find(|i| i.name == name)
                .map(|i| &i.key)
                .ok_or_else(|| StoreError::IndexNotFound {
                    table: self.name.clone(),
                    index: name.to_string(),
                }),
        }
    }
}
