//! # Record Store Trait

use super::errors::StoreResult;
use super::expression::{Condition, FilterExpression, KeyCondition};
use super::item::{Item, Key};
use super::schema::TableSchema;

/// Maximum number of items accepted by a single batch write
pub const MAX_BATCH_WRITE: usize = 25;

/// Query against a table or one of its secondary indexes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryInput {
    /// Secondary index name, `None` for the table's primary key
    pub index: Option<String>,
    pub key_condition: KeyCondition,
    pub filter: Option<FilterExpression>,
}

impl QueryInput {
    pub fn primary(key_condition: KeyCondition) -> Self {
        Self {
            index: None,
            key_condition,
            filter: None,
        }
    }

    pub fn on_index(index: impl Into<String>, key_condition: KeyCondition) -> Self {
        Self {
            index: Some(index.into()),
            key_condition,
            filter: None,
        }
    }

    /// Attaches a residual filter; an empty filter is dropped
    pub fn with_filter(mut self, filter: FilterExpression) -> Self {
        self.filter = if filter.is_empty() { None } else { Some(filter) };
        self
    }
}

/// Key-value record store with secondary indexes and conditional writes
pub trait RecordStore: Send + Sync + std::fmt::Debug {
    /// Create a table
    fn create_table(&self, schema: TableSchema) -> StoreResult<()>;

    /// Names of all tables
    fn list_tables(&self) -> StoreResult<Vec<String>>;

    /// Fetch an item by its full primary key
    fn get_item(&self, table: &str, key: &Key) -> StoreResult<Option<Item>>;

    /// Query by key condition on the table or an index, then filter
    fn query(&self, table: &str, input: &QueryInput) -> StoreResult<Vec<Item>>;

    /// Insert or replace an item, guarded by an optional condition
    fn put_item(&self, table: &str, item: Item, condition: Option<&Condition>) -> StoreResult<()>;

    /// Delete an item, guarded by an optional condition
    fn delete_item(&self, table: &str, key: &Key, condition: Option<&Condition>) -> StoreResult<()>;

    /// Write up to [`MAX_BATCH_WRITE`] items; returns the items left unprocessed
    fn batch_write(&self, table: &str, items: Vec<Item>) -> StoreResult<Vec<Item>>;
}
