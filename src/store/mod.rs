//! # Record Store
//!
//! Key-value tables with a composite primary key, global secondary indexes,
//! equality filters and conditional writes. Services depend on the
//! [`RecordStore`] trait; [`InMemoryRecordStore`] is the bundled backend.

pub mod errors;
pub mod item;
pub mod expression;
pub mod schema;
pub mod backend;
pub mod memory;

pub use errors::{StoreError, StoreResult};
pub use item::{AttributeValue, Item, Key};
pub use expression::{Condition, Equality, FilterExpression, KeyCondition};
pub use schema::{IndexSchema, KeySchema, TableSchema};
pub use backend::{QueryInput, RecordStore, MAX_BATCH_WRITE};
pub use memory::InMemoryRecordStore;
