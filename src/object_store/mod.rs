//! # Object Store
//!
//! Buckets of images referenced by catalog records, and time-bounded
//! signed retrieval URLs for them.

pub mod errors;
pub mod backend;
pub mod local;
pub mod signed_url;

pub use errors::{ObjectStoreError, ObjectStoreResult};
pub use backend::ObjectStore;
pub use local::LocalObjectStore;
pub use signed_url::{SignedUrl, SignedUrlGenerator, DEFAULT_URL_TTL_SECS};
