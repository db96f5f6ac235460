//! # Record Store Errors

use thiserror::Error;

/// Result type for record store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Record store errors
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    // Table errors
    #[error("Table not found: {0}")]
    TableNotFound(String),

    #[error("Table already exists: {0}")]
    TableAlreadyExists(String),

    #[error("Index {index} not found on table {table}")]
    IndexNotFound { table: String, index: String },

    // Write errors
    #[error("The conditional request failed")]
    ConditionFailed,

    #[error("Batch of {0} items exceeds the limit of {1}")]
    BatchTooLarge(usize, usize),

    // Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    // Availability
    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

impl StoreError {
    /// Get HTTP status code
    pub fn status_code(&self) -> u16 {
        match self {
            StoreError::TableNotFound(_) => 500,
            StoreError::TableAlreadyExists(_) => 409,
            StoreError::IndexNotFound { .. } => 500,
            StoreError::ConditionFailed => 409,
            StoreError::BatchTooLarge(_, _) => 400,
            StoreError::Validation(_) => 400,
            StoreError::Unavailable(_) => 503,
        }
    }

    /// Lock poisoning is surfaced as an availability failure
    pub(crate) fn poisoned() -> Self {
        StoreError::Unavailable("Lock poisoned".to_string())
    }
}
