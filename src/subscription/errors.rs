//! # Subscription Errors

use thiserror::Error;

use crate::auth::AuthError;
use crate::store::StoreError;

/// Result type for subscription operations
pub type SubscriptionResult<T> = Result<T, SubscriptionError>;

/// Subscription errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SubscriptionError {
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error("Title and album are required")]
    MissingSong,

    #[error("Already subscribed to '{0}'")]
    AlreadySubscribed(String),

    #[error("Not subscribed to '{0}'")]
    NotSubscribed(String),

    #[error("Storage error: {0}")]
    Store(#[from] StoreError),
}

impl SubscriptionError {
    /// Get HTTP status code
    pub fn status_code(&self) -> u16 {
        match self {
            SubscriptionError::Auth(e) => e.status_code(),
            SubscriptionError::MissingSong => 400,
            SubscriptionError::AlreadySubscribed(_) => 409,
            SubscriptionError::NotSubscribed(_) => 404,
            SubscriptionError::Store(e) => e.status_code(),
        }
    }
}
