//! # Subscriptions
//!
//! Per-user lists of followed songs.

pub mod errors;
pub mod service;

pub use errors::{SubscriptionError, SubscriptionResult};
pub use service::{SongRef, Subscription, SubscriptionService, SONG_KEY_ATTRIBUTE, USER_INDEX};
