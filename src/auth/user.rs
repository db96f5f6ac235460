//! # User Management
//!
//! User model and repository for authentication.
//! Users are stored as items in the login table, keyed by email address.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::crypto::{hash_password, verify_password};
use super::errors::{AuthError, AuthResult};
use crate::store::{AttributeValue, Condition, Item, Key, RecordStore, StoreError};

/// Hash key of the login table
pub const EMAIL_ATTRIBUTE: &str = "emailAddress";
const USER_NAME_ATTRIBUTE: &str = "userName";
const PASSWORD_ATTRIBUTE: &str = "passwordHash";
const ID_ATTRIBUTE: &str = "userId";
const CREATED_ATTRIBUTE: &str = "createdAt";

/// User model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Unique user identifier
    pub id: Uuid,

    /// User's email address (unique, the table key)
    pub email: String,

    /// Display name returned on login
    pub user_name: String,

    /// Argon2id password hash (never plaintext)
    #[serde(skip_serializing)]
    pub password_hash: String,

    /// When the user was created
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Create a new user, hashing the password
    pub fn new(email: String, user_name: String, password: &str) -> AuthResult<Self> {
        Ok(Self {
            id: Uuid::new_v4(),
            email,
            user_name,
            password_hash: hash_password(password)?,
            created_at: Utc::now(),
        })
    }

    /// Verify a password against this user's stored hash
    pub fn verify_password(&self, password: &str) -> AuthResult<bool> {
        verify_password(password, &self.password_hash)
    }

    pub fn key(email: &str) -> Key {
        let mut key = Key::new();
        key.insert(EMAIL_ATTRIBUTE.into(), AttributeValue::from(email));
        key
    }

    pub fn to_item(&self) -> Item {
        let mut item = Self::key(&self.email);
        item.insert(USER_NAME_ATTRIBUTE.into(), self.user_name.as_str().into());
        item.insert(PASSWORD_ATTRIBUTE.into(), self.password_hash.as_str().into());
        item.insert(ID_ATTRIBUTE.into(), self.id.to_string().into());
        item.insert(CREATED_ATTRIBUTE.into(), self.created_at.to_rfc3339().into());
        item
    }

    /// Rebuild a user from a login item; `None` if the item is incomplete
    pub fn from_item(item: &Item) -> Option<Self> {
        let text = |attr: &str| item.get(attr).and_then(|v| v.as_str());

        Some(Self {
            id: text(ID_ATTRIBUTE).and_then(|s| Uuid::parse_str(s).ok())?,
            email: text(EMAIL_ATTRIBUTE)?.to_string(),
            user_name: text(USER_NAME_ATTRIBUTE)?.to_string(),
            password_hash: text(PASSWORD_ATTRIBUTE)?.to_string(),
            created_at: text(CREATED_ATTRIBUTE)
                .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
                .map(|dt| dt.with_timezone(&Utc))?,
        })
    }
}

/// Registration request
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RegisterRequest {
    #[serde(rename = "emailAddress", default)]
    pub email: String,
    #[serde(rename = "userName", default)]
    pub user_name: String,
    #[serde(default)]
    pub password: String,
}

/// Login request
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginRequest {
    #[serde(rename = "emailAddress", default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// User repository trait
///
/// Abstracts storage operations for users.
pub trait UserRepository: Send + Sync + std::fmt::Debug {
    /// Find a user by their email
    fn find_by_email(&self, email: &str) -> AuthResult<Option<User>>;

    /// Check if an email is registered
    fn email_exists(&self, email: &str) -> AuthResult<bool>;

    /// Create a new user; fails if the email is taken
    fn create(&self, user: &User) -> AuthResult<()>;
}

/// Users in the login table of a record store
#[derive(Debug, Clone)]
pub struct StoreUserRepository {
    store: Arc<dyn RecordStore>,
    table: String,
}

impl StoreUserRepository {
    pub fn new(store: Arc<dyn RecordStore>, table: impl Into<String>) -> Self {
        Self {
            store,
            table: table.into(),
        }
    }
}

impl UserRepository for StoreUserRepository {
    fn find_by_email(&self, email: &str) -> AuthResult<Option<User>> {
        let item = self.store.get_item(&self.table, &User::key(email))?;
        Ok(item.as_ref().and_then(User::from_item))
    }

    fn email_exists(&self, email: &str) -> AuthResult<bool> {
        Ok(self.store.get_item(&self.table, &User::key(email))?.is_some())
    }

    fn create(&self, user: &User) -> AuthResult<()> {
        let condition = Condition::attribute_not_exists(EMAIL_ATTRIBUTE);
        self.store
            .put_item(&self.table, user.to_item(), Some(&condition))
            .map_err(|e| match e {
                StoreError::ConditionFailed => AuthError::EmailAlreadyExists,
                other => AuthError::Storage(other),
            })
    }
}
