//! # Subscription Service
//!
//! A subscription links a user's email to one (title, album) song. The
//! subscribe table is keyed by email with the composite `"title#album"`
//! as range key; the song's title and album are also kept as plain
//! attributes so listing never has to split the composite.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::errors::{SubscriptionError, SubscriptionResult};
use crate::auth::{AuthService, EMAIL_ATTRIBUTE};
use crate::catalog::{ImageResolver, MusicRecord, MusicView};
use crate::store::{AttributeValue, Condition, Item, Key, KeyCondition, QueryInput, RecordStore, StoreError};

/// Range key of the subscribe table
pub const SONG_KEY_ATTRIBUTE: &str = "title#album";

/// Index on the subscribe table by user
pub const USER_INDEX: &str = "userIndex";

/// Identifies a song by its music table key
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SongRef {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub album: String,
}

impl SongRef {
    pub fn new(title: impl Into<String>, album: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            album: album.into(),
        }
    }

    /// Composite range key, `"title#album"`
    pub fn song_key(&self) -> String {
        format!("{}#{}", self.title, self.album)
    }

    fn require(&self) -> SubscriptionResult<()> {
        if self.title.trim().is_empty() || self.album.trim().is_empty() {
            return Err(SubscriptionError::MissingSong);
        }
        Ok(())
    }
}

/// A stored subscription
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subscription {
    pub email: String,
    pub song: SongRef,
}

impl Subscription {
    fn key(email: &str, song: &SongRef) -> Key {
        let mut key = Key::new();
        key.insert(EMAIL_ATTRIBUTE.into(), AttributeValue::from(email));
        key.insert(SONG_KEY_ATTRIBUTE.into(), AttributeValue::from(song.song_key()));
        key
    }

    fn to_item(&self) -> Item {
        let mut item = Self::key(&self.email, &self.song);
        item.insert("title".into(), self.song.title.as_str().into());
        item.insert("album".into(), self.song.album.as_str().into());
        item
    }

    fn from_item(item: &Item) -> Option<Self> {
        let text = |attr: &str| item.get(attr).and_then(|v| v.as_str()).map(str::to_string);
        Some(Self {
            email: text(EMAIL_ATTRIBUTE)?,
            song: SongRef::new(text("title")?, text("album")?),
        })
    }
}

/// Token-gated subscription management
#[derive(Debug, Clone)]
pub struct SubscriptionService {
    store: Arc<dyn RecordStore>,
    table: String,
    music_table: String,
    auth: AuthService,
    images: ImageResolver,
}

impl SubscriptionService {
    pub fn new(
        store: Arc<dyn RecordStore>,
        table: impl Into<String>,
        music_table: impl Into<String>,
        auth: AuthService,
        images: ImageResolver,
    ) -> Self {
        Self {
            store,
            table: table.into(),
            music_table: music_table.into(),
            auth,
            images,
        }
    }

    /// Subscribe the token's user to a song
    pub fn subscribe(&self, token: &str, song: &SongRef) -> SubscriptionResult<Subscription> {
        let claims = self.auth.verify(token)?;
        song.require()?;

        let subscription = Subscription {
            email: claims.email,
            song: song.clone(),
        };
        let condition = Condition::attribute_not_exists(EMAIL_ATTRIBUTE)
            .and(Condition::attribute_not_exists(SONG_KEY_ATTRIBUTE));

        self.store
            .put_item(&self.table, subscription.to_item(), Some(&condition))
            .map_err(|e| match e {
                StoreError::ConditionFailed => SubscriptionError::AlreadySubscribed(song.song_key()),
                other => SubscriptionError::Store(other),
            })?;

        info!(email = %subscription.email, song = %song.song_key(), "subscribed");
        Ok(subscription)
    }

    /// Remove a subscription; it must exist
    pub fn unsubscribe(&self, token: &str, song: &SongRef) -> SubscriptionResult<()> {
        let claims = self.auth.verify(token)?;
        song.require()?;

        let condition = Condition::attribute_exists(EMAIL_ATTRIBUTE)
            .and(Condition::attribute_exists(SONG_KEY_ATTRIBUTE));

        self.store
            .delete_item(&self.table, &Subscription::key(&claims.email, song), Some(&condition))
            .map_err(|e| match e {
                StoreError::ConditionFailed => SubscriptionError::NotSubscribed(song.song_key()),
                other => SubscriptionError::Store(other),
            })?;

        info!(email = %claims.email, song = %song.song_key(), "unsubscribed");
        Ok(())
    }

    /// The token's subscriptions, resolved to music records with image URLs
    pub fn list(&self, token: &str) -> SubscriptionResult<Vec<MusicView>> {
        let claims = self.auth.verify(token)?;

        let query = QueryInput::on_index(
            USER_INDEX,
            KeyCondition::partition(EMAIL_ATTRIBUTE, claims.email.as_str()),
        );
        let subscriptions = self.store.query(&self.table, &query)?;

        let mut records = Vec::with_capacity(subscriptions.len());
        for item in &subscriptions {
            let Some(sub) = Subscription::from_item(item) else {
                warn!(email = %claims.email, "skipping malformed subscription");
                continue;
            };

            let key = MusicRecord::key(&sub.song.title, &sub.song.album);
            match self
                .store
                .get_item(&self.music_table, &key)?
                .as_ref()
                .and_then(MusicRecord::from_item)
            {
                Some(record) => records.push(record),
                None => warn!(song = %sub.song.song_key(), "subscription references a missing song"),
            }
        }

        Ok(self.images.resolve_all(records))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{EncodedClaimCodec, LoginRequest, RegisterRequest, StoreUserRepository};
    use crate::catalog::{login_table, music_table, subscribe_table};
    use crate::object_store::{LocalObjectStore, ObjectStore};
    use crate::store::InMemoryRecordStore;
    use chrono::Duration;

    struct Fixture {
        service: SubscriptionService,
        store: Arc<InMemoryRecordStore>,
        token: String,
    }

    fn fixture() -> Fixture {
        let store = Arc::new(InMemoryRecordStore::new());
        store.create_table(login_table("login")).unwrap();
        store.create_table(music_table("music")).unwrap();
        store.create_table(subscribe_table("subscribe")).unwrap();

        for (title, album) in [("Hurt", "American IV"), ("One", "Achtung Baby")] {
            let record = MusicRecord {
                title: title.into(),
                album: album.into(),
                artist: Some("Someone".into()),
                year: Some(1991),
                image_key: Some("Someone.jpg".into()),
            };
            store.put_item("music", record.to_item(), None).unwrap();
        }

        let users = StoreUserRepository::new(store.clone(), "login");
        let auth = AuthService::new(Arc::new(users), Arc::new(EncodedClaimCodec), Duration::days(2));
        auth.register(RegisterRequest {
            email: "a@b.com".into(),
            user_name: "alice".into(),
            password: "pw".into(),
        })
        .unwrap();
        let token = auth
            .login(LoginRequest {
                email: "a@b.com".into(),
                password: "pw".into(),
            })
            .unwrap()
            .token;

        let objects = LocalObjectStore::new("http://img.local", b"secret");
        objects.create_bucket("images").unwrap();
        let images = ImageResolver::new(Arc::new(objects), "images", 3600);

        Fixture {
            service: SubscriptionService::new(store.clone(), "subscribe", "music", auth, images),
            store,
            token,
        }
    }

    #[test]
    fn test_subscribe_and_list() {
        let f = fixture();
        f.service.subscribe(&f.token, &SongRef::new("Hurt", "American IV")).unwrap();

        let stored = f
            .store
            .get_item("subscribe", &Subscription::key("a@b.com", &SongRef::new("Hurt", "American IV")))
            .unwrap()
            .unwrap();
        assert_eq!(
            stored.get(SONG_KEY_ATTRIBUTE),
            Some(&AttributeValue::from("Hurt#American IV"))
        );

        let list = f.service.list(&f.token).unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].title, "Hurt");
        assert!(list[0].img_url.contains("Someone.jpg"));
    }

    #[test]
    fn test_duplicate_subscribe() {
        let f = fixture();
        let song = SongRef::new("Hurt", "American IV");
        f.service.subscribe(&f.token, &song).unwrap();
        assert_eq!(
            f.service.subscribe(&f.token, &song).unwrap_err(),
            SubscriptionError::AlreadySubscribed("Hurt#American IV".into())
        );
    }

    #[test]
    fn test_unsubscribe() {
        let f = fixture();
        let song = SongRef::new("One", "Achtung Baby");
        f.service.subscribe(&f.token, &song).unwrap();
        f.service.unsubscribe(&f.token, &song).unwrap();

        assert!(f.service.list(&f.token).unwrap().is_empty());
        assert_eq!(
            f.service.unsubscribe(&f.token, &song).unwrap_err().status_code(),
            404
        );
    }

    #[test]
    fn test_missing_song_fields() {
        let f = fixture();
        assert_eq!(
            f.service.subscribe(&f.token, &SongRef::new("Hurt", "")).unwrap_err(),
            SubscriptionError::MissingSong
        );
    }

    #[test]
    fn test_invalid_token() {
        let f = fixture();
        let err = f.service.list("not-a-token").unwrap_err();
        assert_eq!(err.status_code(), 401);
    }

    #[test]
    fn test_dangling_subscription_skipped() {
        let f = fixture();
        f.service.subscribe(&f.token, &SongRef::new("Hurt", "American IV")).unwrap();
        f.service.subscribe(&f.token, &SongRef::new("Gone", "Nowhere")).unwrap();

        let list = f.service.list(&f.token).unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].album, "American IV");
    }
}
