//! Application bootstrap
//!
//! Wires configuration, stores and services together: provisions tables
//! and the image bucket, loads the seed file if configured, and builds
//! the auth, search and subscription services sharing one record store.

use std::sync::Arc;

use thiserror::Error;
use tracing::info;

use crate::auth::{codec_for, AuthService, StoreUserRepository};
use crate::catalog::{provision, BatchLoader, CatalogError, ImageResolver, MusicSearch};
use crate::config::{AppConfig, ConfigError};
use crate::object_store::{LocalObjectStore, ObjectStore};
use crate::store::{InMemoryRecordStore, RecordStore};
use crate::subscription::SubscriptionService;

/// Bootstrap errors
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

pub type AppResult<T> = Result<T, AppError>;

/// Fully wired service set
#[derive(Debug, Clone)]
pub struct App {
    pub config: AppConfig,
    pub store: Arc<dyn RecordStore>,
    pub objects: Arc<dyn ObjectStore>,
    pub auth: AuthService,
    pub search: MusicSearch,
    pub subscriptions: SubscriptionService,
}

impl App {
    /// Bootstrap over the bundled in-memory stores
    pub fn bootstrap(config: AppConfig) -> AppResult<Self> {
        let config = config.with_resolved_secrets();
        let secret = config.signing_secret.clone().unwrap_or_default();

        let store: Arc<dyn RecordStore> = Arc::new(InMemoryRecordStore::new());
        let objects: Arc<dyn ObjectStore> =
            Arc::new(LocalObjectStore::new(config.object_base_url.clone(), secret.as_bytes()));

        Self::with_stores(config, store, objects)
    }

    /// Bootstrap over caller-supplied stores
    pub fn with_stores(
        config: AppConfig,
        store: Arc<dyn RecordStore>,
        objects: Arc<dyn ObjectStore>,
    ) -> AppResult<Self> {
        config.validate()?;

        let report = provision(store.as_ref(), objects.as_ref(), &config.tables, &config.bucket)?;
        if !report.is_noop() {
            info!(
                tables = ?report.created_tables,
                bucket = report.created_bucket,
                "provisioned catalog resources"
            );
        }

        if let Some(seed) = &config.seed_file {
            BatchLoader::new(store.clone(), config.tables.music.clone()).load_file(seed)?;
        }

        let codec = codec_for(
            config.token_scheme,
            config.token_secret.as_deref().unwrap_or_default(),
        );
        let users = StoreUserRepository::new(store.clone(), config.tables.login.clone());
        let auth = AuthService::new(Arc::new(users), codec, config.token_ttl()?);

        let images = ImageResolver::new(objects.clone(), config.bucket.clone(), config.url_ttl_secs);
        let search = MusicSearch::new(store.clone(), config.tables.music.clone(), images.clone());
        let subscriptions = SubscriptionService::new(
            store.clone(),
            config.tables.subscribe.clone(),
            config.tables.music.clone(),
            auth.clone(),
            images,
        );

        Ok(Self {
            config,
            store,
            objects,
            auth,
            search,
            subscriptions,
        })
    }
}
