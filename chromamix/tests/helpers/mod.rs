//! Test Helper Utilities
//!
//! In-test recipe backends and service builders shared by the integration
//! tests.

#![allow(dead_code)]

use async_trait::async_trait;
use chromamix::recipe::{BackendError, RecipeBackend, RecipeService};
use chromamix::session::Session;
use chromamix_common::storage::MemoryStore;
use chromamix_common::{Error, KeyValueStore};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Notify;

pub const ORANGE_RECIPE: &str = r##"[{"colorName":"Yellow","colorHex":"#FFFF00","parts":2},{"colorName":"Red","colorHex":"#FF0000","parts":1}]"##;

/// Backend answering every request with a fixed result, counting calls
pub struct CountingBackend {
    calls: AtomicUsize,
    result: Result<String, BackendError>,
}

impl CountingBackend {
    pub fn ok(raw: &str) -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
            result: Ok(raw.to_string()),
        })
    }

    pub fn failing(err: BackendError) -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
            result: Err(err),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RecipeBackend for CountingBackend {
    fn name(&self) -> &'static str {
        "counting"
    }

    async fn generate_recipe(&self, _target_hex: &str) -> Result<String, BackendError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.result.clone()
    }
}

/// Backend that holds each request until released
pub struct GatedBackend {
    /// Signalled when a request reaches the backend
    pub entered: Notify,
    /// Notify once to let one pending request finish
    pub release: Notify,
    raw: String,
}

impl GatedBackend {
    pub fn new(raw: &str) -> Arc<Self> {
        Arc::new(Self {
            entered: Notify::new(),
            release: Notify::new(),
            raw: raw.to_string(),
        })
    }
}

#[async_trait]
impl RecipeBackend for GatedBackend {
    fn name(&self) -> &'static str {
        "gated"
    }

    async fn generate_recipe(&self, _target_hex: &str) -> Result<String, BackendError> {
        self.entered.notify_one();
        self.release.notified().await;
        Ok(self.raw.clone())
    }
}

/// Recipe service over a memory store with the given backend
pub fn recipe_service(
    backend: Option<Arc<dyn RecipeBackend>>,
    store: Arc<MemoryStore>,
) -> RecipeService {
    RecipeService::new(backend, store).with_demo_delay(Duration::from_millis(10))
}

/// Session over a fresh memory store
pub fn session_with(backend: Option<Arc<dyn RecipeBackend>>) -> (Arc<Session>, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    let recipes = Arc::new(recipe_service(backend, store.clone()));
    (Arc::new(Session::new(recipes, store.clone())), store)
}

/// Memory store that refuses to delete anything
#[derive(Default)]
pub struct NoRemoveStore {
    inner: MemoryStore,
}

#[async_trait]
impl KeyValueStore for NoRemoveStore {
    async fn get(&self, key: &str) -> chromamix_common::Result<Option<String>> {
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, value: &str) -> chromamix_common::Result<()> {
        self.inner.set(key, value).await
    }

    async fn remove(&self, _key: &str) -> chromamix_common::Result<()> {
        Err(Error::Io(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "read-only volume",
        )))
    }
}
