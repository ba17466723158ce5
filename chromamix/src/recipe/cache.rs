//! Persistent recipe cache
//!
//! All entries live in one JSON object under [`RECIPE_CACHE_KEY`], mapping
//! the target hex exactly as requested to the backend's raw recipe text.
//! Keys are not normalized: `#ff0000` and `#FF0000` are different entries.
//!
//! The cache is an optimization only. Read and write failures are logged
//! and swallowed; callers never see them.

use chromamix_common::{KeyValueStore, Result};
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, warn};

/// Storage key holding the whole cache
pub const RECIPE_CACHE_KEY: &str = "chromamix_recipes_cache";

pub struct RecipeCache {
    store: Arc<dyn KeyValueStore>,
    /// Serializes read-modify-write of the cache object
    write_lock: Mutex<()>,
}

impl RecipeCache {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            store,
            write_lock: Mutex::new(()),
        }
    }

    /// Cached raw recipe for `target_hex`, if any
    pub async fn get(&self, target_hex: &str) -> Option<String> {
        match self.load().await {
            Ok(entries) => entries.get(target_hex).cloned(),
            Err(e) => {
                warn!(target_hex, "Could not read recipe cache: {}", e);
                None
            }
        }
    }

    /// Store `raw_recipe` under `target_hex`, replacing any previous entry
    pub async fn put(&self, target_hex: &str, raw_recipe: &str) {
        let _guard = self.write_lock.lock().await;

        let mut entries = match self.load().await {
            Ok(entries) => entries,
            Err(e) => {
                warn!("Discarding unreadable recipe cache: {}", e);
                BTreeMap::new()
            }
        };
        entries.insert(target_hex.to_string(), raw_recipe.to_string());

        let result = match serde_json::to_string(&entries) {
            Ok(serialized) => self.store.set(RECIPE_CACHE_KEY, &serialized).await,
            Err(e) => Err(e.into()),
        };

        match result {
            Ok(()) => debug!(target_hex, "Saved recipe to cache"),
            Err(e) => warn!(target_hex, "Could not save recipe to cache: {}", e),
        }
    }

    /// Number of cached recipes (0 if the cache is unreadable)
    pub async fn len(&self) -> usize {
        self.load().await.map(|entries| entries.len()).unwrap_or(0)
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Drop every cached recipe
    pub async fn clear(&self) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        self.store.remove(RECIPE_CACHE_KEY).await
    }

    async fn load(&self) -> Result<BTreeMap<String, String>> {
        match self.store.get(RECIPE_CACHE_KEY).await? {
            Some(serialized) => Ok(serde_json::from_str(&serialized)?),
            None => Ok(BTreeMap::new()),
        }
    }
}
