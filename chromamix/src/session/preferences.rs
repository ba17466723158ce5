//! User preferences
//!
//! Stored as individual keys so each survives on its own:
//! - `theme`: `"dark"` or `"light"`; missing means dark, anything else light
//! - `chromamix_tutorial_seen`: `"true"` once the tutorial was dismissed

use chromamix_common::KeyValueStore;
use serde::{Deserialize, Serialize};
use tracing::warn;

pub const THEME_KEY: &str = "theme";
pub const TUTORIAL_SEEN_KEY: &str = "chromamix_tutorial_seen";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Preferences {
    pub dark_mode: bool,
    pub tutorial_seen: bool,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            dark_mode: true,
            tutorial_seen: false,
        }
    }
}

impl Preferences {
    /// Read preferences, falling back to defaults for anything unreadable
    pub async fn load(store: &dyn KeyValueStore) -> Self {
        let defaults = Self::default();
        let dark_mode = match read(store, THEME_KEY).await {
            Some(theme) => theme == "dark",
            None => defaults.dark_mode,
        };
        let tutorial_seen = read(store, TUTORIAL_SEEN_KEY)
            .await
            .map(|seen| seen == "true")
            .unwrap_or(defaults.tutorial_seen);

        Self {
            dark_mode,
            tutorial_seen,
        }
    }

    /// Write preferences; failures are logged
    ///
    /// An unseen tutorial removes its key rather than storing `"false"`.
    pub async fn save(&self, store: &dyn KeyValueStore) {
        let theme = if self.dark_mode { "dark" } else { "light" };
        if let Err(e) = store.set(THEME_KEY, theme).await {
            warn!("Could not save theme: {}", e);
        }

        let result = if self.tutorial_seen {
            store.set(TUTORIAL_SEEN_KEY, "true").await
        } else {
            store.remove(TUTORIAL_SEEN_KEY).await
        };
        if let Err(e) = result {
            warn!("Could not save tutorial flag: {}", e);
        }
    }
}

async fn read(store: &dyn KeyValueStore, key: &str) -> Option<String> {
    match store.get(key).await {
        Ok(value) => value,
        Err(e) => {
            warn!(key, "Could not read preference: {}", e);
            None
        }
    }
}
