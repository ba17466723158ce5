//! Configuration resolution for chromamix
//!
//! Resolves the recipe credential (ENV → TOML) and builds the recipe
//! service from the bootstrap config.

use crate::recipe::{GeminiClient, RecipeBackend, RecipeService};
use chromamix_common::config::TomlConfig;
use chromamix_common::{Error, KeyValueStore, Result};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

/// Primary environment variable holding the recipe API key
pub const API_KEY_ENV: &str = "CHROMAMIX_API_KEY";

/// Fallback environment variable holding the recipe API key
pub const FALLBACK_API_KEY_ENV: &str = "API_KEY";

/// Resolve the recipe API key
///
/// **Priority:** `CHROMAMIX_API_KEY` → `API_KEY` → TOML `recipe.api_key`
///
/// Blank keys count as absent. `None` selects demo mode.
pub fn resolve_api_key(toml_config: &TomlConfig) -> Option<String> {
    let candidates = [
        (API_KEY_ENV, std::env::var(API_KEY_ENV).ok()),
        (FALLBACK_API_KEY_ENV, std::env::var(FALLBACK_API_KEY_ENV).ok()),
        ("TOML", toml_config.recipe.api_key.clone()),
    ];

    let mut valid = candidates
        .into_iter()
        .filter_map(|(source, key)| key.filter(|k| is_valid_key(k)).map(|k| (source, k)))
        .collect::<Vec<_>>();

    if valid.len() > 1 {
        let sources: Vec<&str> = valid.iter().map(|(source, _)| *source).collect();
        warn!(
            "Recipe API key found in multiple sources: {}. Using {}.",
            sources.join(", "),
            sources[0]
        );
    }

    if valid.is_empty() {
        info!("No recipe API key configured, recipes will use demo mode");
        return None;
    }

    let (source, key) = valid.remove(0);
    info!("Recipe API key loaded from {}", source);
    Some(key.trim().to_string())
}

/// Validate API key (non-empty, non-whitespace)
pub fn is_valid_key(key: &str) -> bool {
    !key.trim().is_empty()
}

/// Build the recipe service described by `toml_config`
///
/// A Gemini backend is attached only when a credential resolves.
pub fn build_recipe_service(
    toml_config: &TomlConfig,
    store: Arc<dyn KeyValueStore>,
) -> Result<RecipeService> {
    let recipe = &toml_config.recipe;

    let backend: Option<Arc<dyn RecipeBackend>> = match resolve_api_key(toml_config) {
        Some(api_key) => {
            let client = GeminiClient::new(
                api_key,
                recipe.model.clone(),
                recipe.endpoint.clone(),
                Duration::from_secs(recipe.timeout_secs),
            )
            .map_err(|e| Error::Config(format!("Failed to create recipe backend: {}", e)))?;
            info!(model = client.model(), "Recipe backend: Gemini");
            Some(Arc::new(client))
        }
        None => None,
    };

    Ok(RecipeService::new(backend, store)
        .with_demo_delay(Duration::from_millis(recipe.demo_delay_ms)))
}
