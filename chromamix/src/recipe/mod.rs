//! Mixing recipe service
//!
//! Resolves a target hex color to a list of pigment steps:
//!
//! 1. No credential configured → fixed demo recipe after a short delay. No
//!    network, no cache.
//! 2. Cache hit (exact key) → cached text.
//! 3. Cache miss → one backend call, result cached before returning.
//!
//! There is no retry. Concurrent requests for the same color are not
//! de-duplicated; each may reach the backend.

pub mod backend;
pub mod cache;
pub mod gemini;

pub use backend::{BackendError, RecipeBackend};
pub use cache::{RecipeCache, RECIPE_CACHE_KEY};
pub use gemini::GeminiClient;

use chromamix_common::color::hex_to_rgb;
use chromamix_common::{KeyValueStore, MixingStep, Pigment};
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, error, warn};

/// Default simulated latency of the demo recipe
pub const DEFAULT_DEMO_DELAY: Duration = Duration::from_millis(800);

/// Raw text of the demo recipe: 1 part Red, 2 parts Yellow, 1 part White
pub const DEMO_RECIPE_JSON: &str = r##"[{"colorName":"Red","colorHex":"#FF0000","parts":1},{"colorName":"Yellow","colorHex":"#FFFF00","parts":2},{"colorName":"White","colorHex":"#FFFFFF","parts":1}]"##;

/// The demo recipe returned when no credential is configured
pub fn demo_recipe() -> Vec<MixingStep> {
    vec![
        Pigment::Red.step(1),
        Pigment::Yellow.step(2),
        Pigment::White.step(1),
    ]
}

/// User-facing recipe failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RecipeError {
    /// Backend rejected the credential
    #[error("Permission error: your API key is invalid or lacks the required permissions. Please check your configuration.")]
    InvalidCredential,

    /// Any other backend failure; detail is for logs
    #[error("Could not generate the recipe. The API returned an unexpected error.")]
    GenerationFailed(String),

    /// Backend text is not a valid recipe
    #[error("Could not process the server response. The format is not valid.")]
    ResponseParse(String),
}

/// Serializable kind of a [`RecipeError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RecipeErrorKind {
    InvalidCredential,
    GenerationFailed,
    ResponseParse,
}

impl RecipeError {
    pub fn kind(&self) -> RecipeErrorKind {
        match self {
            RecipeError::InvalidCredential => RecipeErrorKind::InvalidCredential,
            RecipeError::GenerationFailed(_) => RecipeErrorKind::GenerationFailed,
            RecipeError::ResponseParse(_) => RecipeErrorKind::ResponseParse,
        }
    }
}

impl From<BackendError> for RecipeError {
    fn from(err: BackendError) -> Self {
        if err.is_authorization_denied() {
            RecipeError::InvalidCredential
        } else {
            RecipeError::GenerationFailed(err.to_string())
        }
    }
}

/// Decode and validate a raw recipe
///
/// The text must be a JSON array of objects with a string `colorName`, a
/// string `colorHex` holding a 6-digit hex color and an integer `parts` of
/// at least 1. Anything else is a [`RecipeError::ResponseParse`].
pub fn parse_recipe(raw: &str) -> Result<Vec<MixingStep>, RecipeError> {
    let steps: Vec<MixingStep> =
        serde_json::from_str(raw).map_err(|e| RecipeError::ResponseParse(e.to_string()))?;

    for (index, step) in steps.iter().enumerate() {
        if step.parts < 1 {
            return Err(RecipeError::ResponseParse(format!(
                "step {} ({}) has {} parts",
                index, step.color_name, step.parts
            )));
        }
        if hex_to_rgb(&step.color_hex).is_none() {
            return Err(RecipeError::ResponseParse(format!(
                "step {} ({}) has invalid hex {:?}",
                index, step.color_name, step.color_hex
            )));
        }
    }

    Ok(steps)
}

/// Recipe lookup with cache and demo fallback
pub struct RecipeService {
    backend: Option<Arc<dyn RecipeBackend>>,
    cache: RecipeCache,
    demo_delay: Duration,
}

impl RecipeService {
    /// `backend` is `None` when no credential is configured
    pub fn new(backend: Option<Arc<dyn RecipeBackend>>, store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            backend,
            cache: RecipeCache::new(store),
            demo_delay: DEFAULT_DEMO_DELAY,
        }
    }

    pub fn with_demo_delay(mut self, delay: Duration) -> Self {
        self.demo_delay = delay;
        self
    }

    /// Whether a backend credential is configured
    pub fn has_credential(&self) -> bool {
        self.backend.is_some()
    }

    pub fn cache(&self) -> &RecipeCache {
        &self.cache
    }

    /// Raw recipe text for `target_hex` (demo, cached or fetched)
    pub async fn get_raw_recipe(&self, target_hex: &str) -> Result<String, RecipeError> {
        let Some(backend) = &self.backend else {
            warn!(target_hex, "No recipe API key configured, returning demo recipe");
            tokio::time::sleep(self.demo_delay).await;
            return Ok(DEMO_RECIPE_JSON.to_string());
        };

        if let Some(cached) = self.cache.get(target_hex).await {
            debug!(target_hex, "Cache hit, returning cached recipe");
            return Ok(cached);
        }

        debug!(target_hex, backend = backend.name(), "Cache miss, fetching recipe");
        let raw = backend.generate_recipe(target_hex).await.map_err(|e| {
            error!(target_hex, backend = backend.name(), "Recipe generation failed: {}", e);
            RecipeError::from(e)
        })?;

        self.cache.put(target_hex, &raw).await;
        Ok(raw)
    }

    /// Decoded recipe for `target_hex`
    pub async fn get_mixing_recipe(&self, target_hex: &str) -> Result<Vec<MixingStep>, RecipeError> {
        let raw = self.get_raw_recipe(target_hex).await?;
        parse_recipe(&raw).map_err(|e| {
            warn!(target_hex, "Recipe response rejected: {:?}", e);
            e
        })
    }
}
