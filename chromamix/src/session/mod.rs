//! Selection and session state
//!
//! The session owns the selected color, the recipe fetched for it, the
//! loading/error status, the saved palette and the lab sliders.
//!
//! Every recipe request is tagged with a generation number. Selecting a
//! color (or starting a newer request) bumps the generation, and a request
//! whose tag no longer matches when it resolves is discarded, so a recipe
//! is never shown against a color it was not fetched for. The underlying
//! backend call is not cancelled.

pub mod preferences;

pub use preferences::Preferences;

use crate::harmony::Harmony;
use crate::mixer::ManualMix;
use crate::recipe::{RecipeError, RecipeErrorKind, RecipeService};
use chromamix_common::{Color, KeyValueStore, MixingStep, Pigment, RgbColor};
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

/// Storage key of the saved palette
pub const PALETTE_KEY: &str = "chromamix_palette";

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("No color selected")]
    NoSelection,
}

/// What happened to a recipe request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecipeOutcome {
    /// Recipe stored in the session
    Applied,
    /// Error stored in the session
    Failed(RecipeError),
    /// Selection changed while in flight; session left untouched
    Discarded,
}

/// Classified error as shown to the user
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorInfo {
    pub kind: RecipeErrorKind,
    pub message: String,
}

impl From<&RecipeError> for ErrorInfo {
    fn from(err: &RecipeError) -> Self {
        Self {
            kind: err.kind(),
            message: err.to_string(),
        }
    }
}

#[derive(Debug, Default)]
struct SessionState {
    selected: Option<Color>,
    recipe: Option<Vec<MixingStep>>,
    loading: bool,
    error: Option<ErrorInfo>,
    palette: Vec<Color>,
    lab: ManualMix,
    generation: u64,
}

impl SessionState {
    /// Forget any recipe state and orphan in-flight requests
    fn invalidate_recipe(&mut self) {
        self.generation += 1;
        self.recipe = None;
        self.error = None;
        self.loading = false;
    }
}

/// Point-in-time view of the session
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionSnapshot {
    pub selected: Option<Color>,
    /// Harmony of the selected color
    pub harmony: Option<Harmony>,
    pub recipe: Option<Vec<MixingStep>>,
    pub loading: bool,
    pub error: Option<ErrorInfo>,
    pub palette: Vec<Color>,
    pub lab: ManualMix,
    pub lab_hex: String,
}

pub struct Session {
    state: RwLock<SessionState>,
    recipes: Arc<RecipeService>,
    store: Arc<dyn KeyValueStore>,
}

impl Session {
    /// Empty session; nothing is read from storage
    pub fn new(recipes: Arc<RecipeService>, store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            state: RwLock::new(SessionState::default()),
            recipes,
            store,
        }
    }

    /// Session with the saved palette loaded from storage
    ///
    /// A missing or unreadable palette starts empty.
    pub async fn load(recipes: Arc<RecipeService>, store: Arc<dyn KeyValueStore>) -> Self {
        let palette = match store.get(PALETTE_KEY).await {
            Ok(Some(raw)) => serde_json::from_str::<Vec<Color>>(&raw).unwrap_or_else(|e| {
                warn!("Ignoring unreadable saved palette: {}", e);
                Vec::new()
            }),
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!("Could not load saved palette: {}", e);
                Vec::new()
            }
        };
        info!(colors = palette.len(), "Loaded saved palette");

        let session = Self::new(recipes, store);
        session.state.write().await.palette = palette;
        session
    }

    pub fn recipes(&self) -> &RecipeService {
        &self.recipes
    }

    pub fn store(&self) -> &Arc<dyn KeyValueStore> {
        &self.store
    }

    pub async fn snapshot(&self) -> SessionSnapshot {
        let state = self.state.read().await;
        SessionSnapshot {
            selected: state.selected.clone(),
            harmony: state.selected.as_ref().map(|c| Harmony::from_hue(c.hue)),
            recipe: state.recipe.clone(),
            loading: state.loading,
            error: state.error.clone(),
            palette: state.palette.clone(),
            lab: state.lab,
            lab_hex: state.lab.hex(),
        }
    }

    pub async fn selected(&self) -> Option<Color> {
        self.state.read().await.selected.clone()
    }

    pub async fn recipe(&self) -> Option<Vec<MixingStep>> {
        self.state.read().await.recipe.clone()
    }

    pub async fn is_loading(&self) -> bool {
        self.state.read().await.loading
    }

    pub async fn error(&self) -> Option<ErrorInfo> {
        self.state.read().await.error.clone()
    }

    // ------------------------------------------------------------------
    // Selection and recipes
    // ------------------------------------------------------------------

    /// Select `color`, clearing recipe, error and loading state
    pub async fn select_color(&self, color: Color) {
        let mut state = self.state.write().await;
        debug!(color = %color, "Color selected");
        state.invalidate_recipe();
        state.selected = Some(color);
    }

    /// Drop the selection, clearing recipe state
    pub async fn clear_selection(&self) {
        let mut state = self.state.write().await;
        state.invalidate_recipe();
        state.selected = None;
    }

    /// Fetch a recipe for the selected color
    ///
    /// The session is locked only around the state transitions, never across
    /// the fetch. If the selection changes (or a newer request starts) while
    /// the fetch is pending, its result is discarded.
    pub async fn request_recipe(&self) -> Result<RecipeOutcome, SessionError> {
        let (target_hex, ticket) = {
            let mut state = self.state.write().await;
            let target_hex = state
                .selected
                .as_ref()
                .map(|c| c.hex.clone())
                .ok_or(SessionError::NoSelection)?;
            state.invalidate_recipe();
            state.loading = true;
            (target_hex, state.generation)
        };

        let result = self.recipes.get_mixing_recipe(&target_hex).await;

        let mut state = self.state.write().await;
        if state.generation != ticket {
            debug!(target_hex, "Discarding recipe for a stale request");
            return Ok(RecipeOutcome::Discarded);
        }

        state.loading = false;
        match result {
            Ok(steps) => {
                state.recipe = Some(steps);
                Ok(RecipeOutcome::Applied)
            }
            Err(e) => {
                state.recipe = None;
                state.error = Some(ErrorInfo::from(&e));
                Ok(RecipeOutcome::Failed(e))
            }
        }
    }

    // ------------------------------------------------------------------
    // Saved palette
    // ------------------------------------------------------------------

    pub async fn palette(&self) -> Vec<Color> {
        self.state.read().await.palette.clone()
    }

    /// Save `color` unless a saved color already has its hex
    ///
    /// Returns whether the palette changed.
    pub async fn add_to_palette(&self, color: Color) -> bool {
        let mut state = self.state.write().await;
        if state.palette.iter().any(|c| c.hex == color.hex) {
            return false;
        }
        state.palette.push(color);
        self.persist_palette(&state.palette).await;
        true
    }

    pub async fn clear_palette(&self) {
        let mut state = self.state.write().await;
        state.palette.clear();
        self.persist_palette(&state.palette).await;
    }

    async fn persist_palette(&self, palette: &[Color]) {
        let result = match serde_json::to_string(palette) {
            Ok(raw) => self.store.set(PALETTE_KEY, &raw).await,
            Err(e) => Err(e.into()),
        };
        if let Err(e) = result {
            warn!("Could not save palette: {}", e);
        }
    }

    // ------------------------------------------------------------------
    // Lab
    // ------------------------------------------------------------------

    pub async fn lab(&self) -> ManualMix {
        self.state.read().await.lab
    }

    /// Move one lab slider (clamped to [0, 10]); returns the new sliders
    pub async fn set_pigment_parts(&self, pigment: Pigment, parts: u8) -> ManualMix {
        let mut state = self.state.write().await;
        state.lab.set(pigment, parts);
        state.lab
    }

    pub async fn reset_mix(&self) {
        self.state.write().await.lab.reset();
    }

    /// Color of the current lab mix (white when empty)
    pub async fn mixed_color(&self) -> RgbColor {
        self.state.read().await.lab.rgb()
    }

    /// Save the current lab mix to the palette
    ///
    /// `None` when nothing is mixed. The returned color may already have
    /// been in the palette.
    pub async fn save_mix_to_palette(&self) -> Option<Color> {
        let color = self.lab().await.to_color()?;
        self.add_to_palette(color.clone()).await;
        Some(color)
    }

    // ------------------------------------------------------------------
    // Preferences
    // ------------------------------------------------------------------

    pub async fn preferences(&self) -> Preferences {
        Preferences::load(self.store.as_ref()).await
    }

    pub async fn save_preferences(&self, preferences: Preferences) {
        preferences.save(self.store.as_ref()).await;
    }
}
