//! Preferences endpoints
//!
//! - GET /api/preferences
//! - PUT /api/preferences (body: `{"darkMode": bool, "tutorialSeen": bool}`)

use crate::session::Preferences;
use crate::{ApiResult, AppState};
use axum::{
    extract::{rejection::JsonRejection, State},
    routing::get,
    Json, Router,
};
use tracing::info;

/// GET /api/preferences
pub async fn get_preferences(State(state): State<AppState>) -> Json<Preferences> {
    Json(state.session.preferences().await)
}

/// PUT /api/preferences
///
/// **Errors:**
/// - 400 Bad Request: malformed body
pub async fn put_preferences(
    State(state): State<AppState>,
    payload: Result<Json<Preferences>, JsonRejection>,
) -> ApiResult<Json<Preferences>> {
    let Json(preferences) = payload?;
    state.session.save_preferences(preferences).await;
    info!(
        dark_mode = preferences.dark_mode,
        tutorial_seen = preferences.tutorial_seen,
        "Preferences updated"
    );
    Ok(Json(state.session.preferences().await))
}

/// Build preferences routes
pub fn preference_routes() -> Router<AppState> {
    Router::new().route("/api/preferences", get(get_preferences).put(put_preferences))
}
