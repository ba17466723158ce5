//! Session endpoints
//!
//! - GET /api/session
//! - POST /api/session/select (body: Color)
//! - DELETE /api/session/select
//! - POST /api/session/recipe

use crate::session::{RecipeOutcome, SessionSnapshot};
use crate::{ApiResult, AppState};
use axum::{
    extract::{rejection::JsonRejection, State},
    routing::{get, post},
    Json, Router,
};
use chromamix_common::Color;
use tracing::info;

/// GET /api/session
pub async fn get_session(State(state): State<AppState>) -> Json<SessionSnapshot> {
    Json(state.session.snapshot().await)
}

/// POST /api/session/select
///
/// **Request:** `{"name": "Cyan", "hex": "#00FFFF", "hue": 180}`; `hue` is
/// optional (0 for colors off the wheel).
///
/// **Errors:**
/// - 400 Bad Request: malformed body or invalid hex
pub async fn select_color(
    State(state): State<AppState>,
    payload: Result<Json<Color>, JsonRejection>,
) -> ApiResult<Json<SessionSnapshot>> {
    let Json(color) = payload?;
    state.session.select_color(color).await;
    Ok(Json(state.session.snapshot().await))
}

/// DELETE /api/session/select
pub async fn clear_selection(State(state): State<AppState>) -> Json<SessionSnapshot> {
    state.session.clear_selection().await;
    Json(state.session.snapshot().await)
}

/// POST /api/session/recipe
///
/// Waits for the recipe (or failure) and returns the resulting snapshot.
/// A recipe failure is not an HTTP error: it is reported in the snapshot's
/// `error` field. If the selection changed meanwhile the snapshot reflects
/// the newer state.
///
/// **Errors:**
/// - 409 Conflict: no color selected
pub async fn request_recipe(State(state): State<AppState>) -> ApiResult<Json<SessionSnapshot>> {
    match state.session.request_recipe().await? {
        RecipeOutcome::Applied => {}
        RecipeOutcome::Failed(e) => {
            *state.last_error.write().await = Some(format!("{:?}", e));
        }
        RecipeOutcome::Discarded => {
            info!("Recipe request superseded by a newer selection");
        }
    }
    Ok(Json(state.session.snapshot().await))
}

/// Build session routes
pub fn session_routes() -> Router<AppState> {
    Router::new()
        .route("/api/session", get(get_session))
        .route(
            "/api/session/select",
            post(select_color).delete(clear_selection),
        )
        .route("/api/session/recipe", post(request_recipe))
}
