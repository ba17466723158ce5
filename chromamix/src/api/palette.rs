//! Saved palette endpoints
//!
//! - GET /api/palette
//! - POST /api/palette (body: Color)
//! - DELETE /api/palette

use crate::{ApiResult, AppState};
use axum::{
    extract::{rejection::JsonRejection, State},
    routing::get,
    Json, Router,
};
use chromamix_common::Color;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct AddColorResponse {
    /// False when a saved color already had the same hex
    pub added: bool,
    pub palette: Vec<Color>,
}

/// GET /api/palette
pub async fn get_palette(State(state): State<AppState>) -> Json<Vec<Color>> {
    Json(state.session.palette().await)
}

/// POST /api/palette
///
/// **Errors:**
/// - 400 Bad Request: malformed body or invalid hex
pub async fn add_color(
    State(state): State<AppState>,
    payload: Result<Json<Color>, JsonRejection>,
) -> ApiResult<Json<AddColorResponse>> {
    let Json(color) = payload?;
    let added = state.session.add_to_palette(color).await;
    Ok(Json(AddColorResponse {
        added,
        palette: state.session.palette().await,
    }))
}

/// DELETE /api/palette
pub async fn clear_palette(State(state): State<AppState>) -> Json<Vec<Color>> {
    state.session.clear_palette().await;
    Json(state.session.palette().await)
}

/// Build palette routes
pub fn palette_routes() -> Router<AppState> {
    Router::new().route(
        "/api/palette",
        get(get_palette).post(add_color).delete(clear_palette),
    )
}
