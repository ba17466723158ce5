//! Lab (manual mixing) endpoints
//!
//! - PUT /api/lab/:pigment (body: `{"parts": n}`)
//! - POST /api/lab/reset
//! - POST /api/lab/save

use super::color::clamp_parts;
use crate::mixer::ManualMix;
use crate::{ApiError, ApiResult, AppState};
use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    extract::{Path, State},
    routing::{post, put},
    Json, Router,
};
use chromamix_common::{Color, Pigment, RgbColor};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct SetPartsRequest {
    pub parts: i64,
}

/// Lab sliders with the color they produce
#[derive(Debug, Serialize)]
pub struct LabResponse {
    pub mix: ManualMix,
    pub rgb: RgbColor,
    pub hex: String,
}

impl From<ManualMix> for LabResponse {
    fn from(mix: ManualMix) -> Self {
        Self {
            mix,
            rgb: mix.rgb(),
            hex: mix.hex(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SaveMixResponse {
    /// Saved color, `null` when the lab was empty
    pub saved: Option<Color>,
    pub palette: Vec<Color>,
}

/// PUT /api/lab/:pigment
///
/// Pigment names are case-insensitive; parts clamp to [0, 10].
///
/// **Errors:**
/// - 404 Not Found: unknown pigment
/// - 400 Bad Request: malformed body
pub async fn set_pigment_parts(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
    payload: Result<Json<SetPartsRequest>, JsonRejection>,
) -> ApiResult<Json<LabResponse>> {
    let Path(pigment) = path?;
    let Json(request) = payload?;
    let pigment: Pigment = pigment.parse().map_err(ApiError::NotFound)?;
    let mix = state
        .session
        .set_pigment_parts(pigment, clamp_parts(request.parts))
        .await;
    Ok(Json(mix.into()))
}

/// POST /api/lab/reset
pub async fn reset_mix(State(state): State<AppState>) -> Json<LabResponse> {
    state.session.reset_mix().await;
    Json(state.session.lab().await.into())
}

/// POST /api/lab/save
pub async fn save_mix(State(state): State<AppState>) -> Json<SaveMixResponse> {
    let saved = state.session.save_mix_to_palette().await;
    Json(SaveMixResponse {
        saved,
        palette: state.session.palette().await,
    })
}

/// Build lab routes
pub fn lab_routes() -> Router<AppState> {
    Router::new()
        .route("/api/lab/:pigment", put(set_pigment_parts))
        .route("/api/lab/reset", post(reset_mix))
        .route("/api/lab/save", post(save_mix))
}
