//! Stateless color endpoints: wheel, picker snap, harmony and mixing
//!
//! - GET /api/wheel
//! - GET /api/wheel/closest/:hex
//! - GET /api/harmony/:hue
//! - POST /api/mix

use crate::harmony::{Harmony, HarmonySwatches};
use crate::mixer::{ManualMix, MAX_SLIDER_PARTS};
use crate::{ApiResult, AppState};
use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    extract::Path,
    routing::{get, post},
    Json, Router,
};
use chromamix_common::color::{hex_to_rgb, normalize_hue};
use chromamix_common::palette::{find_closest_palette_entry, wheel};
use chromamix_common::{Color, Pigment, RgbColor};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Picker snap result
#[derive(Debug, Serialize)]
pub struct ClosestResponse {
    /// Nearest wheel color
    pub color: Color,
    /// False when the input was not a hex color and the first wheel entry
    /// was returned as a fallback
    pub parsed: bool,
}

#[derive(Debug, Serialize)]
pub struct HarmonyResponse {
    #[serde(flatten)]
    pub harmony: Harmony,
    pub swatches: HarmonySwatches,
    /// Wheel hues to highlight, ascending
    pub highlighted: Vec<u16>,
}

/// Slider values; missing pigments count as 0, out-of-range values clamp
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct MixRequest {
    pub red: i64,
    pub yellow: i64,
    pub blue: i64,
    pub white: i64,
    pub black: i64,
}

impl MixRequest {
    pub fn to_manual_mix(&self) -> ManualMix {
        let mut mix = ManualMix::default();
        for (pigment, parts) in [
            (Pigment::Red, self.red),
            (Pigment::Yellow, self.yellow),
            (Pigment::Blue, self.blue),
            (Pigment::White, self.white),
            (Pigment::Black, self.black),
        ] {
            mix.set(pigment, clamp_parts(parts));
        }
        mix
    }
}

/// Clamp a requested slider value into [0, 10]
pub fn clamp_parts(parts: i64) -> u8 {
    parts.clamp(0, MAX_SLIDER_PARTS as i64) as u8
}

#[derive(Debug, Serialize)]
pub struct MixResponse {
    pub mix: ManualMix,
    pub rgb: RgbColor,
    pub hex: String,
}

/// GET /api/wheel
pub async fn get_wheel() -> Json<Vec<Color>> {
    Json(wheel().to_vec())
}

/// GET /api/wheel/closest/:hex
///
/// `hex` may omit the `#` (or send it URL-encoded as `%23`).
pub async fn get_closest(
    path: Result<Path<String>, PathRejection>,
) -> ApiResult<Json<ClosestResponse>> {
    let Path(hex) = path?;
    let color = find_closest_palette_entry(&hex).clone();
    let parsed = hex_to_rgb(&hex).is_some();
    debug!(hex, closest = %color, parsed, "Snapped picked color");
    Ok(Json(ClosestResponse { color, parsed }))
}

/// GET /api/harmony/:hue
///
/// Any integer hue is accepted and normalized into [0, 360).
///
/// **Errors:**
/// - 400 Bad Request: hue is not an integer
pub async fn get_harmony(
    path: Result<Path<i32>, PathRejection>,
) -> ApiResult<Json<HarmonyResponse>> {
    let Path(hue) = path?;
    let harmony = Harmony::from_hue(normalize_hue(hue));
    Ok(Json(HarmonyResponse {
        swatches: harmony.swatches(),
        highlighted: harmony.highlighted_palette_hues().into_iter().collect(),
        harmony,
    }))
}

/// POST /api/mix
pub async fn post_mix(
    payload: Result<Json<MixRequest>, JsonRejection>,
) -> ApiResult<Json<MixResponse>> {
    let Json(request) = payload?;
    let mix = request.to_manual_mix();
    Ok(Json(MixResponse {
        mix,
        rgb: mix.rgb(),
        hex: mix.hex(),
    }))
}

/// Build color routes
pub fn color_routes() -> Router<AppState> {
    Router::new()
        .route("/api/wheel", get(get_wheel))
        .route("/api/wheel/closest/:hex", get(get_closest))
        .route("/api/harmony/:hue", get(get_harmony))
        .route("/api/mix", post(post_mix))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_parts() {
        assert_eq!(clamp_parts(-4), 0);
        assert_eq!(clamp_parts(7), 7);
        assert_eq!(clamp_parts(250), 10);
    }

    #[test]
    fn test_mix_request_defaults_missing_pigments() {
        let request: MixRequest = serde_json::from_str(r#"{"white": 3, "black": 1}"#).unwrap();
        let mix = request.to_manual_mix();
        assert_eq!(mix.red, 0);
        assert_eq!(mix.hex(), "#BFBFBF");
    }
}
