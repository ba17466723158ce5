//! Recipe cache maintenance
//!
//! - DELETE /api/recipes/cache

use crate::{ApiError, ApiResult, AppState};
use axum::{extract::State, routing::delete, Json, Router};
use serde::Serialize;
use tracing::info;

#[derive(Debug, Serialize)]
pub struct ClearCacheResponse {
    /// Entries dropped
    pub cleared: usize,
}

/// DELETE /api/recipes/cache
///
/// **Errors:**
/// - 500 Internal Server Error: storage failure
pub async fn clear_cache(State(state): State<AppState>) -> ApiResult<Json<ClearCacheResponse>> {
    let cache = state.session.recipes().cache();
    let cleared = cache.len().await;
    cache
        .clear()
        .await
        .map_err(|e| ApiError::Internal(format!("Failed to clear recipe cache: {}", e)))?;
    info!(cleared, "Recipe cache cleared");
    Ok(Json(ClearCacheResponse { cleared }))
}

/// Build recipe routes
pub fn recipe_routes() -> Router<AppState> {
    Router::new().route("/api/recipes/cache", delete(clear_cache))
}
