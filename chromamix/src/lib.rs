//! chromamix library interface
//!
//! Color harmony, pigment mixing and recipe lookup behind a JSON HTTP API.
//! Exposed as a library so the router and services can be exercised by
//! integration tests.

pub mod api;
pub mod config;
pub mod error;
pub mod harmony;
pub mod mixer;
pub mod recipe;
pub mod session;

pub use crate::error::{ApiError, ApiResult};

use axum::Router;
use chrono::{DateTime, Utc};
use session::Session;
use std::sync::Arc;
use tokio::sync::RwLock;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Selection, recipe, palette and lab state
    pub session: Arc<Session>,
    /// Service startup timestamp for uptime tracking
    pub startup_time: DateTime<Utc>,
    /// Last recipe failure for diagnostics
    pub last_error: Arc<RwLock<Option<String>>>,
}

impl AppState {
    pub fn new(session: Arc<Session>) -> Self {
        Self {
            session,
            startup_time: Utc::now(),
            last_error: Arc::new(RwLock::new(None)),
        }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(api::health_routes())
        .merge(api::color_routes())
        .merge(api::session_routes())
        .merge(api::palette_routes())
        .merge(api::lab_routes())
        .merge(api::preference_routes())
        .merge(api::recipe_routes())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
