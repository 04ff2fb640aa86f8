//! HTTP server setup and configuration.
//!
//! This module provides the router and application state used by both
//! the production server and integration tests.

use axum::{
    extract::{DefaultBodyLimit, Query, State},
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;

use crate::api::{self, ConvertQuery};
use crate::error::ApiError;
use crate::models::AppConfig;
use crate::services::ConversionService;

/// Largest accepted request body.
pub const MAX_BODY_BYTES: usize = 32 * 1024 * 1024;

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "RGB565 API",
        description = "Convert PNG images to RGB565 for embedded displays",
        version = "0.1.0",
        license(name = "MIT")
    ),
    paths(api::handle_convert, api::handle_export),
    components(schemas(api::ErrorResponse)),
    tags(
        (name = "Conversion", description = "Image conversion and C header export")
    )
)]
pub struct ApiDoc;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub converter: Arc<ConversionService>,
}

/// Create application state from a loaded config.
pub fn create_app_state(config: AppConfig) -> AppState {
    tracing::debug!(
        presets = ?config.preset_names(),
        default_preset = %config.default_preset,
        "Presets loaded"
    );
    AppState {
        config: Arc::new(config),
        converter: Arc::new(ConversionService::new()),
    }
}

/// Build the API router with all endpoints and middleware.
///
/// This is the core router used by both production and tests.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/convert", post(handle_convert))
        .route("/api/export", post(handle_export))
        // Health check
        .route("/health", get(|| async { "OK" }))
        .with_state(state)
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(TraceLayer::new_for_http())
}

// Wrapper handlers to extract state components for the underlying API handlers

async fn handle_convert(
    State(state): State<AppState>,
    query: Query<ConvertQuery>,
    body: axum::body::Bytes,
) -> Result<axum::response::Response, ApiError> {
    api::handle_convert(State(state.config), State(state.converter), query, body).await
}

async fn handle_export(
    State(state): State<AppState>,
    query: Query<ConvertQuery>,
    body: axum::body::Bytes,
) -> Result<axum::response::Response, ApiError> {
    api::handle_export(State(state.config), State(state.converter), query, body).await
}
