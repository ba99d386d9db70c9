//! HTTP server setup.
//!
//! This module provides the router and application state used by both
//! the production server and integration tests.

use axum::{
    extract::{Query, State},
    response::Json,
    routing::get,
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;

use crate::api::{self, ApiDoc, GenerateQuery, GenerateResponse};
use crate::assets::AssetLoader;
use crate::error::ApiError;
use crate::models::{AppConfig, Catalog};
use crate::services::Generator;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub generator: Arc<Generator>,
}

impl AppState {
    pub fn new(catalog: Arc<Catalog>, config: &AppConfig) -> Self {
        Self {
            generator: Arc::new(Generator::new(catalog, config)),
        }
    }
}

/// Load the asset catalog described by `config`, shuffle it if configured,
/// and wrap it in application state.
pub fn create_app_state(config: &AppConfig) -> anyhow::Result<AppState> {
    let loader = AssetLoader::new(config.asset_paths());
    let mut catalog = loader.load()?;
    if config.shuffle_on_start {
        catalog.shuffle(&mut rand::thread_rng());
    }

    Ok(AppState::new(Arc::new(catalog), config))
}

/// Build the API router with all endpoints and middleware.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/generate", get(handle_generate))
        .route("/api-docs/openapi.json", get(openapi_json))
        // Health check
        .route("/health", get(|| async { "OK" }))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

async fn handle_generate(
    State(state): State<AppState>,
    query: Query<GenerateQuery>,
) -> Result<Json<GenerateResponse>, ApiError> {
    api::handle_generate(State(state.generator), query).await
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
