//! Test application factory for integration tests.

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use std::sync::Arc;
use tower::ServiceExt;

use scenetext::models::AppConfig;
use scenetext::server::{build_router, AppState};

use super::fixtures::FixtureAssets;

/// Test application with a router over a fixture catalog
pub struct TestApp {
    router: axum::Router,
    pub assets: FixtureAssets,
}

impl TestApp {
    /// Create a test application over the default fixture assets
    pub fn new() -> Self {
        Self::with_assets(FixtureAssets::new())
    }

    pub fn with_assets(assets: FixtureAssets) -> Self {
        let config = assets.config();
        Self::with_config(assets, &config)
    }

    pub fn with_config(assets: FixtureAssets, config: &AppConfig) -> Self {
        let state = AppState::new(Arc::new(assets.catalog()), config);
        let router = build_router(state);
        Self { router, assets }
    }

    /// Make a GET request to the given path
    pub async fn get(&self, path: &str) -> TestResponse {
        self.request(Request::get(path).body(Body::empty()).unwrap())
            .await
    }

    /// Send a request to the router
    async fn request(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Request failed");

        let status = response.status();
        let headers = response.headers().clone();
        let body = response
            .into_body()
            .collect()
            .await
            .expect("Failed to collect body")
            .to_bytes()
            .to_vec();

        TestResponse {
            status,
            headers,
            body,
        }
    }
}

impl Default for TestApp {
    fn default() -> Self {
        Self::new()
    }
}

/// Test response with convenience methods
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: axum::http::HeaderMap,
    pub body: Vec<u8>,
}

impl TestResponse {
    /// Parse body as JSON
    pub fn json<T: serde::de::DeserializeOwned>(&self) -> T {
        serde_json::from_slice(&self.body).expect("Failed to parse JSON response")
    }

    /// Get body as string
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).to_string()
    }
}
