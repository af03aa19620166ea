#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use wastecast_api::config::ServerConfig;
use wastecast_api::router::build_app_router;
use wastecast_api::state::AppState;
use wastecast_core::provider::{DisabledProvider, GenerativeProvider, ProviderOutcome};
use wastecast_core::recommend::RecommendationOrchestrator;
use wastecast_llm::ProviderConfig;

/// Build a test `ServerConfig` with safe defaults.
///
/// Uses `http://localhost:3000` as CORS origin (matching the dev default)
/// and a 30-second request timeout.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:3000".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
        log_json: false,
        provider: ProviderConfig::disabled(Duration::from_secs(8)),
    }
}

/// Provider returning a canned outcome, standing in for a remote backend.
pub struct StubProvider {
    pub outcome: ProviderOutcome,
}

#[async_trait]
impl GenerativeProvider for StubProvider {
    fn name(&self) -> &'static str {
        "stub"
    }

    async fn generate(&self, _prompt: &str) -> ProviderOutcome {
        self.outcome.clone()
    }
}

/// Build the full application router around the given provider.
///
/// Uses the same [`build_app_router`] as `main.rs`, so tests exercise the
/// production middleware stack.
pub fn build_test_app_with(provider: Arc<dyn GenerativeProvider>) -> Router {
    let config = test_config();
    let orchestrator = RecommendationOrchestrator::new(provider, config.provider.timeout);

    let state = AppState {
        config: Arc::new(config.clone()),
        orchestrator: Arc::new(orchestrator),
    };

    build_app_router(state, &config)
}

/// Application with generative recommendations disabled.
pub fn build_test_app() -> Router {
    build_test_app_with(Arc::new(DisabledProvider))
}

/// Application whose provider always answers with `text`.
pub fn build_test_app_generating(text: &str) -> Router {
    build_test_app_with(Arc::new(StubProvider {
        outcome: ProviderOutcome::Success(text.to_string()),
    }))
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    post_raw(app, uri, body.to_string()).await
}

pub async fn post_raw(app: Router, uri: &str, body: String) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
