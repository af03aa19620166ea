//! Application router and its middleware.
//!
//! [`build_app_router`] is the single place the service's HTTP surface is
//! assembled; `main.rs` and `tests/common/mod.rs` both call it.

use std::time::Duration;

use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderName, Method, StatusCode};
use axum::Router;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::config::ServerConfig;
use crate::routes;
use crate::state::AppState;

const REQUEST_ID_HEADER: &str = "x-request-id";

/// Headroom kept above the provider deadline so a prediction that waits the
/// full generative timeout still answers with template recommendations.
const PROVIDER_DEADLINE_MARGIN: Duration = Duration::from_secs(2);

/// Build the prediction service router.
///
/// Routes: `GET /health`, `GET /api/v1/health`, `POST /api/v1/predict`.
///
/// Outermost to innermost, a request passes through CORS, request-id
/// assignment, tracing, request-id echo on the response, the request
/// timeout from [`effective_request_timeout`], and panic recovery.
pub fn build_app_router(state: AppState, config: &ServerConfig) -> Router {
    let request_id = HeaderName::from_static(REQUEST_ID_HEADER);

    let trace = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    Router::new()
        .merge(routes::health::router())
        .nest("/api/v1", routes::api_routes())
        .layer(CatchPanicLayer::new())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            effective_request_timeout(config),
        ))
        .layer(PropagateRequestIdLayer::new(request_id.clone()))
        .layer(trace)
        .layer(SetRequestIdLayer::new(request_id, MakeRequestUuid))
        .layer(build_cors_layer(config))
        .with_state(state)
}

/// HTTP request timeout, never shorter than the provider deadline plus
/// [`PROVIDER_DEADLINE_MARGIN`].
pub fn effective_request_timeout(config: &ServerConfig) -> Duration {
    let configured = Duration::from_secs(config.request_timeout_secs);
    let floor = config.provider.timeout + PROVIDER_DEADLINE_MARGIN;
    if configured < floor {
        tracing::warn!(
            configured_secs = config.request_timeout_secs,
            provider_timeout_secs = config.provider.timeout.as_secs(),
            "REQUEST_TIMEOUT_SECS below provider deadline, raising it",
        );
        floor
    } else {
        configured
    }
}

/// CORS for the web frontend: `GET` for health polling, `POST` with a JSON
/// body for predictions.
///
/// Panics at startup if any configured origin is invalid.
pub fn build_cors_layer(config: &ServerConfig) -> CorsLayer {
    let origins: Vec<_> = config
        .cors_origins
        .iter()
        .map(|o| {
            o.parse()
                .unwrap_or_else(|e| panic!("Invalid CORS origin '{o}': {e}"))
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(3600))
}

#[cfg(test)]
mod tests {
    use wastecast_llm::ProviderConfig;

    use super::*;

    fn config(request_timeout_secs: u64, provider_timeout_secs: u64) -> ServerConfig {
        ServerConfig {
            host: "127.0.0.1".into(),
            port: 0,
            cors_origins: vec!["http://localhost:3000".into()],
            request_timeout_secs,
            shutdown_timeout_secs: 30,
            log_json: false,
            provider: ProviderConfig::disabled(Duration::from_secs(provider_timeout_secs)),
        }
    }

    #[test]
    fn configured_timeout_kept_when_above_provider_deadline() {
        assert_eq!(effective_request_timeout(&config(30, 8)), Duration::from_secs(30));
    }

    #[test]
    fn timeout_raised_to_cover_provider_deadline() {
        assert_eq!(effective_request_timeout(&config(5, 8)), Duration::from_secs(10));
    }

    #[test]
    #[should_panic(expected = "Invalid CORS origin")]
    fn invalid_cors_origin_panics() {
        let mut config = config(30, 8);
        config.cors_origins = vec!["not a\norigin".into()];
        build_cors_layer(&config);
    }
}
