pub mod health;
pub mod prediction;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// GET  /health         -> service health (same payload as the root route)
/// POST /predict        -> waste prediction + recommendations
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(health::router())
        .merge(prediction::router())
}
