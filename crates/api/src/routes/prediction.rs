use axum::routing::post;
use axum::Router;

use crate::handlers::prediction;
use crate::state::AppState;

/// Prediction routes, mounted under `/api/v1`.
pub fn router() -> Router<AppState> {
    Router::new().route("/predict", post(prediction::predict))
}
