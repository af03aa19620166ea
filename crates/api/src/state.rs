use std::sync::Arc;

use wastecast_core::recommend::RecommendationOrchestrator;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Recommendation orchestrator holding the configured generative provider.
    pub orchestrator: Arc<RecommendationOrchestrator>,
}
