//! Generative text provider capability.
//!
//! The recommendation orchestrator only needs one thing from a remote text
//! generator: turn a prompt into text, or report why it could not. Concrete
//! HTTP backends live in the `wastecast-llm` crate.

use async_trait::async_trait;

/// Result of one generative call. Failures carry a human-readable reason.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderOutcome {
    Success(String),
    Failure(String),
}

impl<E: std::fmt::Display> From<Result<String, E>> for ProviderOutcome {
    fn from(result: Result<String, E>) -> Self {
        match result {
            Ok(text) => Self::Success(text),
            Err(e) => Self::Failure(e.to_string()),
        }
    }
}

/// A remote text-generation backend.
///
/// Implementations must not panic on transport or decoding errors; every
/// failure is reported as [`ProviderOutcome::Failure`].
#[async_trait]
pub trait GenerativeProvider: Send + Sync {
    /// Short backend identifier used in logs and the health endpoint.
    fn name(&self) -> &'static str;

    async fn generate(&self, prompt: &str) -> ProviderOutcome;
}

/// Provider used when no generative backend is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledProvider;

#[async_trait]
impl GenerativeProvider for DisabledProvider {
    fn name(&self) -> &'static str {
        "disabled"
    }

    async fn generate(&self, _prompt: &str) -> ProviderOutcome {
        ProviderOutcome::Failure("generative provider disabled".to_string())
    }
}
