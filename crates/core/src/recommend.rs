//! Recommendation orchestration.
//!
//! Combines the deterministic template tier with an optional generative tier
//! into a bounded, deduplicated [`RecommendationSet`]. The generative tier is
//! strictly additive: any failure, timeout or unusable response leaves the
//! template tier as the answer.

use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;

use crate::category::FoodCategory;
use crate::parsing::parse_recommendations;
use crate::prediction::PredictionResult;
use crate::prompt::{build_prompt, RecommendationContext};
use crate::provider::{GenerativeProvider, ProviderOutcome};
use crate::templates::template_recommendations;

/// Fewest recommendations a set may contain.
pub const MIN_RECOMMENDATIONS: usize = 3;
/// Most recommendations a set may contain.
pub const MAX_RECOMMENDATIONS: usize = 6;

/// Default bound on a single generative call.
pub const DEFAULT_PROVIDER_TIMEOUT: Duration = Duration::from_secs(8);

// ---------------------------------------------------------------------------
// RecommendationSet
// ---------------------------------------------------------------------------

/// Ordered, duplicate-free list of recommendations.
///
/// Only produced by [`merge_recommendations`], which enforces the size bound
/// whenever the template tier supplies at least [`MIN_RECOMMENDATIONS`]
/// distinct entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RecommendationSet(Vec<String>);

impl RecommendationSet {
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_vec(self) -> Vec<String> {
        self.0
    }
}

/// Merge the template tier with generated entries.
///
/// Starts from the templates, appends distinct generated entries until
/// [`MAX_RECOMMENDATIONS`] is reached, then backfills from unused templates
/// if fewer than [`MIN_RECOMMENDATIONS`] are present.
pub fn merge_recommendations(templates: &[String], generated: &[String]) -> RecommendationSet {
    fn push_distinct(merged: &mut Vec<String>, rec: &str, limit: usize) {
        if merged.len() < limit && !merged.iter().any(|m| m == rec) {
            merged.push(rec.to_string());
        }
    }

    let mut merged: Vec<String> = Vec::with_capacity(MAX_RECOMMENDATIONS);
    for rec in templates {
        push_distinct(&mut merged, rec, MAX_RECOMMENDATIONS);
    }
    for rec in generated {
        push_distinct(&mut merged, rec, MAX_RECOMMENDATIONS);
    }
    if merged.len() < MIN_RECOMMENDATIONS {
        for rec in templates {
            push_distinct(&mut merged, rec, MIN_RECOMMENDATIONS);
        }
    }

    RecommendationSet(merged)
}

// ---------------------------------------------------------------------------
// Orchestrator
// ---------------------------------------------------------------------------

/// Produces recommendation sets using a shared generative provider handle.
///
/// Cheap to share across requests behind an `Arc`; holds no per-request state.
pub struct RecommendationOrchestrator {
    provider: Arc<dyn GenerativeProvider>,
    timeout: Duration,
}

impl RecommendationOrchestrator {
    pub fn new(provider: Arc<dyn GenerativeProvider>, timeout: Duration) -> Self {
        Self { provider, timeout }
    }

    pub fn provider_name(&self) -> &'static str {
        self.provider.name()
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Build the recommendation set for one prediction. Never fails.
    pub async fn recommend(
        &self,
        category: FoodCategory,
        prediction: &PredictionResult,
        context: &RecommendationContext,
    ) -> RecommendationSet {
        let templates = template_recommendations(category, prediction.waste_kg);
        tracing::debug!(
            stage = "template_generated",
            count = templates.len(),
            %category,
            "Template recommendations generated"
        );

        let prompt = build_prompt(category, prediction, context);
        let generated = self.generative_tier(&prompt).await;
        tracing::debug!(
            stage = "provider_attempted",
            provider = self.provider.name(),
            count = generated.len(),
            "Generative tier attempted"
        );

        let set = merge_recommendations(&templates, &generated);
        tracing::debug!(stage = "merged", count = set.len(), "Recommendations merged");
        set
    }

    /// Run the generative call under the timeout and parse its output.
    ///
    /// Returns an empty list on any failure.
    async fn generative_tier(&self, prompt: &str) -> Vec<String> {
        let outcome = match tokio::time::timeout(self.timeout, self.provider.generate(prompt)).await
        {
            Ok(outcome) => outcome,
            Err(_) => ProviderOutcome::Failure(format!(
                "timed out after {} ms",
                self.timeout.as_millis()
            )),
        };

        match outcome {
            ProviderOutcome::Success(raw) => {
                let parsed = parse_recommendations(&raw);
                if parsed.is_empty() {
                    tracing::warn!(
                        provider = self.provider.name(),
                        "Generative provider returned no usable recommendations",
                    );
                }
                parsed
            }
            ProviderOutcome::Failure(reason) => {
                tracing::warn!(
                    provider = self.provider.name(),
                    reason = %reason,
                    "Generative provider unavailable, using template recommendations",
                );
                Vec::new()
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
