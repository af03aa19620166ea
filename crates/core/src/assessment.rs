//! Per-request assessment pipeline.
//!
//! Runs category mapping, waste prediction and recommendation orchestration
//! for one [`PredictionInput`] and assembles the response record.

use serde::Serialize;

use crate::category::FoodCategory;
use crate::prediction::{predict, PredictionInput};
use crate::prompt::RecommendationContext;
use crate::recommend::{RecommendationOrchestrator, RecommendationSet};

/// Complete result for one prediction request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WasteAssessment {
    /// Predicted waste in kg.
    pub prediction: f64,
    pub recommendations: RecommendationSet,
    /// CO2 equivalent of the predicted waste in kg.
    pub co2_saved: f64,
    pub food_type: FoodCategory,
    pub utilization_rate: f64,
}

/// Assess one request. Never fails; degraded stages fall back internally.
pub async fn assess(
    input: &PredictionInput,
    orchestrator: &RecommendationOrchestrator,
) -> WasteAssessment {
    let category = input.category();
    tracing::debug!(stage = "category_mapped", %category, "Product type mapped");

    let prediction = predict(input);
    tracing::debug!(stage = "predicted", waste_kg = prediction.waste_kg, "Waste predicted");

    let context = RecommendationContext::from_input(input);
    let recommendations = orchestrator.recommend(category, &prediction, &context).await;

    WasteAssessment {
        prediction: prediction.waste_kg,
        recommendations,
        co2_saved: prediction.co2_kg,
        food_type: category,
        utilization_rate: prediction.utilization_rate,
    }
}
