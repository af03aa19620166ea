//! Prompt construction for the generative recommendation tier.

use crate::category::FoodCategory;
use crate::prediction::{PredictionInput, PredictionResult};
use crate::templates::{ReductionTarget, FOOD_COST_PER_KG_USD};

/// Number of recommendations requested from the generative provider.
pub const REQUESTED_RECOMMENDATIONS: usize = 6;

/// Ceiling for the target utilization rate quoted in the prompt.
pub const MAX_TARGET_UTILIZATION: f64 = 0.95;

/// Relative utilization improvement quoted as the target.
const TARGET_UTILIZATION_GROWTH: f64 = 1.3;

/// System instruction for chat-style providers.
pub const SYSTEM_INSTRUCTION: &str = "You are a data-driven food waste management expert \
providing concise, actionable recommendations with specific numbers and metrics.";

/// Operational context forwarded to the provider alongside the prediction.
#[derive(Debug, Clone, PartialEq)]
pub struct RecommendationContext {
    pub temperature: f64,
    pub humidity: f64,
    pub storage_conditions: String,
    pub number_of_guests: Option<u32>,
    pub quantity_of_food: Option<f64>,
    pub historical_sales: f64,
}

impl RecommendationContext {
    /// Build the context from a request, applying humidity and storage defaults.
    pub fn from_input(input: &PredictionInput) -> Self {
        Self {
            temperature: input.temperature,
            humidity: input.humidity_or_default(),
            storage_conditions: input.storage_or_default().to_string(),
            number_of_guests: input.number_of_guests,
            quantity_of_food: input.quantity_of_food,
            historical_sales: input.historical_sales,
        }
    }
}

/// Target utilization: 30% above the current rate, capped at 0.95.
pub fn target_utilization(current: f64) -> f64 {
    (current * TARGET_UTILIZATION_GROWTH).min(MAX_TARGET_UTILIZATION)
}

fn or_unknown<T: std::fmt::Display>(value: Option<T>) -> String {
    value.map_or_else(|| "unknown".to_string(), |v| v.to_string())
}

/// Render the recommendation prompt.
pub fn build_prompt(
    category: FoodCategory,
    prediction: &PredictionResult,
    context: &RecommendationContext,
) -> String {
    let food = category.name();
    let waste = prediction.waste_kg;
    let target = ReductionTarget::for_waste(waste);
    let current_pct = prediction.utilization_rate * 100.0;
    let target_pct = target_utilization(prediction.utilization_rate) * 100.0;
    let guests = or_unknown(context.number_of_guests);
    let quantity = or_unknown(context.quantity_of_food);

    format!(
        "Based on the following metrics from a restaurant or food service operation, provide \
{REQUESTED_RECOMMENDATIONS} specific, actionable recommendations to reduce food waste. \
Include exact numbers and percentages in each recommendation.

METRICS:
- Food Type: {food}
- Predicted Food Waste: {waste:.1} kg
- Target Waste Reduction: {reduce:.1} kg (30%, to reach {remaining:.1} kg)
- CO2 Emissions of Predicted Waste: {co2:.1} kg
- Current Food Utilization Rate: {current_pct:.1}%
- Target Utilization Rate: {target_pct:.1}%
- Storage Conditions: {storage}
- Current Temperature: {temperature}°C
- Current Humidity: {humidity}%
- Number of Guests: {guests}
- Quantity of Food: {quantity} kg
- Historical Sales: {sales} kg
- Potential Financial Savings: ${savings:.2} (at ${FOOD_COST_PER_KG_USD:.0}/kg)

INSTRUCTIONS:
- Provide exactly {REQUESTED_RECOMMENDATIONS} recommendations tailored to {food} and {waste:.1} kg of waste.
- Each recommendation must include specific figures (kg, %, $) derived from the metrics.
- Format each recommendation as a separate paragraph.
- Do not number the recommendations.
- Do not include any introduction, explanation, or conclusion.

RECOMMENDATIONS:",
        reduce = target.reduce_kg,
        remaining = target.remaining_kg,
        co2 = prediction.co2_kg,
        storage = context.storage_conditions,
        temperature = context.temperature,
        humidity = context.humidity,
        sales = context.historical_sales,
        savings = target.savings_usd,
    )
}
