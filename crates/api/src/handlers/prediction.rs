//! Handler for the waste prediction endpoint.
//!
//! Validates the request body, then delegates to the assessment pipeline in
//! `wastecast_core`, which never fails once input is accepted.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use validator::{Validate, ValidationErrors};
use wastecast_core::assessment::assess;
use wastecast_core::error::CoreError;
use wastecast_core::prediction::PredictionInput;

use crate::error::AppResult;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request body
// ---------------------------------------------------------------------------

/// JSON body for `POST /api/v1/predict`.
///
/// Required fields are `Option` so a missing field is reported as a
/// validation error rather than a generic decoding failure.
#[derive(Debug, Deserialize, Validate)]
pub struct PredictionRequest {
    #[validate(required(message = "temperature is required"))]
    pub temperature: Option<f64>,

    #[validate(range(min = 0.0, max = 100.0, message = "humidity must be between 0 and 100"))]
    pub humidity: Option<f64>,

    #[validate(
        required(message = "product_type is required"),
        length(min = 1, message = "product_type must not be empty")
    )]
    pub product_type: Option<String>,

    #[validate(
        required(message = "historical_sales is required"),
        range(min = 0.0, message = "historical_sales must be non-negative")
    )]
    pub historical_sales: Option<f64>,

    pub number_of_guests: Option<u32>,

    #[validate(range(min = 0.0, message = "quantity_of_food must be non-negative"))]
    pub quantity_of_food: Option<f64>,

    pub storage_conditions: Option<String>,
}

impl PredictionRequest {
    /// Validate the body and convert it into the core input record.
    pub fn into_input(self) -> Result<PredictionInput, CoreError> {
        self.validate()
            .map_err(|e| CoreError::Validation(describe_validation_errors(&e)))?;

        let (Some(temperature), Some(product_type), Some(historical_sales)) =
            (self.temperature, self.product_type, self.historical_sales)
        else {
            return Err(CoreError::Validation("missing required field".into()));
        };

        Ok(PredictionInput {
            temperature,
            humidity: self.humidity,
            product_type,
            historical_sales,
            number_of_guests: self.number_of_guests,
            quantity_of_food: self.quantity_of_food,
            storage_conditions: self
                .storage_conditions
                .filter(|s| !s.trim().is_empty()),
        })
    }
}

/// Flatten validator output into a stable, sorted `field: message` list.
fn describe_validation_errors(errors: &ValidationErrors) -> String {
    let mut messages: Vec<String> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| {
                let detail = e
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| e.code.to_string());
                format!("{field}: {detail}")
            })
        })
        .collect();
    messages.sort();
    messages.join("; ")
}

// ---------------------------------------------------------------------------
// POST /predict
// ---------------------------------------------------------------------------

/// Predict waste for one operational snapshot and return recommendations.
pub async fn predict(
    State(state): State<AppState>,
    payload: Result<Json<PredictionRequest>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let Json(body) = payload?;
    // CoreError auto-converts to AppError via #[from].
    let input = body.into_input()?;

    let assessment = assess(&input, &state.orchestrator).await;

    tracing::info!(
        food_type = %assessment.food_type,
        prediction = assessment.prediction,
        recommendations = assessment.recommendations.len(),
        provider = state.orchestrator.provider_name(),
        "Prediction served",
    );

    Ok(Json(assessment))
}
