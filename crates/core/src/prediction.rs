//! Waste prediction heuristic.
//!
//! Converts a [`PredictionInput`] into a [`PredictionResult`] using a fixed
//! weighted scoring of category, storage, temperature, food-per-guest ratio
//! and guest count on top of a base utilization rate.
//!
//! [`predict`] never fails: any internal fault yields the zero-valued
//! [`PredictionResult::degraded`] result and is logged.

use crate::category::FoodCategory;
use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Defaults
// ---------------------------------------------------------------------------

/// Humidity assumed when the caller does not supply one (percent).
pub const DEFAULT_HUMIDITY: f64 = 50.0;
/// Quantity assumed when neither prepared quantity nor sales are known (kg).
pub const DEFAULT_QUANTITY_KG: f64 = 400.0;
/// Guest count assumed when neither guests nor sales are known.
pub const DEFAULT_GUESTS: u32 = 300;
/// Sales-to-guests divisor used to estimate a missing guest count.
pub const SALES_PER_GUEST_ESTIMATE: f64 = 3.0;
/// Food-per-guest ratio used when the guest count resolves to zero.
pub const DEFAULT_FOOD_PER_GUEST: f64 = 1.33;
/// Storage condition assumed when none is given.
pub const DEFAULT_STORAGE: &str = "Refrigerated";

// ---------------------------------------------------------------------------
// Scoring constants
// ---------------------------------------------------------------------------

/// Utilization rate before any adjustment.
pub const BASE_UTILIZATION: f64 = 0.85;
/// kg of CO2 per kg of food waste.
pub const CO2_PER_KG_WASTE: f64 = 2.5;

// ---------------------------------------------------------------------------
// Input / output types
// ---------------------------------------------------------------------------

/// Operational inputs for one prediction.
#[derive(Debug, Clone, PartialEq)]
pub struct PredictionInput {
    /// Current temperature in degrees Celsius.
    pub temperature: f64,
    /// Relative humidity in percent.
    pub humidity: Option<f64>,
    /// Free-text product description, normalized via [`FoodCategory`].
    pub product_type: String,
    /// Historical sales volume in kg.
    pub historical_sales: f64,
    pub number_of_guests: Option<u32>,
    /// Prepared quantity in kg.
    pub quantity_of_food: Option<f64>,
    pub storage_conditions: Option<String>,
}

impl PredictionInput {
    pub fn category(&self) -> FoodCategory {
        FoodCategory::from_product_type(&self.product_type)
    }

    pub fn humidity_or_default(&self) -> f64 {
        self.humidity.unwrap_or(DEFAULT_HUMIDITY)
    }

    pub fn storage_or_default(&self) -> &str {
        self.storage_conditions.as_deref().unwrap_or(DEFAULT_STORAGE)
    }
}

/// Output of the waste heuristic. All values are rounded to two decimals.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PredictionResult {
    /// Fraction of food consumed, in `[0, 1]`.
    pub utilization_rate: f64,
    /// Predicted waste in kg.
    pub waste_kg: f64,
    /// CO2 equivalent of the predicted waste in kg.
    pub co2_kg: f64,
}

impl PredictionResult {
    /// Zero-valued result returned when the heuristic hits an internal fault.
    pub fn degraded() -> Self {
        Self {
            utilization_rate: 0.0,
            waste_kg: 0.0,
            co2_kg: 0.0,
        }
    }
}

// ---------------------------------------------------------------------------
// Storage conditions
// ---------------------------------------------------------------------------

/// Recognized storage conditions. Anything else scores as neutral.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageCondition {
    Refrigerated,
    Frozen,
    RoomTemperature,
    Heated,
    Unrecognized,
}

impl StorageCondition {
    /// Parse a storage label, ignoring case and surrounding whitespace.
    pub fn parse(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "refrigerated" => Self::Refrigerated,
            "frozen" => Self::Frozen,
            "room temperature" => Self::RoomTemperature,
            "heated" => Self::Heated,
            _ => Self::Unrecognized,
        }
    }
}

// ---------------------------------------------------------------------------
// Working values
// ---------------------------------------------------------------------------

/// Values derived from the input (with defaults applied) that feed scoring.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorkingValues {
    pub quantity_kg: f64,
    pub guests: u32,
    pub food_per_guest: f64,
    pub temperature: f64,
    pub category: FoodCategory,
    pub storage: StorageCondition,
}

impl WorkingValues {
    /// Resolve working values, rejecting non-finite or negative figures.
    pub fn resolve(input: &PredictionInput) -> Result<Self, CoreError> {
        if !input.temperature.is_finite() {
            return Err(CoreError::Internal(format!(
                "temperature is not a finite number: {}",
                input.temperature
            )));
        }
        if !input.historical_sales.is_finite() {
            return Err(CoreError::Internal(format!(
                "historical_sales is not a finite number: {}",
                input.historical_sales
            )));
        }

        let sales = Some(input.historical_sales);
        let quantity_kg = resolve_quantity(input.quantity_of_food, sales);
        if !quantity_kg.is_finite() || quantity_kg < 0.0 {
            return Err(CoreError::Internal(format!(
                "quantity must be a non-negative finite number, got {quantity_kg}"
            )));
        }
        let guests = resolve_guests(input.number_of_guests, sales);

        Ok(Self {
            quantity_kg,
            guests,
            food_per_guest: food_per_guest(quantity_kg, guests),
            temperature: input.temperature,
            category: input.category(),
            storage: StorageCondition::parse(input.storage_or_default()),
        })
    }
}

/// Prepared quantity, falling back to historical sales, then the default.
pub fn resolve_quantity(quantity_of_food: Option<f64>, historical_sales: Option<f64>) -> f64 {
    quantity_of_food
        .or(historical_sales)
        .unwrap_or(DEFAULT_QUANTITY_KG)
}

/// Guest count, falling back to `historical_sales / 3` truncated, then the default.
pub fn resolve_guests(number_of_guests: Option<u32>, historical_sales: Option<f64>) -> u32 {
    match (number_of_guests, historical_sales) {
        (Some(guests), _) => guests,
        // Float-to-int `as` saturates, so negative sales land on zero guests.
        (None, Some(sales)) => (sales / SALES_PER_GUEST_ESTIMATE).trunc() as u32,
        (None, None) => DEFAULT_GUESTS,
    }
}

/// Quantity per guest; zero guests fall back to [`DEFAULT_FOOD_PER_GUEST`].
pub fn food_per_guest(quantity_kg: f64, guests: u32) -> f64 {
    if guests > 0 {
        quantity_kg / guests as f64
    } else {
        DEFAULT_FOOD_PER_GUEST
    }
}

// ---------------------------------------------------------------------------
// Scoring factors
// ---------------------------------------------------------------------------

pub fn category_factor(category: FoodCategory) -> f64 {
    match category {
        FoodCategory::Dairy => 0.05,
        FoodCategory::Meat => 0.03,
        FoodCategory::Vegetables => -0.08,
        FoodCategory::Fruits => -0.05,
        FoodCategory::BakedGoods => -0.10,
        FoodCategory::Seafood => -0.12,
        FoodCategory::Other => 0.0,
    }
}

pub fn storage_factor(storage: StorageCondition) -> f64 {
    match storage {
        StorageCondition::Refrigerated => 0.0,
        StorageCondition::Frozen => 0.05,
        StorageCondition::RoomTemperature => -0.10,
        StorageCondition::Heated => -0.15,
        StorageCondition::Unrecognized => 0.0,
    }
}

/// Boundaries are exclusive: exactly 25 °C scores 0.
pub fn temperature_factor(temperature: f64) -> f64 {
    if temperature > 30.0 {
        -0.10
    } else if temperature > 25.0 {
        -0.05
    } else if temperature < 5.0 {
        0.05
    } else {
        0.0
    }
}

pub fn food_per_guest_factor(food_per_guest: f64) -> f64 {
    if food_per_guest > 2.0 {
        -0.15
    } else if food_per_guest > 1.5 {
        -0.10
    } else if food_per_guest > 1.0 {
        -0.05
    } else {
        0.0
    }
}

pub fn guest_count_factor(guests: u32) -> f64 {
    if guests > 500 {
        0.05
    } else if guests > 300 {
        0.03
    } else if guests < 100 {
        -0.05
    } else {
        0.0
    }
}

/// Round to two decimal places.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

// ---------------------------------------------------------------------------
// Prediction
// ---------------------------------------------------------------------------

/// Score resolved working values into a rounded [`PredictionResult`].
pub fn score(values: &WorkingValues) -> PredictionResult {
    let raw = BASE_UTILIZATION
        + category_factor(values.category)
        + storage_factor(values.storage)
        + temperature_factor(values.temperature)
        + food_per_guest_factor(values.food_per_guest)
        + guest_count_factor(values.guests);

    let utilization_rate = round2(raw.clamp(0.0, 1.0));
    let waste_kg = round2(values.quantity_kg * (1.0 - utilization_rate));
    let co2_kg = round2(waste_kg * CO2_PER_KG_WASTE);

    PredictionResult {
        utilization_rate,
        waste_kg,
        co2_kg,
    }
}

/// Run the heuristic, surfacing internal faults as errors.
pub fn try_predict(input: &PredictionInput) -> Result<PredictionResult, CoreError> {
    let values = WorkingValues::resolve(input)?;
    let result = score(&values);

    if !(result.waste_kg.is_finite() && result.co2_kg.is_finite()) {
        return Err(CoreError::Internal(format!(
            "prediction produced non-finite output: {result:?}"
        )));
    }
    Ok(result)
}

/// Run the heuristic. Internal faults degrade to the zero result.
pub fn predict(input: &PredictionInput) -> PredictionResult {
    match try_predict(input) {
        Ok(result) => {
            tracing::info!(
                product_type = %input.product_type,
                waste_kg = result.waste_kg,
                co2_kg = result.co2_kg,
                utilization_rate = result.utilization_rate,
                "Waste predicted",
            );
            result
        }
        Err(e) => {
            tracing::error!(
                error = %e,
                product_type = %input.product_type,
                "Prediction failed, returning degraded result",
            );
            PredictionResult::degraded()
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
