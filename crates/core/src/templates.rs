//! Deterministic, threshold-tiered recommendation templates.
//!
//! This is the always-available baseline tier of the recommendation
//! pipeline. Every template names the food category and carries figures
//! derived from the predicted waste.

use crate::category::FoodCategory;
use crate::prediction::CO2_PER_KG_WASTE;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Waste above this many kg is the "high" tier.
pub const HIGH_WASTE_THRESHOLD_KG: f64 = 30.0;
/// Waste above this many kg (and not high) is the "moderate" tier.
pub const MODERATE_WASTE_THRESHOLD_KG: f64 = 15.0;

/// Fraction of predicted waste targeted for reduction.
pub const TARGET_REDUCTION_FRACTION: f64 = 0.3;
/// Assumed food cost used for savings figures, in USD per kg.
pub const FOOD_COST_PER_KG_USD: f64 = 5.0;

// ---------------------------------------------------------------------------
// Waste tiers
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WasteTier {
    High,
    Moderate,
    Low,
}

impl WasteTier {
    /// Bucket a waste figure. Thresholds are exclusive (30.0 kg is moderate).
    pub fn from_waste(waste_kg: f64) -> Self {
        if waste_kg > HIGH_WASTE_THRESHOLD_KG {
            Self::High
        } else if waste_kg > MODERATE_WASTE_THRESHOLD_KG {
            Self::Moderate
        } else {
            Self::Low
        }
    }
}

/// Target reduction figures shared by the templates and the generative prompt.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReductionTarget {
    /// kg of waste to eliminate.
    pub reduce_kg: f64,
    /// Waste remaining once the target is met.
    pub remaining_kg: f64,
    /// Food cost saved by meeting the target, in USD.
    pub savings_usd: f64,
}

impl ReductionTarget {
    pub fn for_waste(waste_kg: f64) -> Self {
        let reduce_kg = waste_kg * TARGET_REDUCTION_FRACTION;
        Self {
            reduce_kg,
            remaining_kg: waste_kg - reduce_kg,
            savings_usd: reduce_kg * FOOD_COST_PER_KG_USD,
        }
    }
}

// ---------------------------------------------------------------------------
// Templates
// ---------------------------------------------------------------------------

/// Build the ordered template list for a category and predicted waste.
///
/// The high tier yields six entries; the moderate and low tiers yield five.
pub fn template_recommendations(category: FoodCategory, waste_kg: f64) -> Vec<String> {
    let food = category.name();
    let target = ReductionTarget::for_waste(waste_kg);
    let reduce = target.reduce_kg;
    let savings = target.savings_usd;
    let share = |fraction: f64| waste_kg * fraction;

    match WasteTier::from_waste(waste_kg) {
        WasteTier::High => vec![
            format!(
                "Reduce {food} purchase quantity by exactly 30% to save {reduce:.1} kg waste, \
                 resulting in ${savings:.2} cost savings per cycle."
            ),
            format!(
                "Implement a 'daily special' using {food} items approaching expiration to \
                 utilize at least 15% ({:.1} kg) of potential waste.",
                share(0.15)
            ),
            format!(
                "Partner with food rescue organizations to donate excess {food}, potentially \
                 saving up to {:.1} kg of waste and {:.1} kg of CO2 emissions.",
                share(0.2),
                share(0.2) * CO2_PER_KG_WASTE
            ),
            format!(
                "Train staff on proper storage techniques for {food} to extend shelf life by \
                 2-3 days, reducing spoilage by approximately {:.1} kg.",
                share(0.12)
            ),
            format!(
                "Use smaller serving plates for {food} dishes to reduce portion sizes by 15%, \
                 minimizing plate waste by an estimated {:.1} kg.",
                share(0.15)
            ),
            format!(
                "Track {food} waste daily with a digital log to identify patterns and cut at \
                 least {:.1} kg through targeted interventions.",
                share(0.1)
            ),
        ],
        WasteTier::Moderate => vec![
            format!(
                "Reduce {food} purchase quantity by 15% to save {reduce:.1} kg waste, \
                 resulting in ${savings:.2} cost savings per cycle."
            ),
            format!(
                "Create a 'happy hour' menu to use up excess {food} inventory, potentially \
                 utilizing {:.1} kg of product that would otherwise be wasted.",
                share(0.18)
            ),
            format!(
                "Implement a first-in, first-out (FIFO) inventory system for {food}, reducing \
                 spoilage by approximately {:.1} kg.",
                share(0.12)
            ),
            format!(
                "Review portion sizes and adjust recipes to reduce {food} waste by {:.1} kg, \
                 saving {:.1} kg of CO2 emissions.",
                share(0.15),
                share(0.15) * CO2_PER_KG_WASTE
            ),
            format!(
                "Train kitchen staff on proper preparation techniques to minimize trim waste, \
                 saving up to {:.1} kg of {food}.",
                share(0.1)
            ),
        ],
        WasteTier::Low => vec![
            format!(
                "Continue current ordering patterns for {food} with regular monitoring, but \
                 reduce order quantities by 10% to save {reduce:.1} kg waste."
            ),
            format!(
                "Repurpose {food} trimmings in stocks, sauces, or garnishes to utilize \
                 approximately {:.1} kg of potential waste.",
                share(0.15)
            ),
            format!(
                "Educate staff about the environmental impact of {food} waste: cutting \
                 {reduce:.1} kg would avoid {:.1} kg of CO2 emissions.",
                reduce * CO2_PER_KG_WASTE
            ),
            format!(
                "Run a weekly {food} waste audit to maintain awareness and capture up to \
                 ${savings:.2} in food cost savings."
            ),
            format!(
                "Compost any unavoidable {food} waste, diverting up to {waste_kg:.1} kg from \
                 landfill."
            ),
        ],
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
