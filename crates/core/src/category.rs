//! Food category normalization.
//!
//! Maps free-text product descriptions ("whole milk", "chicken thighs",
//! "sourdough") onto the fixed [`FoodCategory`] enumeration used by the
//! predictor and the recommendation templates.

use serde::Serialize;

// ---------------------------------------------------------------------------
// Keyword sets (checked in declaration order)
// ---------------------------------------------------------------------------

const DAIRY_KEYWORDS: &[&str] = &["dairy", "milk", "cheese", "yogurt", "cream"];
const MEAT_KEYWORDS: &[&str] = &["meat", "beef", "chicken", "pork", "lamb"];
const VEGETABLE_KEYWORDS: &[&str] = &["vegetable", "produce", "veg"];
const FRUIT_KEYWORDS: &[&str] = &["fruit", "apple", "berry"];
const BAKED_GOODS_KEYWORDS: &[&str] = &["bakery", "bread", "grain", "pasta"];
const SEAFOOD_KEYWORDS: &[&str] = &["seafood", "fish", "shrimp", "shellfish"];

/// Priority-ordered keyword table. The first matching row wins.
const KEYWORD_TABLE: &[(FoodCategory, &[&str])] = &[
    (FoodCategory::Dairy, DAIRY_KEYWORDS),
    (FoodCategory::Meat, MEAT_KEYWORDS),
    (FoodCategory::Vegetables, VEGETABLE_KEYWORDS),
    (FoodCategory::Fruits, FRUIT_KEYWORDS),
    (FoodCategory::BakedGoods, BAKED_GOODS_KEYWORDS),
    (FoodCategory::Seafood, SEAFOOD_KEYWORDS),
];

// ---------------------------------------------------------------------------
// FoodCategory
// ---------------------------------------------------------------------------

/// Standardized food category.
///
/// Serialized using the human-readable name (e.g. `"Dairy Products"`), which
/// is also what appears in recommendation text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum FoodCategory {
    #[serde(rename = "Dairy Products")]
    Dairy,
    Meat,
    Vegetables,
    Fruits,
    #[serde(rename = "Baked Goods")]
    BakedGoods,
    Seafood,
    Other,
}

impl FoodCategory {
    /// All categories, in mapping priority order (`Other` last).
    pub const ALL: [FoodCategory; 7] = [
        Self::Dairy,
        Self::Meat,
        Self::Vegetables,
        Self::Fruits,
        Self::BakedGoods,
        Self::Seafood,
        Self::Other,
    ];

    /// Normalize a free-text product description into a category.
    ///
    /// Matching is case-insensitive substring search against fixed keyword
    /// sets. When several sets match, the earliest in priority order wins,
    /// so `"milk-braised chicken"` is [`FoodCategory::Dairy`].
    pub fn from_product_type(product_type: &str) -> Self {
        let lowered = product_type.to_lowercase();
        KEYWORD_TABLE
            .iter()
            .find(|(_, keywords)| keywords.iter().any(|k| lowered.contains(k)))
            .map(|(category, _)| *category)
            .unwrap_or(Self::Other)
    }

    /// Display name used in API responses and recommendation text.
    pub fn name(self) -> &'static str {
        match self {
            Self::Dairy => "Dairy Products",
            Self::Meat => "Meat",
            Self::Vegetables => "Vegetables",
            Self::Fruits => "Fruits",
            Self::BakedGoods => "Baked Goods",
            Self::Seafood => "Seafood",
            Self::Other => "Other",
        }
    }
}

impl std::fmt::Display for FoodCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
