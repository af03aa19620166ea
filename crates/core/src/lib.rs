//! Prediction and recommendation engine for food waste estimation.
//!
//! Pure domain logic with no HTTP or framework dependencies beyond the
//! async provider seam. The API crate wires these pieces to the network.

pub mod assessment;
pub mod category;
pub mod error;
pub mod parsing;
pub mod prediction;
pub mod prompt;
pub mod provider;
pub mod recommend;
pub mod templates;
