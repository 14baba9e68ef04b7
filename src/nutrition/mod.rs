//! Nutrition unit handling
//!
//! Converts label amounts into each nutrient's canonical unit.

pub mod units;

pub use units::{canonical_per_iu, to_canonical, AmountUnit};
