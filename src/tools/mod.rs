//! VitaTrack Tools module
//!
//! MCP tool implementations. Each tool returns a serializable response or a
//! user-facing error string.

pub mod analysis;
pub mod intake;
pub mod profile;
pub mod status;
pub mod supplements;

use chrono::NaiveDate;
use serde::Serialize;

use crate::models::NutrientKind;
use crate::nutrition::{to_canonical, AmountUnit};

/// Parse an ISO date parameter
pub fn parse_date(date: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d")
        .map_err(|_| format!("Invalid date '{}': expected YYYY-MM-DD", date))
}

pub fn parse_nutrient(nutrient: &str) -> Result<NutrientKind, String> {
    NutrientKind::from_str(nutrient).ok_or_else(|| {
        format!("Unknown nutrient '{}'. Call list_nutrients for valid keys.", nutrient)
    })
}

/// Nutrient amount as entered by a caller
#[derive(Debug, Clone)]
pub struct NutrientAmountInput {
    pub nutrient: String,
    pub amount: f64,
    /// Defaults to the nutrient's canonical unit
    pub unit: Option<String>,
}

impl NutrientAmountInput {
    /// Nutrient and amount in its canonical unit
    pub fn to_canonical(&self) -> Result<(NutrientKind, f64), String> {
        let nutrient = parse_nutrient(&self.nutrient)?;
        let amount = match self.unit.as_deref() {
            None => self.amount,
            Some(unit) => {
                let unit = AmountUnit::from_str(unit).ok_or_else(|| {
                    format!("Unknown unit '{}': use mg, mcg, g or iu", unit)
                })?;
                to_canonical(self.amount, unit, nutrient).ok_or_else(|| {
                    format!("{} has no IU conversion; enter it in mg or mcg", nutrient)
                })?
            }
        };
        Ok((nutrient, amount))
    }
}

/// Nutrient amount for display
#[derive(Debug, Clone, Serialize)]
pub struct NutrientAmountView {
    pub nutrient: NutrientKind,
    pub name: &'static str,
    pub amount: f64,
    pub unit: &'static str,
}

impl NutrientAmountView {
    pub fn new(nutrient: NutrientKind, amount: f64) -> Self {
        Self {
            nutrient,
            name: nutrient.display_name(),
            amount,
            unit: nutrient.unit().symbol(),
        }
    }
}
