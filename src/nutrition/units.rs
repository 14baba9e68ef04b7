//! Unit types and conversion constants
//!
//! Supplement labels mix mg, mcg and IU. Everything is converted to the
//! nutrient's canonical unit before it is stored.

use serde::{Deserialize, Serialize};

use crate::models::{NutrientKind, NutrientUnit};

/// Unit an amount was entered in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AmountUnit {
    Gram,
    Milligram,
    Microgram,
    /// International units; the conversion factor depends on the nutrient
    Iu,
}

impl AmountUnit {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "g" | "gram" | "grams" => Some(AmountUnit::Gram),
            "mg" | "milligram" | "milligrams" => Some(AmountUnit::Milligram),
            "mcg" | "µg" | "μg" | "ug" | "microgram" | "micrograms" => Some(AmountUnit::Microgram),
            "iu" | "ie" => Some(AmountUnit::Iu),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AmountUnit::Gram => "g",
            AmountUnit::Milligram => "mg",
            AmountUnit::Microgram => "mcg",
            AmountUnit::Iu => "iu",
        }
    }

    /// Micrograms per unit for mass units
    fn micrograms(&self) -> Option<f64> {
        match self {
            AmountUnit::Gram => Some(MCG_PER_G),
            AmountUnit::Milligram => Some(MCG_PER_MG),
            AmountUnit::Microgram => Some(1.0),
            AmountUnit::Iu => None,
        }
    }
}

// ============================================================================
// Mass Conversion Constants (to micrograms)
// ============================================================================

/// Micrograms per milligram
pub const MCG_PER_MG: f64 = 1_000.0;
/// Micrograms per gram
pub const MCG_PER_G: f64 = 1_000_000.0;

// ============================================================================
// IU Conversion Constants
// ============================================================================

/// Vitamin D: micrograms per IU (1 µg = 40 IU)
pub const VITAMIN_D_MCG_PER_IU: f64 = 0.025;
/// Vitamin A as retinol: micrograms RAE per IU
pub const VITAMIN_A_MCG_PER_IU: f64 = 0.3;
/// Vitamin E as natural alpha-tocopherol: milligrams per IU
pub const VITAMIN_E_MG_PER_IU: f64 = 0.67;

/// Canonical amount per IU for nutrients that are labelled in IU
pub fn canonical_per_iu(nutrient: NutrientKind) -> Option<f64> {
    match nutrient {
        NutrientKind::VitaminD => Some(VITAMIN_D_MCG_PER_IU),
        NutrientKind::VitaminA => Some(VITAMIN_A_MCG_PER_IU),
        NutrientKind::VitaminE => Some(VITAMIN_E_MG_PER_IU),
        _ => None,
    }
}

/// Convert an amount into `nutrient`'s canonical unit
///
/// Returns None for IU on a nutrient with no IU definition.
pub fn to_canonical(amount: f64, unit: AmountUnit, nutrient: NutrientKind) -> Option<f64> {
    if unit == AmountUnit::Iu {
        return canonical_per_iu(nutrient).map(|factor| amount * factor);
    }

    let micrograms = amount * unit.micrograms()?;
    Some(match nutrient.unit() {
        NutrientUnit::Microgram => micrograms,
        NutrientUnit::Milligram => micrograms / MCG_PER_MG,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_units() {
        assert_eq!(AmountUnit::from_str("MG"), Some(AmountUnit::Milligram));
        assert_eq!(AmountUnit::from_str("µg"), Some(AmountUnit::Microgram));
        assert_eq!(AmountUnit::from_str("ug"), Some(AmountUnit::Microgram));
        assert_eq!(AmountUnit::from_str("IU"), Some(AmountUnit::Iu));
        assert_eq!(AmountUnit::from_str("tbsp"), None);
    }

    #[test]
    fn test_mass_to_milligram_nutrient() {
        // Vitamin C is tracked in mg
        assert_eq!(to_canonical(500.0, AmountUnit::Milligram, NutrientKind::VitaminC), Some(500.0));
        let from_g = to_canonical(1.0, AmountUnit::Gram, NutrientKind::VitaminC).unwrap();
        assert!((from_g - 1000.0).abs() < 1e-9);
        let from_mcg = to_canonical(250.0, AmountUnit::Microgram, NutrientKind::Zinc).unwrap();
        assert!((from_mcg - 0.25).abs() < 1e-9);
    }

    #[test]
    fn test_mass_to_microgram_nutrient() {
        let from_mg = to_canonical(0.5, AmountUnit::Milligram, NutrientKind::Folate).unwrap();
        assert!((from_mg - 500.0).abs() < 1e-9);
    }

    #[test]
    fn test_iu_conversion() {
        // 1000 IU vitamin D = 25 µg
        let d = to_canonical(1000.0, AmountUnit::Iu, NutrientKind::VitaminD).unwrap();
        assert!((d - 25.0).abs() < 1e-9);
        assert_eq!(to_canonical(100.0, AmountUnit::Iu, NutrientKind::Iron), None);
    }
}
