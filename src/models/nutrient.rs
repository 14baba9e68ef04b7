//! Nutrient model
//!
//! The closed set of tracked vitamins and minerals, each with a fixed unit.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Canonical unit a nutrient is measured and stored in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NutrientUnit {
    Milligram,
    Microgram,
}

impl NutrientUnit {
    pub fn symbol(&self) -> &'static str {
        match self {
            NutrientUnit::Milligram => "mg",
            NutrientUnit::Microgram => "µg",
        }
    }
}

/// Tracked nutrient
///
/// Declaration order is the canonical order used for reports and tips.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NutrientKind {
    VitaminA,
    VitaminB1,
    VitaminB2,
    Niacin,
    VitaminB6,
    Folate,
    VitaminB12,
    VitaminC,
    VitaminD,
    VitaminE,
    VitaminK,
    Calcium,
    Magnesium,
    Iron,
    Zinc,
    Iodine,
    Selenium,
}

impl NutrientKind {
    /// Every nutrient in canonical order
    pub const ALL: [NutrientKind; 17] = [
        NutrientKind::VitaminA,
        NutrientKind::VitaminB1,
        NutrientKind::VitaminB2,
        NutrientKind::Niacin,
        NutrientKind::VitaminB6,
        NutrientKind::Folate,
        NutrientKind::VitaminB12,
        NutrientKind::VitaminC,
        NutrientKind::VitaminD,
        NutrientKind::VitaminE,
        NutrientKind::VitaminK,
        NutrientKind::Calcium,
        NutrientKind::Magnesium,
        NutrientKind::Iron,
        NutrientKind::Zinc,
        NutrientKind::Iodine,
        NutrientKind::Selenium,
    ];

    /// Stable key used in storage and tool parameters
    pub fn as_str(&self) -> &'static str {
        match self {
            NutrientKind::VitaminA => "vitamin_a",
            NutrientKind::VitaminB1 => "vitamin_b1",
            NutrientKind::VitaminB2 => "vitamin_b2",
            NutrientKind::Niacin => "niacin",
            NutrientKind::VitaminB6 => "vitamin_b6",
            NutrientKind::Folate => "folate",
            NutrientKind::VitaminB12 => "vitamin_b12",
            NutrientKind::VitaminC => "vitamin_c",
            NutrientKind::VitaminD => "vitamin_d",
            NutrientKind::VitaminE => "vitamin_e",
            NutrientKind::VitaminK => "vitamin_k",
            NutrientKind::Calcium => "calcium",
            NutrientKind::Magnesium => "magnesium",
            NutrientKind::Iron => "iron",
            NutrientKind::Zinc => "zinc",
            NutrientKind::Iodine => "iodine",
            NutrientKind::Selenium => "selenium",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().replace(['-', ' '], "_").as_str() {
            "vitamin_a" | "a" | "retinol" => Some(NutrientKind::VitaminA),
            "vitamin_b1" | "b1" | "thiamin" | "thiamine" => Some(NutrientKind::VitaminB1),
            "vitamin_b2" | "b2" | "riboflavin" => Some(NutrientKind::VitaminB2),
            "niacin" | "vitamin_b3" | "b3" => Some(NutrientKind::Niacin),
            "vitamin_b6" | "b6" | "pyridoxine" => Some(NutrientKind::VitaminB6),
            "folate" | "folic_acid" | "vitamin_b9" | "b9" => Some(NutrientKind::Folate),
            "vitamin_b12" | "b12" | "cobalamin" => Some(NutrientKind::VitaminB12),
            "vitamin_c" | "c" | "ascorbic_acid" => Some(NutrientKind::VitaminC),
            "vitamin_d" | "d" | "vitamin_d3" | "d3" => Some(NutrientKind::VitaminD),
            "vitamin_e" | "e" | "tocopherol" => Some(NutrientKind::VitaminE),
            "vitamin_k" | "k" | "vitamin_k2" | "k2" => Some(NutrientKind::VitaminK),
            "calcium" | "ca" => Some(NutrientKind::Calcium),
            "magnesium" => Some(NutrientKind::Magnesium),
            "iron" | "fe" => Some(NutrientKind::Iron),
            "zinc" | "zn" => Some(NutrientKind::Zinc),
            "iodine" => Some(NutrientKind::Iodine),
            "selenium" | "se" => Some(NutrientKind::Selenium),
            _ => None,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            NutrientKind::VitaminA => "Vitamin A",
            NutrientKind::VitaminB1 => "Vitamin B1 (Thiamin)",
            NutrientKind::VitaminB2 => "Vitamin B2 (Riboflavin)",
            NutrientKind::Niacin => "Niacin",
            NutrientKind::VitaminB6 => "Vitamin B6",
            NutrientKind::Folate => "Folate",
            NutrientKind::VitaminB12 => "Vitamin B12",
            NutrientKind::VitaminC => "Vitamin C",
            NutrientKind::VitaminD => "Vitamin D",
            NutrientKind::VitaminE => "Vitamin E",
            NutrientKind::VitaminK => "Vitamin K",
            NutrientKind::Calcium => "Calcium",
            NutrientKind::Magnesium => "Magnesium",
            NutrientKind::Iron => "Iron",
            NutrientKind::Zinc => "Zinc",
            NutrientKind::Iodine => "Iodine",
            NutrientKind::Selenium => "Selenium",
        }
    }

    pub fn unit(&self) -> NutrientUnit {
        match self {
            NutrientKind::VitaminA
            | NutrientKind::Folate
            | NutrientKind::VitaminB12
            | NutrientKind::VitaminD
            | NutrientKind::VitaminK
            | NutrientKind::Iodine
            | NutrientKind::Selenium => NutrientUnit::Microgram,
            NutrientKind::VitaminB1
            | NutrientKind::VitaminB2
            | NutrientKind::Niacin
            | NutrientKind::VitaminB6
            | NutrientKind::VitaminC
            | NutrientKind::VitaminE
            | NutrientKind::Calcium
            | NutrientKind::Magnesium
            | NutrientKind::Iron
            | NutrientKind::Zinc => NutrientUnit::Milligram,
        }
    }
}

impl fmt::Display for NutrientKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_is_in_declaration_order() {
        let mut sorted = NutrientKind::ALL;
        sorted.sort();
        assert_eq!(sorted, NutrientKind::ALL);
    }

    #[test]
    fn test_key_round_trips_through_from_str() {
        for nutrient in NutrientKind::ALL {
            assert_eq!(NutrientKind::from_str(nutrient.as_str()), Some(nutrient));
        }
    }

    #[test]
    fn test_from_str_aliases() {
        assert_eq!(NutrientKind::from_str("Vitamin D3"), Some(NutrientKind::VitaminD));
        assert_eq!(NutrientKind::from_str("folic-acid"), Some(NutrientKind::Folate));
        assert_eq!(NutrientKind::from_str("unobtainium"), None);
    }

    #[test]
    fn test_units() {
        assert_eq!(NutrientKind::VitaminC.unit(), NutrientUnit::Milligram);
        assert_eq!(NutrientKind::VitaminD.unit(), NutrientUnit::Microgram);
        assert_eq!(NutrientKind::Calcium.unit().symbol(), "mg");
    }

    #[test]
    fn test_serde_uses_snake_case_keys() {
        let json = serde_json::to_string(&NutrientKind::VitaminB12).unwrap();
        assert_eq!(json, "\"vitamin_b12\"");
    }
}
