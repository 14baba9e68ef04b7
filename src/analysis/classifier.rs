//! Intake status classification
//!
//! Compares an observed amount to a resolved reference row.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::reference::ReferenceEntry;

/// Percent of the recommendation below which intake counts as insufficient
pub const INSUFFICIENT_BELOW_PERCENT: f64 = 80.0;

/// Adequacy verdict
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IntakeStatus {
    Insufficient,
    Normal,
    Excessive,
}

impl IntakeStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            IntakeStatus::Insufficient => "insufficient",
            IntakeStatus::Normal => "normal",
            IntakeStatus::Excessive => "excessive",
        }
    }
}

impl fmt::Display for IntakeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Verdict together with the percentage of the recommendation it was based on
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    pub status: IntakeStatus,
    pub percentage: f64,
}

/// Classify `actual_amount` against `recommendation`
///
/// An upper-limit breach is excessive whatever the percentage. Reaching the
/// upper limit exactly is still normal.
pub fn classify(actual_amount: f64, recommendation: &ReferenceEntry) -> Classification {
    let percentage = if actual_amount == 0.0 {
        0.0
    } else {
        actual_amount / recommendation.recommended_amount * 100.0
    };

    let status = match recommendation.upper_limit {
        Some(upper) if actual_amount > upper => IntakeStatus::Excessive,
        _ if percentage < INSUFFICIENT_BELOW_PERCENT => IntakeStatus::Insufficient,
        _ => IntakeStatus::Normal,
    };

    Classification { status, percentage }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NutrientKind;
    use crate::reference::Band;

    fn vitamin_c_female() -> ReferenceEntry {
        ReferenceEntry {
            nutrient: NutrientKind::VitaminC,
            band: Band::Female,
            recommended_amount: 95.0,
            upper_limit: Some(2000.0),
        }
    }

    fn no_upper(recommended: f64) -> ReferenceEntry {
        ReferenceEntry {
            nutrient: NutrientKind::VitaminK,
            band: Band::Male,
            recommended_amount: recommended,
            upper_limit: None,
        }
    }

    #[test]
    fn test_zero_intake_is_insufficient() {
        let result = classify(0.0, &vitamin_c_female());
        assert_eq!(result.status, IntakeStatus::Insufficient);
        assert_eq!(result.percentage, 0.0);
        assert_eq!(classify(0.0, &no_upper(70.0)).status, IntakeStatus::Insufficient);
    }

    #[test]
    fn test_exact_recommendation_is_normal() {
        let result = classify(95.0, &vitamin_c_female());
        assert_eq!(result.status, IntakeStatus::Normal);
        assert!((result.percentage - 100.0).abs() < 1e-9);
        assert_eq!(classify(70.0, &no_upper(70.0)).status, IntakeStatus::Normal);
    }

    #[test]
    fn test_below_threshold_is_insufficient() {
        let result = classify(50.0, &vitamin_c_female());
        assert_eq!(result.status, IntakeStatus::Insufficient);
        assert!((result.percentage - 52.63).abs() < 0.01);
    }

    #[test]
    fn test_threshold_boundary() {
        // 80% exactly is normal
        assert_eq!(classify(76.0, &vitamin_c_female()).status, IntakeStatus::Normal);
        assert_eq!(classify(75.9, &vitamin_c_female()).status, IntakeStatus::Insufficient);
    }

    #[test]
    fn test_upper_limit_breach_is_excessive() {
        let result = classify(2500.0, &vitamin_c_female());
        assert_eq!(result.status, IntakeStatus::Excessive);
        assert!((result.percentage - 2631.58).abs() < 0.01);
    }

    #[test]
    fn test_upper_limit_itself_is_normal() {
        assert_eq!(classify(2000.0, &vitamin_c_female()).status, IntakeStatus::Normal);
        assert_eq!(classify(2000.01, &vitamin_c_female()).status, IntakeStatus::Excessive);
    }

    #[test]
    fn test_upper_limit_breach_overrides_normal_band() {
        // 110% would be normal on its own
        let entry = ReferenceEntry {
            nutrient: NutrientKind::Iron,
            band: Band::Male,
            recommended_amount: 10.0,
            upper_limit: Some(10.5),
        };
        assert_eq!(classify(11.0, &entry).status, IntakeStatus::Excessive);
    }

    #[test]
    fn test_no_upper_limit_never_excessive() {
        let result = classify(100_000.0, &no_upper(70.0));
        assert_eq!(result.status, IntakeStatus::Normal);
    }
}
