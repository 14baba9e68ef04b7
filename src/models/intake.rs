//! Intake event model
//!
//! A single recorded consumption as seen by the analysis code. Events are
//! produced by an event source and never modified afterwards.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::NutrientKind;

/// Amount of one nutrient contributed by an event, in the nutrient's unit
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NutrientContribution {
    pub nutrient: NutrientKind,
    pub amount: f64,
}

/// A recorded intake on a calendar day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntakeEvent {
    pub date: NaiveDate,
    pub contributions: Vec<NutrientContribution>,
    /// Which supplement (or other source) the intake came from
    pub group: Option<String>,
}

impl IntakeEvent {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            contributions: Vec::new(),
            group: None,
        }
    }

    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }

    /// Append a contribution; order is preserved
    pub fn with(mut self, nutrient: NutrientKind, amount: f64) -> Self {
        self.contributions.push(NutrientContribution { nutrient, amount });
        self
    }
}
