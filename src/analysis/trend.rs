//! Trend series and advisory tips
//!
//! Fixed-length daily series for charts, and tips for nutrients whose latest
//! classification is out of the normal band.

use std::collections::BTreeMap;

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use super::aggregator::daily_total;
use super::classifier::{Classification, IntakeStatus};
use crate::models::{IntakeEvent, NutrientKind};
use crate::reference::ReferenceEntry;

/// One day of a series
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrendPoint {
    pub date: NaiveDate,
    pub amount: f64,
}

/// Consecutive daily totals of one nutrient
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendSeries {
    pub nutrient: NutrientKind,
    /// Oldest first, one point per day, zero-filled
    pub points: Vec<TrendPoint>,
    /// Mean over every point, including zero days
    pub average_value: f64,
    /// Reference line, when a recommendation could be resolved
    pub recommendation: Option<f64>,
    pub upper_limit: Option<f64>,
}

/// Build a series of exactly `window_days` points ending at `end_date`
pub fn build_series(
    events: &[IntakeEvent],
    nutrient: NutrientKind,
    end_date: NaiveDate,
    window_days: u32,
    recommendation: Option<&ReferenceEntry>,
) -> TrendSeries {
    let points: Vec<TrendPoint> = (0..window_days)
        .rev()
        .map(|offset| {
            let date = end_date - Duration::days(i64::from(offset));
            let amount = daily_total(events, date)
                .get(&nutrient)
                .copied()
                .unwrap_or(0.0);
            TrendPoint { date, amount }
        })
        .collect();

    let average_value = if points.is_empty() {
        0.0
    } else {
        points.iter().map(|p| p.amount).sum::<f64>() / points.len() as f64
    };

    TrendSeries {
        nutrient,
        points,
        average_value,
        recommendation: recommendation.map(|r| r.recommended_amount),
        upper_limit: recommendation.and_then(|r| r.upper_limit),
    }
}

/// Direction a nutrient deviates from the normal band
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Deviation {
    Low,
    High,
}

/// Advice for one out-of-band nutrient
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdvisoryTip {
    pub nutrient: NutrientKind,
    pub deviation: Deviation,
    pub percentage: f64,
    pub message: String,
}

/// One tip per insufficient or excessive nutrient, in canonical nutrient order
pub fn summary_tips(classifications: &BTreeMap<NutrientKind, Classification>) -> Vec<AdvisoryTip> {
    classifications
        .iter()
        .filter_map(|(&nutrient, classification)| {
            let deviation = match classification.status {
                IntakeStatus::Insufficient => Deviation::Low,
                IntakeStatus::Excessive => Deviation::High,
                IntakeStatus::Normal => return None,
            };
            Some(AdvisoryTip {
                nutrient,
                deviation,
                percentage: classification.percentage,
                message: tip_message(nutrient, deviation, classification.percentage),
            })
        })
        .collect()
}

fn tip_message(nutrient: NutrientKind, deviation: Deviation, percentage: f64) -> String {
    match deviation {
        Deviation::Low => format!(
            "{} intake is at {:.0}% of the daily recommendation. Consider a supplement or foods rich in {}.",
            nutrient, percentage, nutrient
        ),
        Deviation::High => format!(
            "{} intake is above the safe upper limit ({:.0}% of the recommendation). Consider reducing supplements containing {}.",
            nutrient, percentage, nutrient
        ),
    }
}
