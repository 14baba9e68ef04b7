//! Intake analysis
//!
//! Aggregation, classification and trend building. Everything here is a pure
//! function of its inputs.

pub mod aggregator;
pub mod classifier;
pub mod trend;

pub use aggregator::{daily_total, group_totals, range_total, NutrientTotals};
pub use classifier::{classify, Classification, IntakeStatus, INSUFFICIENT_BELOW_PERCENT};
pub use trend::{build_series, summary_tips, AdvisoryTip, Deviation, TrendPoint, TrendSeries};
