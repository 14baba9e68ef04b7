//! Analysis MCP Tools
//!
//! Recommendation lookup, daily reports and trends. These work against any
//! event and profile source so they can be driven from fixtures as well as
//! the database.

use std::collections::BTreeMap;
use std::fmt::Display;

use chrono::{Duration, NaiveDate};
use serde::Serialize;

use super::NutrientAmountView;
use crate::analysis::{
    build_series, classify, daily_total, group_totals, summary_tips, AdvisoryTip, Classification,
    IntakeStatus, TrendSeries,
};
use crate::models::{NutrientKind, Person};
use crate::reference::{RecommendationResolver, ReferenceEntry};
use crate::sources::{EventSource, ProfileSource};

/// Longest trend window accepted
pub const MAX_TREND_WINDOW_DAYS: u32 = 366;

/// Window used when the caller does not pass one
pub const DEFAULT_TREND_WINDOW_DAYS: u32 = 7;

#[derive(Debug, Serialize)]
pub struct NutrientInfo {
    pub key: &'static str,
    pub name: &'static str,
    pub unit: &'static str,
}

#[derive(Debug, Serialize)]
pub struct ListNutrientsResponse {
    pub nutrients: Vec<NutrientInfo>,
    pub total: usize,
}

/// One resolved reference row, with units attached
#[derive(Debug, Serialize)]
pub struct RecommendationView {
    pub nutrient: NutrientKind,
    pub name: &'static str,
    pub unit: &'static str,
    pub recommended_amount: f64,
    pub upper_limit: Option<f64>,
    pub band: String,
}

impl From<ReferenceEntry> for RecommendationView {
    fn from(entry: ReferenceEntry) -> Self {
        Self {
            nutrient: entry.nutrient,
            name: entry.nutrient.display_name(),
            unit: entry.nutrient.unit().symbol(),
            recommended_amount: entry.recommended_amount,
            upper_limit: entry.upper_limit,
            band: entry.band.to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RecommendationResponse {
    pub person: Person,
    pub reference_version: String,
    pub recommendation: RecommendationView,
}

/// One nutrient row in a daily report
#[derive(Debug, Serialize)]
pub struct NutrientReport {
    pub nutrient: NutrientKind,
    pub name: &'static str,
    pub unit: &'static str,
    pub total: f64,
    pub recommended_amount: f64,
    pub upper_limit: Option<f64>,
    pub percentage: f64,
    pub status: IntakeStatus,
}

/// Nutrient that could not be evaluated
#[derive(Debug, Serialize)]
pub struct UnresolvedNutrient {
    pub nutrient: NutrientKind,
    pub total: f64,
    pub reason: String,
}

/// Totals contributed by one supplement, or by direct entries
#[derive(Debug, Serialize)]
pub struct SourceBreakdown {
    pub source: String,
    pub nutrients: Vec<NutrientAmountView>,
}

#[derive(Debug, Serialize)]
pub struct DailyReportResponse {
    pub date: String,
    pub person: Person,
    pub reference_version: String,
    pub nutrients: Vec<NutrientReport>,
    pub unresolved: Vec<UnresolvedNutrient>,
    pub tips: Vec<AdvisoryTip>,
    pub by_source: Vec<SourceBreakdown>,
    pub insufficient_count: usize,
    pub excessive_count: usize,
}

#[derive(Debug, Serialize)]
pub struct TrendResponse {
    pub name: &'static str,
    pub unit: &'static str,
    #[serde(flatten)]
    pub series: TrendSeries,
    /// Classification of the last day in the window
    pub latest: Option<Classification>,
}

/// Every tracked nutrient, in canonical order
pub fn list_nutrients() -> ListNutrientsResponse {
    let nutrients: Vec<NutrientInfo> = NutrientKind::ALL
        .iter()
        .map(|n| NutrientInfo {
            key: n.as_str(),
            name: n.display_name(),
            unit: n.unit().symbol(),
        })
        .collect();
    ListNutrientsResponse {
        total: nutrients.len(),
        nutrients,
    }
}

fn require_person<P>(profile: &P, date: NaiveDate) -> Result<Person, String>
where
    P: ProfileSource + ?Sized,
    P::Error: Display,
{
    profile
        .current_person(date)
        .map_err(|e| format!("Failed to read profile: {}", e))?
        .ok_or_else(|| "No profile set. Call set_profile first.".to_string())
}

/// Resolve one nutrient
///
/// `person` overrides the stored profile when given.
pub fn get_recommendation<P>(
    profile: &P,
    resolver: &RecommendationResolver,
    nutrient: NutrientKind,
    person: Option<Person>,
    date: NaiveDate,
) -> Result<RecommendationResponse, String>
where
    P: ProfileSource + ?Sized,
    P::Error: Display,
{
    let person = match person {
        Some(person) => person,
        None => require_person(profile, date)?,
    };

    let entry = resolver
        .resolve(nutrient, &person)
        .map_err(|e| e.to_string())?;

    Ok(RecommendationResponse {
        person,
        reference_version: resolver.table().version().to_string(),
        recommendation: entry.into(),
    })
}

/// Evaluate one day of intake against the profile person
///
/// Only nutrients with intake are reported unless `all_nutrients` is set.
pub fn get_daily_report<E, P>(
    events: &E,
    profile: &P,
    resolver: &RecommendationResolver,
    date: NaiveDate,
    all_nutrients: bool,
) -> Result<DailyReportResponse, String>
where
    E: EventSource + ?Sized,
    E::Error: Display,
    P: ProfileSource + ?Sized,
    P::Error: Display,
{
    let person = require_person(profile, date)?;
    let day_events = events
        .events_on(date)
        .map_err(|e| format!("Failed to read intake: {}", e))?;
    let totals = daily_total(&day_events, date);

    let mut nutrients = Vec::new();
    let mut unresolved = Vec::new();
    let mut classifications = BTreeMap::new();

    for (nutrient, resolved) in resolver.resolve_all(&person) {
        let total = totals.get(&nutrient).copied();
        if total.is_none() && !all_nutrients {
            continue;
        }
        let total = total.unwrap_or(0.0);

        match resolved {
            Ok(entry) => {
                let classification = classify(total, &entry);
                classifications.insert(nutrient, classification);
                nutrients.push(NutrientReport {
                    nutrient,
                    name: nutrient.display_name(),
                    unit: nutrient.unit().symbol(),
                    total,
                    recommended_amount: entry.recommended_amount,
                    upper_limit: entry.upper_limit,
                    percentage: classification.percentage,
                    status: classification.status,
                });
            }
            Err(e) => unresolved.push(UnresolvedNutrient {
                nutrient,
                total,
                reason: e.to_string(),
            }),
        }
    }

    let by_source = group_totals(&day_events, date)
        .into_iter()
        .map(|(group, totals)| SourceBreakdown {
            source: group.unwrap_or_else(|| "direct entry".to_string()),
            nutrients: totals
                .into_iter()
                .map(|(nutrient, amount)| NutrientAmountView::new(nutrient, amount))
                .collect(),
        })
        .collect();

    let count = |status: IntakeStatus| nutrients.iter().filter(|n| n.status == status).count();
    let insufficient_count = count(IntakeStatus::Insufficient);
    let excessive_count = count(IntakeStatus::Excessive);

    Ok(DailyReportResponse {
        date: date.to_string(),
        person,
        reference_version: resolver.table().version().to_string(),
        tips: summary_tips(&classifications),
        nutrients,
        unresolved,
        by_source,
        insufficient_count,
        excessive_count,
    })
}

/// Daily series for one nutrient ending at `end_date`
///
/// The reference line is omitted when no profile is set or the person cannot
/// be resolved.
pub fn get_trend<E, P>(
    events: &E,
    profile: &P,
    resolver: &RecommendationResolver,
    nutrient: NutrientKind,
    end_date: NaiveDate,
    window_days: u32,
) -> Result<TrendResponse, String>
where
    E: EventSource + ?Sized,
    E::Error: Display,
    P: ProfileSource + ?Sized,
    P::Error: Display,
{
    if window_days > MAX_TREND_WINDOW_DAYS {
        return Err(format!(
            "window_days must be at most {}",
            MAX_TREND_WINDOW_DAYS
        ));
    }

    let start_date = end_date - Duration::days(i64::from(window_days.saturating_sub(1)));
    let window_events = events
        .events_between(start_date, end_date)
        .map_err(|e| format!("Failed to read intake: {}", e))?;

    let entry = profile
        .current_person(end_date)
        .map_err(|e| format!("Failed to read profile: {}", e))?
        .and_then(|person| resolver.resolve(nutrient, &person).ok());

    let series = build_series(&window_events, nutrient, end_date, window_days, entry.as_ref());
    let latest = match (entry, series.points.last()) {
        (Some(entry), Some(point)) => Some(classify(point.amount, &entry)),
        _ => None,
    };

    Ok(TrendResponse {
        name: nutrient.display_name(),
        unit: nutrient.unit().symbol(),
        series,
        latest,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::models::IntakeEvent;
    use crate::reference::ReferenceTable;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn resolver() -> RecommendationResolver {
        RecommendationResolver::new(Arc::new(ReferenceTable::bundled().unwrap()))
    }

    struct NoProfile;

    impl ProfileSource for NoProfile {
        type Error = std::convert::Infallible;

        fn current_person(&self, _on: NaiveDate) -> Result<Option<Person>, Self::Error> {
            Ok(None)
        }
    }

    #[test]
    fn test_list_nutrients_in_canonical_order() {
        let response = list_nutrients();
        assert_eq!(response.total, NutrientKind::ALL.len());
        assert_eq!(response.nutrients[0].key, NutrientKind::ALL[0].as_str());
    }

    #[test]
    fn test_recommendation_override_beats_profile() {
        let response = get_recommendation(
            &Person::AdultMale,
            &resolver(),
            NutrientKind::VitaminC,
            Some(Person::AdultFemale),
            date("2025-03-01"),
        )
        .unwrap();
        assert_eq!(response.person, Person::AdultFemale);
        assert!((response.recommendation.recommended_amount - 95.0).abs() < 1e-9);
        assert_eq!(response.recommendation.upper_limit, Some(2000.0));
    }

    #[test]
    fn test_recommendation_needs_profile() {
        let result = get_recommendation(&NoProfile, &resolver(), NutrientKind::Iron, None, date("2025-03-01"));
        assert!(result.is_err());
    }

    #[test]
    fn test_daily_report_vitamin_c_female() {
        let day = date("2025-03-01");
        let events = vec![
            IntakeEvent::new(day).with_group("C 500").with(NutrientKind::VitaminC, 2500.0),
            IntakeEvent::new(day).with(NutrientKind::Iron, 5.0),
            IntakeEvent::new(date("2025-03-02")).with(NutrientKind::Zinc, 10.0),
        ];

        let report = get_daily_report(&events, &Person::AdultFemale, &resolver(), day, false).unwrap();
        assert_eq!(report.nutrients.len(), 2);
        assert!(report.unresolved.is_empty());

        let vitamin_c = report
            .nutrients
            .iter()
            .find(|n| n.nutrient == NutrientKind::VitaminC)
            .unwrap();
        assert_eq!(vitamin_c.status, IntakeStatus::Excessive);
        assert_eq!(report.excessive_count, 1);
        assert!(report
            .tips
            .iter()
            .any(|t| t.nutrient == NutrientKind::VitaminC));

        let sources: Vec<&str> = report.by_source.iter().map(|s| s.source.as_str()).collect();
        assert_eq!(sources, vec!["direct entry", "C 500"]);
    }

    #[test]
    fn test_daily_report_all_nutrients_includes_zero_rows() {
        let day = date("2025-03-01");
        let events: Vec<IntakeEvent> = Vec::new();
        let report = get_daily_report(&events, &Person::AdultMale, &resolver(), day, true).unwrap();
        assert_eq!(report.nutrients.len(), NutrientKind::ALL.len());
        assert_eq!(report.insufficient_count, NutrientKind::ALL.len());
        assert_eq!(report.tips.len(), NutrientKind::ALL.len());
    }

    #[test]
    fn test_daily_report_lists_out_of_range_child_as_unresolved() {
        let day = date("2025-03-01");
        let events = vec![IntakeEvent::new(day).with(NutrientKind::Iron, 5.0)];
        let report = get_daily_report(&events, &Person::Child { age: 19 }, &resolver(), day, false).unwrap();
        assert!(report.nutrients.is_empty());
        assert_eq!(report.unresolved.len(), 1);
        assert_eq!(report.unresolved[0].nutrient, NutrientKind::Iron);
    }

    #[test]
    fn test_trend_window_and_reference_line() {
        let end = date("2025-03-07");
        let events = vec![
            IntakeEvent::new(date("2025-03-01")).with(NutrientKind::VitaminC, 95.0),
            IntakeEvent::new(end).with(NutrientKind::VitaminC, 50.0),
        ];

        let trend = get_trend(&events, &Person::AdultFemale, &resolver(), NutrientKind::VitaminC, end, 7).unwrap();
        assert_eq!(trend.series.points.len(), 7);
        assert_eq!(trend.series.points[0].date, date("2025-03-01"));
        assert_eq!(trend.series.recommendation, Some(95.0));
        assert_eq!(trend.latest.map(|c| c.status), Some(IntakeStatus::Insufficient));

        let no_profile = get_trend(&events, &NoProfile, &resolver(), NutrientKind::VitaminC, end, 7).unwrap();
        assert_eq!(no_profile.series.recommendation, None);
        assert!(no_profile.latest.is_none());
    }

    #[test]
    fn test_trend_rejects_oversized_window() {
        let events: Vec<IntakeEvent> = Vec::new();
        let end = date("2025-03-07");
        assert!(get_trend(&events, &NoProfile, &resolver(), NutrientKind::Iron, end, 367).is_err());
        assert!(get_trend(&events, &NoProfile, &resolver(), NutrientKind::Iron, end, 366).is_ok());
    }
}
