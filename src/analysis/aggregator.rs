//! Intake aggregation
//!
//! Sums nutrient contributions over a day or an inclusive date range. Dates
//! are taken as already normalized calendar days.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::models::{IntakeEvent, NutrientKind};

/// Summed amount per nutrient; nutrients nobody contributed to are absent
pub type NutrientTotals = BTreeMap<NutrientKind, f64>;

fn add_event(totals: &mut NutrientTotals, event: &IntakeEvent) {
    for contribution in &event.contributions {
        *totals.entry(contribution.nutrient).or_insert(0.0) += contribution.amount;
    }
}

/// Totals for every event dated `date`
pub fn daily_total(events: &[IntakeEvent], date: NaiveDate) -> NutrientTotals {
    range_total(events, date, date)
}

/// Totals for every event dated within `start..=end`
///
/// An inverted range matches nothing.
pub fn range_total(events: &[IntakeEvent], start: NaiveDate, end: NaiveDate) -> NutrientTotals {
    let mut totals = NutrientTotals::new();
    for event in events.iter().filter(|e| e.date >= start && e.date <= end) {
        add_event(&mut totals, event);
    }
    totals
}

/// Day totals split by event group (e.g. per supplement)
///
/// Ungrouped events are collected under `None`.
pub fn group_totals(events: &[IntakeEvent], date: NaiveDate) -> BTreeMap<Option<String>, NutrientTotals> {
    let mut groups: BTreeMap<Option<String>, NutrientTotals> = BTreeMap::new();
    for event in events.iter().filter(|e| e.date == date) {
        add_event(groups.entry(event.group.clone()).or_default(), event);
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn sample_events() -> Vec<IntakeEvent> {
        vec![
            IntakeEvent::new(date("2025-03-01"))
                .with_group("Multivitamin")
                .with(NutrientKind::VitaminC, 80.0)
                .with(NutrientKind::VitaminD, 20.0),
            IntakeEvent::new(date("2025-03-01"))
                .with_group("Vitamin C 500")
                .with(NutrientKind::VitaminC, 500.0),
            IntakeEvent::new(date("2025-03-02")).with(NutrientKind::Iron, 14.0),
            IntakeEvent::new(date("2025-03-04"))
                .with_group("Multivitamin")
                .with(NutrientKind::VitaminC, 80.0),
        ]
    }

    #[test]
    fn test_daily_total_sums_same_day_events() {
        let totals = daily_total(&sample_events(), date("2025-03-01"));
        assert_eq!(totals.len(), 2);
        assert!((totals[&NutrientKind::VitaminC] - 580.0).abs() < 1e-9);
        assert!((totals[&NutrientKind::VitaminD] - 20.0).abs() < 1e-9);
        assert!(!totals.contains_key(&NutrientKind::Iron));
    }

    #[test]
    fn test_daily_total_of_no_events_is_empty() {
        assert!(daily_total(&[], date("2025-03-01")).is_empty());
        assert!(daily_total(&sample_events(), date("2025-03-03")).is_empty());
    }

    #[test]
    fn test_daily_total_is_order_independent() {
        let events = sample_events();
        let mut reversed = events.clone();
        reversed.reverse();
        let mut rotated = events.clone();
        rotated.rotate_left(2);

        let day = date("2025-03-01");
        assert_eq!(daily_total(&events, day), daily_total(&reversed, day));
        assert_eq!(daily_total(&events, day), daily_total(&rotated, day));
    }

    #[test]
    fn test_multi_nutrient_event_counts_once() {
        let event = IntakeEvent::new(date("2025-03-01"))
            .with(NutrientKind::Zinc, 10.0)
            .with(NutrientKind::Selenium, 55.0)
            .with(NutrientKind::Iodine, 150.0);
        let totals = daily_total(&[event], date("2025-03-01"));
        assert_eq!(totals[&NutrientKind::Zinc], 10.0);
        assert_eq!(totals[&NutrientKind::Selenium], 55.0);
        assert_eq!(totals[&NutrientKind::Iodine], 150.0);
    }

    #[test]
    fn test_range_total_bounds_are_inclusive() {
        let events = sample_events();
        let totals = range_total(&events, date("2025-03-01"), date("2025-03-04"));
        assert!((totals[&NutrientKind::VitaminC] - 660.0).abs() < 1e-9);
        assert_eq!(totals[&NutrientKind::Iron], 14.0);

        let middle = range_total(&events, date("2025-03-02"), date("2025-03-03"));
        assert_eq!(middle.len(), 1);
    }

    #[test]
    fn test_range_total_inverted_range_is_empty() {
        let totals = range_total(&sample_events(), date("2025-03-04"), date("2025-03-01"));
        assert!(totals.is_empty());
    }

    #[test]
    fn test_group_totals() {
        let groups = group_totals(&sample_events(), date("2025-03-01"));
        assert_eq!(groups.len(), 2);
        let multi = &groups[&Some("Multivitamin".to_string())];
        assert_eq!(multi[&NutrientKind::VitaminC], 80.0);

        let ungrouped = group_totals(&sample_events(), date("2025-03-02"));
        assert_eq!(ungrouped[&None][&NutrientKind::Iron], 14.0);
    }
}
