use std::sync::Arc;

use chrono::NaiveDate;
use tempfile::TempDir;

use vitatrack::analysis::IntakeStatus;
use vitatrack::db::Database;
use vitatrack::models::{NutrientKind, Person};
use vitatrack::reference::{RecommendationResolver, ReferenceTable};
use vitatrack::tools::analysis::{get_daily_report, get_recommendation, get_trend};
use vitatrack::tools::{intake, profile, supplements, NutrientAmountInput};

fn setup() -> (TempDir, Database, RecommendationResolver) {
    let dir = tempfile::tempdir().unwrap();
    let db = Database::open(dir.path().join("vitatrack.db")).unwrap();
    let resolver = RecommendationResolver::new(Arc::new(ReferenceTable::bundled().unwrap()));
    (dir, db, resolver)
}

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn amount(nutrient: &str, amount: f64, unit: Option<&str>) -> NutrientAmountInput {
    NutrientAmountInput {
        nutrient: nutrient.to_string(),
        amount,
        unit: unit.map(str::to_string),
    }
}

#[test]
fn report_classifies_supplements_and_direct_intake() {
    let (_dir, db, resolver) = setup();
    profile::set_profile(&db, "female", None, date("2025-03-01")).unwrap();

    let vitamin_c = supplements::add_supplement(
        &db,
        "C 1000".to_string(),
        None,
        None,
        None,
        vec![amount("vitamin_c", 1000.0, None), amount("zinc", 10.0, None)],
    )
    .unwrap();
    let vitamin_d = supplements::add_supplement(
        &db,
        "D3 2000".to_string(),
        None,
        None,
        None,
        vec![amount("vitamin_d", 2000.0, Some("iu"))],
    )
    .unwrap();

    intake::log_intake(&db, "2025-03-01", Some(vitamin_c.id), 3.0, vec![], None).unwrap();
    intake::log_intake(&db, "2025-03-01", Some(vitamin_d.id), 1.0, vec![], None).unwrap();
    intake::log_intake(&db, "2025-03-01", None, 1.0, vec![amount("magnesium", 100.0, None)], None).unwrap();

    let report = get_daily_report(&db, &db, &resolver, date("2025-03-01"), false).unwrap();
    assert_eq!(report.person, Person::AdultFemale);

    let statuses: Vec<(NutrientKind, IntakeStatus)> =
        report.nutrients.iter().map(|n| (n.nutrient, n.status)).collect();
    assert_eq!(
        statuses,
        vec![
            (NutrientKind::VitaminC, IntakeStatus::Excessive),
            (NutrientKind::VitaminD, IntakeStatus::Normal),
            (NutrientKind::Magnesium, IntakeStatus::Insufficient),
            (NutrientKind::Zinc, IntakeStatus::Excessive),
        ]
    );
    assert_eq!(report.excessive_count, 2);
    assert_eq!(report.insufficient_count, 1);
    assert_eq!(report.tips.len(), 3);
    assert!(report.unresolved.is_empty());

    let sources: Vec<&str> = report.by_source.iter().map(|s| s.source.as_str()).collect();
    assert_eq!(sources, vec!["direct entry", "C 1000", "D3 2000"]);
}

#[test]
fn vitamin_c_adult_female_thresholds() {
    let (_dir, db, resolver) = setup();
    profile::set_profile(&db, "female", None, date("2025-03-01")).unwrap();

    intake::log_intake(&db, "2025-03-01", None, 1.0, vec![amount("vitamin_c", 95.0, None)], None).unwrap();
    intake::log_intake(&db, "2025-03-02", None, 1.0, vec![amount("vitamin_c", 50.0, None)], None).unwrap();
    intake::log_intake(&db, "2025-03-03", None, 1.0, vec![amount("vitamin_c", 2500.0, None)], None).unwrap();

    let full = get_daily_report(&db, &db, &resolver, date("2025-03-01"), false).unwrap();
    assert_eq!(full.nutrients[0].status, IntakeStatus::Normal);
    assert!((full.nutrients[0].percentage - 100.0).abs() < 1e-9);
    assert_eq!(full.nutrients[0].upper_limit, Some(2000.0));

    let low = get_daily_report(&db, &db, &resolver, date("2025-03-02"), false).unwrap();
    assert_eq!(low.nutrients[0].status, IntakeStatus::Insufficient);
    assert!((low.nutrients[0].percentage - 52.63).abs() < 0.01);

    let high = get_daily_report(&db, &db, &resolver, date("2025-03-03"), false).unwrap();
    assert_eq!(high.nutrients[0].status, IntakeStatus::Excessive);
}

#[test]
fn report_requires_a_profile() {
    let (_dir, db, resolver) = setup();
    intake::log_intake(&db, "2025-03-01", None, 1.0, vec![amount("iron", 5.0, None)], None).unwrap();
    assert!(get_daily_report(&db, &db, &resolver, date("2025-03-01"), false).is_err());
}

#[test]
fn child_outside_reference_range_is_reported_unresolved() {
    let (_dir, db, resolver) = setup();
    profile::set_profile(&db, "child", Some("2000-01-01"), date("2025-03-01")).unwrap();
    intake::log_intake(&db, "2025-03-01", None, 1.0, vec![amount("iron", 5.0, None)], None).unwrap();

    let report = get_daily_report(&db, &db, &resolver, date("2025-03-01"), false).unwrap();
    assert!(report.nutrients.is_empty());
    assert_eq!(report.unresolved.len(), 1);
    assert!(report.unresolved[0].reason.contains("outside the reference range"));
}

#[test]
fn recommendation_uses_profile_or_override() {
    let (_dir, db, resolver) = setup();
    assert!(get_recommendation(&db, &resolver, NutrientKind::VitaminC, None, date("2025-03-01")).is_err());

    profile::set_profile(&db, "female", None, date("2025-03-01")).unwrap();
    let stored = get_recommendation(&db, &resolver, NutrientKind::VitaminC, None, date("2025-03-01")).unwrap();
    assert!((stored.recommendation.recommended_amount - 95.0).abs() < 1e-9);
    assert_eq!(stored.recommendation.unit, "mg");

    let young = get_recommendation(
        &db,
        &resolver,
        NutrientKind::Calcium,
        Some(Person::Child { age: 7 }),
        date("2025-03-01"),
    )
    .unwrap();
    let older = get_recommendation(
        &db,
        &resolver,
        NutrientKind::Calcium,
        Some(Person::Child { age: 15 }),
        date("2025-03-01"),
    )
    .unwrap();
    assert!(older.recommendation.recommended_amount > young.recommendation.recommended_amount);

    let too_old = get_recommendation(
        &db,
        &resolver,
        NutrientKind::Calcium,
        Some(Person::Child { age: 19 }),
        date("2025-03-01"),
    );
    assert!(too_old.is_err());
}

#[test]
fn trend_over_stored_intake() {
    let (_dir, db, resolver) = setup();
    profile::set_profile(&db, "male", None, date("2025-03-01")).unwrap();
    for day in ["2025-03-05", "2025-03-07", "2025-03-09"] {
        intake::log_intake(&db, day, None, 1.0, vec![amount("vitamin_d", 2000.0, Some("IU"))], None).unwrap();
    }

    let trend = get_trend(&db, &db, &resolver, NutrientKind::VitaminD, date("2025-03-07"), 7).unwrap();
    assert_eq!(trend.series.points.len(), 7);
    assert_eq!(trend.series.points[0].date, date("2025-03-01"));
    assert_eq!(trend.series.points[6].date, date("2025-03-07"));
    assert!((trend.series.average_value - 100.0 / 7.0).abs() < 1e-9);
    assert_eq!(trend.series.recommendation, Some(20.0));
    assert_eq!(trend.latest.map(|c| c.status), Some(IntakeStatus::Normal));

    assert!(get_trend(&db, &db, &resolver, NutrientKind::VitaminD, date("2025-03-07"), 400).is_err());
}
