//! Reference table
//!
//! Immutable, versioned set of reference rows. A table is validated once when
//! it is built and then only read.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::band::{AgeBracket, Band};
use super::{ReferenceError, ReferenceResult};
use crate::models::NutrientKind;

/// One reference row
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReferenceEntry {
    pub nutrient: NutrientKind,
    pub band: Band,
    /// Recommended daily amount in the nutrient's unit
    pub recommended_amount: f64,
    /// Tolerable upper intake level, when one is defined
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upper_limit: Option<f64>,
}

impl ReferenceEntry {
    fn validate(&self) -> ReferenceResult<()> {
        if !self.recommended_amount.is_finite() || self.recommended_amount <= 0.0 {
            return Err(ReferenceError::InvalidTable(format!(
                "{} ({}): recommended amount must be positive, got {}",
                self.nutrient, self.band, self.recommended_amount
            )));
        }
        if let Some(upper) = self.upper_limit {
            if !upper.is_finite() || upper <= self.recommended_amount {
                return Err(ReferenceError::InvalidTable(format!(
                    "{} ({}): upper limit {} must exceed recommended amount {}",
                    self.nutrient, self.band, upper, self.recommended_amount
                )));
            }
        }
        Ok(())
    }
}

/// Serialized form of a table, used for JSON datasets
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReferenceDocument {
    pub version: String,
    pub child_brackets: Vec<AgeBracket>,
    pub entries: Vec<ReferenceEntry>,
}

/// Validated reference table
#[derive(Debug, Clone)]
pub struct ReferenceTable {
    version: String,
    child_brackets: Vec<AgeBracket>,
    entries: BTreeMap<(NutrientKind, Band), ReferenceEntry>,
}

impl ReferenceTable {
    /// Build and validate a table
    ///
    /// Brackets must be listed youngest first, start at age 0, and neither
    /// overlap nor leave gaps. Coverage is not enforced here; see
    /// [`ReferenceTable::missing_entries`].
    pub fn new(
        version: impl Into<String>,
        child_brackets: Vec<AgeBracket>,
        entries: impl IntoIterator<Item = ReferenceEntry>,
    ) -> ReferenceResult<Self> {
        validate_brackets(&child_brackets)?;

        let mut map = BTreeMap::new();
        for entry in entries {
            entry.validate()?;
            if let Band::Child(bracket) = entry.band {
                if !child_brackets.contains(&bracket) {
                    return Err(ReferenceError::InvalidTable(format!(
                        "{}: bracket {} is not one of the table's child brackets",
                        entry.nutrient, bracket
                    )));
                }
            }
            if map.insert((entry.nutrient, entry.band), entry).is_some() {
                return Err(ReferenceError::InvalidTable(format!(
                    "duplicate entry for {} ({})",
                    entry.nutrient, entry.band
                )));
            }
        }

        Ok(Self {
            version: version.into(),
            child_brackets,
            entries: map,
        })
    }

    /// The dataset compiled into the binary
    pub fn bundled() -> ReferenceResult<Self> {
        Self::from_document(super::dataset::bundled_document())
    }

    pub fn from_document(document: ReferenceDocument) -> ReferenceResult<Self> {
        Self::new(document.version, document.child_brackets, document.entries)
    }

    /// Load a table from a JSON [`ReferenceDocument`]
    pub fn from_json(json: &str) -> ReferenceResult<Self> {
        let document: ReferenceDocument = serde_json::from_str(json)
            .map_err(|e| ReferenceError::InvalidTable(format!("JSON parse error: {}", e)))?;
        Self::from_document(document)
    }

    pub fn to_document(&self) -> ReferenceDocument {
        ReferenceDocument {
            version: self.version.clone(),
            child_brackets: self.child_brackets.clone(),
            entries: self.entries.values().copied().collect(),
        }
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn child_brackets(&self) -> &[AgeBracket] {
        &self.child_brackets
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Exact row for a nutrient and band
    pub fn lookup(&self, nutrient: NutrientKind, band: Band) -> Option<ReferenceEntry> {
        self.entries.get(&(nutrient, band)).copied()
    }

    /// The single bracket containing `age`
    pub fn child_bracket_for(&self, age: i32) -> Option<AgeBracket> {
        self.child_brackets.iter().copied().find(|b| b.contains(age))
    }

    pub fn min_child_age(&self) -> u8 {
        self.child_brackets.first().map(|b| b.min_age).unwrap_or(0)
    }

    pub fn max_child_age(&self) -> u8 {
        self.child_brackets.last().map(|b| b.max_age).unwrap_or(0)
    }

    /// Every band the table is expected to cover
    pub fn bands(&self) -> Vec<Band> {
        let mut bands = vec![Band::Male, Band::Female];
        bands.extend(self.child_brackets.iter().copied().map(Band::Child));
        bands
    }

    /// (nutrient, band) pairs with no row, in canonical order
    pub fn missing_entries(&self) -> Vec<(NutrientKind, Band)> {
        let bands = self.bands();
        NutrientKind::ALL
            .iter()
            .flat_map(|&nutrient| bands.iter().map(move |&band| (nutrient, band)))
            .filter(|key| !self.entries.contains_key(key))
            .collect()
    }
}

fn validate_brackets(brackets: &[AgeBracket]) -> ReferenceResult<()> {
    let first = brackets
        .first()
        .ok_or_else(|| ReferenceError::InvalidTable("no child brackets defined".to_string()))?;

    if first.min_age != 0 {
        return Err(ReferenceError::InvalidTable(format!(
            "child brackets must start at age 0, first is {}",
            first
        )));
    }

    for bracket in brackets {
        if bracket.min_age > bracket.max_age {
            return Err(ReferenceError::InvalidTable(format!(
                "bracket {}-{} is inverted",
                bracket.min_age, bracket.max_age
            )));
        }
    }

    for pair in brackets.windows(2) {
        let (prev, next) = (pair[0], pair[1]);
        if u16::from(prev.max_age) + 1 != u16::from(next.min_age) {
            let problem = if next.min_age <= prev.max_age { "overlap" } else { "leave a gap" };
            return Err(ReferenceError::InvalidTable(format!(
                "brackets {} and {} {}",
                prev, next, problem
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(nutrient: NutrientKind, band: Band, rec: f64, upper: Option<f64>) -> ReferenceEntry {
        ReferenceEntry {
            nutrient,
            band,
            recommended_amount: rec,
            upper_limit: upper,
        }
    }

    fn brackets() -> Vec<AgeBracket> {
        vec![AgeBracket::new(0, 3), AgeBracket::new(4, 18)]
    }

    #[test]
    fn test_lookup() {
        let table = ReferenceTable::new(
            "fixture",
            brackets(),
            vec![entry(NutrientKind::Iron, Band::Female, 15.0, Some(45.0))],
        )
        .unwrap();

        let found = table.lookup(NutrientKind::Iron, Band::Female).unwrap();
        assert_eq!(found.recommended_amount, 15.0);
        assert_eq!(found.upper_limit, Some(45.0));
        assert!(table.lookup(NutrientKind::Iron, Band::Male).is_none());
        assert!(table.lookup(NutrientKind::Zinc, Band::Female).is_none());
    }

    #[test]
    fn test_rejects_non_positive_recommendation() {
        let result = ReferenceTable::new(
            "fixture",
            brackets(),
            vec![entry(NutrientKind::Iron, Band::Male, 0.0, None)],
        );
        assert!(matches!(result, Err(ReferenceError::InvalidTable(_))));
    }

    #[test]
    fn test_rejects_upper_limit_not_above_recommendation() {
        let result = ReferenceTable::new(
            "fixture",
            brackets(),
            vec![entry(NutrientKind::Magnesium, Band::Male, 350.0, Some(350.0))],
        );
        assert!(matches!(result, Err(ReferenceError::InvalidTable(_))));
    }

    #[test]
    fn test_rejects_duplicates() {
        let result = ReferenceTable::new(
            "fixture",
            brackets(),
            vec![
                entry(NutrientKind::Iron, Band::Male, 10.0, None),
                entry(NutrientKind::Iron, Band::Male, 11.0, None),
            ],
        );
        assert!(matches!(result, Err(ReferenceError::InvalidTable(_))));
    }

    #[test]
    fn test_rejects_overlapping_brackets() {
        let result = ReferenceTable::new(
            "fixture",
            vec![AgeBracket::new(0, 5), AgeBracket::new(5, 18)],
            Vec::new(),
        );
        assert!(matches!(result, Err(ReferenceError::InvalidTable(_))));
    }

    #[test]
    fn test_rejects_gapped_brackets() {
        let result = ReferenceTable::new(
            "fixture",
            vec![AgeBracket::new(0, 5), AgeBracket::new(7, 18)],
            Vec::new(),
        );
        assert!(matches!(result, Err(ReferenceError::InvalidTable(_))));
    }

    #[test]
    fn test_rejects_brackets_not_starting_at_zero() {
        let result = ReferenceTable::new("fixture", vec![AgeBracket::new(1, 18)], Vec::new());
        assert!(matches!(result, Err(ReferenceError::InvalidTable(_))));
    }

    #[test]
    fn test_rejects_unknown_child_bracket() {
        let result = ReferenceTable::new(
            "fixture",
            brackets(),
            vec![entry(NutrientKind::Iron, Band::Child(AgeBracket::new(4, 8)), 8.0, None)],
        );
        assert!(matches!(result, Err(ReferenceError::InvalidTable(_))));
    }

    #[test]
    fn test_child_bracket_for() {
        let table = ReferenceTable::new("fixture", brackets(), Vec::new()).unwrap();
        assert_eq!(table.child_bracket_for(0), Some(AgeBracket::new(0, 3)));
        assert_eq!(table.child_bracket_for(4), Some(AgeBracket::new(4, 18)));
        assert_eq!(table.child_bracket_for(19), None);
        assert_eq!(table.child_bracket_for(-1), None);
        assert_eq!(table.max_child_age(), 18);
    }

    #[test]
    fn test_missing_entries_lists_uncovered_pairs() {
        let table = ReferenceTable::new(
            "fixture",
            brackets(),
            vec![entry(NutrientKind::VitaminA, Band::Male, 850.0, None)],
        )
        .unwrap();

        let missing = table.missing_entries();
        // 17 nutrients x 4 bands, minus the one row present
        assert_eq!(missing.len(), 17 * 4 - 1);
        assert_eq!(missing[0], (NutrientKind::VitaminA, Band::Female));
    }

    #[test]
    fn test_json_document_round_trip_keeps_rows() {
        let json = r#"{
            "version": "fixture-1",
            "child_brackets": [{"min_age": 0, "max_age": 18}],
            "entries": [
                {"nutrient": "vitamin_c", "band": {"kind": "female"}, "recommended_amount": 95.0, "upper_limit": 2000.0},
                {"nutrient": "vitamin_c", "band": {"kind": "child", "min_age": 0, "max_age": 18}, "recommended_amount": 45.0}
            ]
        }"#;

        let table = ReferenceTable::from_json(json).unwrap();
        assert_eq!(table.version(), "fixture-1");
        assert_eq!(table.len(), 2);

        let child = table
            .lookup(NutrientKind::VitaminC, Band::Child(AgeBracket::new(0, 18)))
            .unwrap();
        assert_eq!(child.upper_limit, None);
        assert_eq!(table.to_document().entries.len(), 2);
    }

    #[test]
    fn test_from_json_reports_parse_errors() {
        let result = ReferenceTable::from_json("{not json");
        assert!(matches!(result, Err(ReferenceError::InvalidTable(_))));
    }
}
