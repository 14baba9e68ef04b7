//! Recommendation resolver
//!
//! Maps a nutrient and a person to exactly one reference row.

use std::sync::Arc;

use super::band::Band;
use super::table::{ReferenceEntry, ReferenceTable};
use super::{ReferenceError, ReferenceResult};
use crate::models::{NutrientKind, Person};

/// Resolves reference values against an injected table
#[derive(Debug, Clone)]
pub struct RecommendationResolver {
    table: Arc<ReferenceTable>,
}

impl RecommendationResolver {
    pub fn new(table: Arc<ReferenceTable>) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &ReferenceTable {
        &self.table
    }

    /// Band a person falls into
    ///
    /// Children outside the table's bracket range are an error; ages are
    /// never clamped to the nearest bracket.
    pub fn band_for(&self, person: &Person) -> ReferenceResult<Band> {
        match *person {
            Person::AdultMale => Ok(Band::Male),
            Person::AdultFemale => Ok(Band::Female),
            Person::Child { age } => self
                .table
                .child_bracket_for(age)
                .map(Band::Child)
                .ok_or(ReferenceError::OutOfRange {
                    age,
                    min_age: self.table.min_child_age(),
                    max_age: self.table.max_child_age(),
                }),
        }
    }

    /// Effective recommendation for one nutrient
    pub fn resolve(&self, nutrient: NutrientKind, person: &Person) -> ReferenceResult<ReferenceEntry> {
        let band = self.band_for(person)?;

        match self.table.lookup(nutrient, band) {
            Some(entry) => {
                tracing::debug!(
                    "Resolved {} for {} -> {} {}",
                    nutrient.as_str(),
                    person,
                    entry.recommended_amount,
                    nutrient.unit().symbol()
                );
                Ok(entry)
            }
            None => {
                tracing::warn!(
                    "Reference table {} has no row for {} ({})",
                    self.table.version(),
                    nutrient.as_str(),
                    band
                );
                Err(ReferenceError::DataCompleteness { nutrient, band })
            }
        }
    }

    /// Resolve every nutrient in canonical order, one result each
    pub fn resolve_all(&self, person: &Person) -> Vec<(NutrientKind, ReferenceResult<ReferenceEntry>)> {
        NutrientKind::ALL
            .iter()
            .map(|&nutrient| (nutrient, self.resolve(nutrient, person)))
            .collect()
    }
}
