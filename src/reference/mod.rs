//! Nutrient reference values
//!
//! The versioned reference table and the resolver that picks one row for a
//! nutrient and a person.

mod band;
mod dataset;
mod resolver;
mod table;

use thiserror::Error;

use crate::models::NutrientKind;

pub use band::{AgeBracket, Band, CHILD_BRACKETS};
pub use dataset::BUNDLED_VERSION;
pub use resolver::RecommendationResolver;
pub use table::{ReferenceDocument, ReferenceEntry, ReferenceTable};

/// Reference resolution and table errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ReferenceError {
    /// Demographic input outside the ages the table covers
    #[error("Age {age} is outside the reference range {min_age}-{max_age}")]
    OutOfRange { age: i32, min_age: u8, max_age: u8 },

    /// A row the table should contain is missing
    #[error("No reference value for {nutrient} ({band})")]
    DataCompleteness { nutrient: NutrientKind, band: Band },

    #[error("Invalid reference table: {0}")]
    InvalidTable(String),
}

/// Result type for reference operations
pub type ReferenceResult<T> = Result<T, ReferenceError>;
