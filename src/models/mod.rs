//! Data models
//!
//! Domain values used by the analysis code, plus the stored records behind
//! them.

mod intake;
mod intake_record;
mod nutrient;
mod person;
mod profile;
mod supplement;

pub use intake::{IntakeEvent, NutrientContribution};
pub use intake_record::{IntakeCreate, IntakeRecord};
pub use nutrient::{NutrientKind, NutrientUnit};
pub use person::{age_in_years, Person};
pub use profile::{Profile, ProfileKind};
pub use supplement::{Supplement, SupplementCreate, SupplementNutrient};
