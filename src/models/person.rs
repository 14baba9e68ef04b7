//! Person model
//!
//! Demographic descriptor used to select reference values.

use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Who the intake is being evaluated for
///
/// Ages are whole years. Negative ages are representable so that bad caller
/// input reaches the resolver and is rejected there.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Person {
    AdultMale,
    AdultFemale,
    Child { age: i32 },
}

impl Person {
    /// Parse the `kind` string used by the profile tools
    ///
    /// `age` is only consulted for children.
    pub fn from_parts(kind: &str, age: Option<i32>) -> Option<Self> {
        match kind.trim().to_lowercase().as_str() {
            "male" | "adult_male" | "man" | "m" => Some(Person::AdultMale),
            "female" | "adult_female" | "woman" | "f" => Some(Person::AdultFemale),
            "child" => age.map(|age| Person::Child { age }),
            _ => None,
        }
    }
}

impl fmt::Display for Person {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Person::AdultMale => write!(f, "adult male"),
            Person::AdultFemale => write!(f, "adult female"),
            Person::Child { age } => write!(f, "child aged {}", age),
        }
    }
}

/// Age in completed years on `on`
///
/// Returns a negative number when `on` is before the birth date.
pub fn age_in_years(birth_date: NaiveDate, on: NaiveDate) -> i32 {
    let mut age = on.year() - birth_date.year();
    if (on.month(), on.day()) < (birth_date.month(), birth_date.day()) {
        age -= 1;
    }
    age
}
