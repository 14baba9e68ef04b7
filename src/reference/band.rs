//! Demographic bands
//!
//! Reference rows are keyed by sex for adults and by age bracket for children.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Inclusive child age range in whole years
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AgeBracket {
    pub min_age: u8,
    pub max_age: u8,
}

impl AgeBracket {
    pub const fn new(min_age: u8, max_age: u8) -> Self {
        Self { min_age, max_age }
    }

    pub fn contains(&self, age: i32) -> bool {
        age >= i32::from(self.min_age) && age <= i32::from(self.max_age)
    }
}

impl fmt::Display for AgeBracket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.min_age == self.max_age {
            write!(f, "{}", self.min_age)
        } else {
            write!(f, "{}-{}", self.min_age, self.max_age)
        }
    }
}

/// Child brackets of the bundled dataset, youngest first
pub const CHILD_BRACKETS: [AgeBracket; 7] = [
    AgeBracket::new(0, 0),
    AgeBracket::new(1, 3),
    AgeBracket::new(4, 6),
    AgeBracket::new(7, 9),
    AgeBracket::new(10, 12),
    AgeBracket::new(13, 14),
    AgeBracket::new(15, 18),
];

/// Key a reference row applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Band {
    Male,
    Female,
    Child(AgeBracket),
}

impl fmt::Display for Band {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Band::Male => write!(f, "male"),
            Band::Female => write!(f, "female"),
            Band::Child(bracket) => write!(f, "child {}", bracket),
        }
    }
}
