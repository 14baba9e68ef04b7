//! Profile model
//!
//! The single stored person descriptor. Children are stored with a birth
//! date so their age follows the date being analysed.

use chrono::NaiveDate;
use rusqlite::{params, Connection, Row};
use serde::{Deserialize, Serialize};

use super::person::age_in_years;
use super::Person;
use crate::db::{DbError, DbResult};

/// Stored profile kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ProfileKind {
    Male,
    Female,
    Child { birth_date: NaiveDate },
}

impl ProfileKind {
    /// Parse the `kind` string used by the profile tools
    pub fn from_parts(kind: &str, birth_date: Option<NaiveDate>) -> DbResult<Self> {
        match kind.trim().to_lowercase().as_str() {
            "male" | "adult_male" | "m" => Ok(ProfileKind::Male),
            "female" | "adult_female" | "f" => Ok(ProfileKind::Female),
            "child" => birth_date
                .map(|birth_date| ProfileKind::Child { birth_date })
                .ok_or_else(|| DbError::Validation("a child profile needs a birth date".to_string())),
            other => Err(DbError::Validation(format!(
                "unknown profile kind '{}' (expected male, female or child)",
                other
            ))),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ProfileKind::Male => "male",
            ProfileKind::Female => "female",
            ProfileKind::Child { .. } => "child",
        }
    }

    fn birth_date(&self) -> Option<NaiveDate> {
        match self {
            ProfileKind::Child { birth_date } => Some(*birth_date),
            _ => None,
        }
    }

    /// The person this profile describes on `on`
    pub fn person_on(&self, on: NaiveDate) -> Person {
        match self {
            ProfileKind::Male => Person::AdultMale,
            ProfileKind::Female => Person::AdultFemale,
            ProfileKind::Child { birth_date } => Person::Child {
                age: age_in_years(*birth_date, on),
            },
        }
    }
}

/// Profile row
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    pub kind: ProfileKind,
    pub created_at: String,
    pub updated_at: String,
}

impl Profile {
    /// Create from a database row
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        let kind: String = row.get("kind")?;
        let birth_date: Option<NaiveDate> = row.get("birth_date")?;
        let kind = ProfileKind::from_parts(&kind, birth_date).map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(
                0,
                rusqlite::types::Type::Text,
                Box::new(e),
            )
        })?;

        Ok(Self {
            kind,
            created_at: row.get("created_at")?,
            updated_at: row.get("updated_at")?,
        })
    }

    /// Get the profile (single row table)
    pub fn get(conn: &Connection) -> DbResult<Option<Self>> {
        let mut stmt = conn.prepare("SELECT * FROM profile WHERE id = 1")?;

        let result = stmt.query_row([], Self::from_row);
        match result {
            Ok(profile) => Ok(Some(profile)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Set or update the profile (upsert)
    pub fn set(conn: &Connection, kind: ProfileKind) -> DbResult<Self> {
        conn.execute(
            r#"
            INSERT INTO profile (id, kind, birth_date)
            VALUES (1, ?1, ?2)
            ON CONFLICT(id) DO UPDATE SET
                kind = excluded.kind,
                birth_date = excluded.birth_date,
                updated_at = datetime('now')
            "#,
            params![kind.as_str(), kind.birth_date()],
        )?;

        Self::get(conn)?.ok_or_else(|| DbError::NotFound("Profile".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_child_requires_birth_date() {
        assert!(matches!(
            ProfileKind::from_parts("child", None),
            Err(DbError::Validation(_))
        ));
        assert!(matches!(ProfileKind::from_parts("alien", None), Err(DbError::Validation(_))));
    }

    #[test]
    fn test_child_age_follows_analysis_date() {
        let kind = ProfileKind::from_parts("child", Some(date("2012-09-01"))).unwrap();
        assert_eq!(kind.person_on(date("2025-08-31")), Person::Child { age: 12 });
        assert_eq!(kind.person_on(date("2025-09-01")), Person::Child { age: 13 });
    }

    #[test]
    fn test_adults_ignore_birth_date() {
        let kind = ProfileKind::from_parts("Female", Some(date("1990-01-01"))).unwrap();
        assert_eq!(kind, ProfileKind::Female);
        assert_eq!(kind.person_on(date("2025-01-01")), Person::AdultFemale);
    }
}
