//! Intake log records
//!
//! Stored form of intake events. A record keeps a snapshot of the nutrient
//! amounts at log time, scaled by servings.

use std::collections::HashMap;

use chrono::NaiveDate;
use rusqlite::{params, Connection, Row};
use serde::{Deserialize, Serialize};

use super::{IntakeEvent, NutrientContribution, Supplement};
use crate::db::{DbError, DbResult};

/// A logged intake
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntakeRecord {
    pub id: i64,
    pub date: NaiveDate,
    pub supplement_id: Option<i64>,
    pub group_name: Option<String>,
    pub servings: f64,
    pub notes: Option<String>,
    pub contributions: Vec<NutrientContribution>,
    pub created_at: String,
}

/// Data for logging an intake
///
/// Either a supplement (scaled by `servings`), direct nutrient amounts, or
/// both.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntakeCreate {
    pub date: NaiveDate,
    pub supplement_id: Option<i64>,
    pub servings: f64,
    pub nutrients: Vec<NutrientContribution>,
    pub notes: Option<String>,
}

impl IntakeRecord {
    /// Create from a database row (contributions are loaded separately)
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            date: row.get("date")?,
            supplement_id: row.get("supplement_id")?,
            group_name: row.get("group_name")?,
            servings: row.get("servings")?,
            notes: row.get("notes")?,
            contributions: Vec::new(),
            created_at: row.get("created_at")?,
        })
    }

    /// View as an analysis event
    pub fn to_event(&self) -> IntakeEvent {
        IntakeEvent {
            date: self.date,
            contributions: self.contributions.clone(),
            group: self.group_name.clone(),
        }
    }

    /// Log an intake
    pub fn create(conn: &Connection, data: &IntakeCreate) -> DbResult<Self> {
        if !data.servings.is_finite() || data.servings <= 0.0 {
            return Err(DbError::Validation(format!(
                "servings must be positive, got {}",
                data.servings
            )));
        }

        let mut contributions = Vec::new();
        let mut group_name = None;

        if let Some(supplement_id) = data.supplement_id {
            let supplement = Supplement::get_by_id(conn, supplement_id)?
                .ok_or_else(|| DbError::NotFound(format!("Supplement {}", supplement_id)))?;
            contributions.extend(supplement.nutrients.iter().map(|n| NutrientContribution {
                nutrient: n.nutrient,
                amount: n.amount * data.servings,
            }));
            group_name = Some(supplement.name);
        }

        for direct in &data.nutrients {
            if !direct.amount.is_finite() || direct.amount < 0.0 {
                return Err(DbError::Validation(format!(
                    "{} amount must be zero or more, got {}",
                    direct.nutrient, direct.amount
                )));
            }
            contributions.push(*direct);
        }

        if contributions.is_empty() {
            return Err(DbError::Validation(
                "intake needs a supplement or at least one nutrient amount".to_string(),
            ));
        }

        let tx = conn.unchecked_transaction()?;
        tx.execute(
            r#"
            INSERT INTO intake_events (date, supplement_id, group_name, servings, notes)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
            params![data.date, data.supplement_id, group_name, data.servings, data.notes],
        )?;
        let id = tx.last_insert_rowid();

        for contribution in &contributions {
            tx.execute(
                "INSERT INTO intake_contributions (intake_event_id, nutrient, amount) VALUES (?1, ?2, ?3)",
                params![id, contribution.nutrient, contribution.amount],
            )?;
        }
        tx.commit()?;

        Self::get_by_id(conn, id)?.ok_or_else(|| DbError::NotFound(format!("Intake {}", id)))
    }

    /// Get an intake record by ID
    pub fn get_by_id(conn: &Connection, id: i64) -> DbResult<Option<Self>> {
        let mut stmt = conn.prepare("SELECT * FROM intake_events WHERE id = ?1")?;

        let result = stmt.query_row([id], Self::from_row);
        match result {
            Ok(mut record) => {
                let mut stmt = conn.prepare(
                    "SELECT nutrient, amount FROM intake_contributions WHERE intake_event_id = ?1 ORDER BY id",
                )?;
                record.contributions = stmt
                    .query_map([id], |row| {
                        Ok(NutrientContribution {
                            nutrient: row.get(0)?,
                            amount: row.get(1)?,
                        })
                    })?
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Some(record))
            }
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Records dated within `start..=end`, ordered by date then log order
    pub fn list_between(conn: &Connection, start: NaiveDate, end: NaiveDate) -> DbResult<Vec<Self>> {
        let mut stmt = conn.prepare(
            "SELECT * FROM intake_events WHERE date BETWEEN ?1 AND ?2 ORDER BY date, id",
        )?;
        let mut records = stmt
            .query_map(params![start, end], Self::from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        // One query for every contribution in the range
        let mut stmt = conn.prepare(
            r#"
            SELECT c.intake_event_id, c.nutrient, c.amount
            FROM intake_contributions c
            JOIN intake_events e ON e.id = c.intake_event_id
            WHERE e.date BETWEEN ?1 AND ?2
            ORDER BY c.id
            "#,
        )?;
        let mut by_event: HashMap<i64, Vec<NutrientContribution>> = HashMap::new();
        let rows = stmt.query_map(params![start, end], |row| {
            Ok((
                row.get::<_, i64>(0)?,
                NutrientContribution {
                    nutrient: row.get(1)?,
                    amount: row.get(2)?,
                },
            ))
        })?;
        for row in rows {
            let (event_id, contribution) = row?;
            by_event.entry(event_id).or_default().push(contribution);
        }

        for record in &mut records {
            record.contributions = by_event.remove(&record.id).unwrap_or_default();
        }
        Ok(records)
    }

    /// Delete an intake record and its contributions
    pub fn delete(conn: &Connection, id: i64) -> DbResult<bool> {
        let rows = conn.execute("DELETE FROM intake_events WHERE id = ?1", [id])?;
        Ok(rows > 0)
    }
}
