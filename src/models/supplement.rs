//! Supplement model
//!
//! A product with per-serving nutrient amounts. Amounts are held in each
//! nutrient's canonical unit.

use rusqlite::{params, Connection, Row};
use serde::{Deserialize, Serialize};

use super::NutrientKind;
use crate::db::{DbError, DbResult};

/// Per-serving amount of one nutrient
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SupplementNutrient {
    pub nutrient: NutrientKind,
    pub amount: f64,
}

/// A supplement record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Supplement {
    pub id: i64,
    pub name: String,
    pub brand: Option<String>,
    pub serving_description: Option<String>,
    pub notes: Option<String>,
    pub nutrients: Vec<SupplementNutrient>,
    pub created_at: String,
    pub updated_at: String,
}

/// Data for creating a new supplement
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SupplementCreate {
    pub name: String,
    pub brand: Option<String>,
    pub serving_description: Option<String>,
    pub notes: Option<String>,
    pub nutrients: Vec<SupplementNutrient>,
}

impl SupplementCreate {
    fn validate(&self) -> DbResult<()> {
        if self.name.trim().is_empty() {
            return Err(DbError::Validation("supplement name is required".to_string()));
        }
        if self.nutrients.is_empty() {
            return Err(DbError::Validation(
                "a supplement needs at least one nutrient amount".to_string(),
            ));
        }
        for (i, item) in self.nutrients.iter().enumerate() {
            if !item.amount.is_finite() || item.amount < 0.0 {
                return Err(DbError::Validation(format!(
                    "{} amount must be zero or more, got {}",
                    item.nutrient, item.amount
                )));
            }
            if self.nutrients[..i].iter().any(|n| n.nutrient == item.nutrient) {
                return Err(DbError::Validation(format!("{} is listed twice", item.nutrient)));
            }
        }
        Ok(())
    }
}

impl Supplement {
    /// Create from a database row (nutrients are loaded separately)
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            name: row.get("name")?,
            brand: row.get("brand")?,
            serving_description: row.get("serving_description")?,
            notes: row.get("notes")?,
            nutrients: Vec::new(),
            created_at: row.get("created_at")?,
            updated_at: row.get("updated_at")?,
        })
    }

    fn load_nutrients(conn: &Connection, supplement_id: i64) -> DbResult<Vec<SupplementNutrient>> {
        let mut stmt = conn.prepare(
            "SELECT nutrient, amount FROM supplement_nutrients WHERE supplement_id = ?1 ORDER BY id",
        )?;
        let nutrients = stmt
            .query_map([supplement_id], |row| {
                Ok(SupplementNutrient {
                    nutrient: row.get(0)?,
                    amount: row.get(1)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(nutrients)
    }

    /// Create a new supplement with its nutrient amounts
    pub fn create(conn: &Connection, data: &SupplementCreate) -> DbResult<Self> {
        data.validate()?;

        let tx = conn.unchecked_transaction()?;
        tx.execute(
            r#"
            INSERT INTO supplements (name, brand, serving_description, notes)
            VALUES (?1, ?2, ?3, ?4)
            "#,
            params![data.name.trim(), data.brand, data.serving_description, data.notes],
        )?;
        let id = tx.last_insert_rowid();

        for item in &data.nutrients {
            tx.execute(
                "INSERT INTO supplement_nutrients (supplement_id, nutrient, amount) VALUES (?1, ?2, ?3)",
                params![id, item.nutrient, item.amount],
            )?;
        }
        tx.commit()?;

        Self::get_by_id(conn, id)?.ok_or_else(|| DbError::NotFound(format!("Supplement {}", id)))
    }

    /// Get a supplement by ID
    pub fn get_by_id(conn: &Connection, id: i64) -> DbResult<Option<Self>> {
        let mut stmt = conn.prepare("SELECT * FROM supplements WHERE id = ?1")?;

        let result = stmt.query_row([id], Self::from_row);
        match result {
            Ok(mut supplement) => {
                supplement.nutrients = Self::load_nutrients(conn, id)?;
                Ok(Some(supplement))
            }
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// List supplements, optionally filtered by name or brand
    pub fn list(conn: &Connection, search: Option<&str>) -> DbResult<Vec<Self>> {
        let mut supplements = match search {
            Some(query) => {
                let pattern = format!("%{}%", query.trim());
                let mut stmt = conn.prepare(
                    "SELECT * FROM supplements WHERE name LIKE ?1 OR brand LIKE ?1 ORDER BY name",
                )?;
                let rows = stmt.query_map([pattern], Self::from_row)?;
                rows.collect::<Result<Vec<_>, _>>()?
            }
            None => {
                let mut stmt = conn.prepare("SELECT * FROM supplements ORDER BY name")?;
                let rows = stmt.query_map([], Self::from_row)?;
                rows.collect::<Result<Vec<_>, _>>()?
            }
        };

        for supplement in &mut supplements {
            supplement.nutrients = Self::load_nutrients(conn, supplement.id)?;
        }
        Ok(supplements)
    }

    /// Delete a supplement; logged intake keeps its snapshot amounts
    pub fn delete(conn: &Connection, id: i64) -> DbResult<bool> {
        let rows = conn.execute("DELETE FROM supplements WHERE id = ?1", [id])?;
        Ok(rows > 0)
    }
}
