//! Intake MCP Tools
//!
//! Tools for logging and reviewing supplement intake.

use serde::Serialize;

use super::{parse_date, NutrientAmountInput, NutrientAmountView};
use crate::analysis::daily_total;
use crate::db::Database;
use crate::models::{IntakeCreate, IntakeRecord, NutrientContribution};

/// One logged intake
#[derive(Debug, Serialize)]
pub struct IntakeEntryResponse {
    pub id: i64,
    pub date: String,
    pub supplement_id: Option<i64>,
    pub source: Option<String>,
    pub servings: f64,
    pub notes: Option<String>,
    pub nutrients: Vec<NutrientAmountView>,
}

impl From<IntakeRecord> for IntakeEntryResponse {
    fn from(record: IntakeRecord) -> Self {
        Self {
            id: record.id,
            date: record.date.to_string(),
            supplement_id: record.supplement_id,
            source: record.group_name,
            servings: record.servings,
            notes: record.notes,
            nutrients: record
                .contributions
                .iter()
                .map(|c| NutrientAmountView::new(c.nutrient, c.amount))
                .collect(),
        }
    }
}

/// Response for list_intake
#[derive(Debug, Serialize)]
pub struct ListIntakeResponse {
    pub date: String,
    pub entries: Vec<IntakeEntryResponse>,
    pub totals: Vec<NutrientAmountView>,
}

/// Response for delete_intake
#[derive(Debug, Serialize)]
pub struct DeleteIntakeResponse {
    pub success: bool,
    pub id: i64,
}

/// Log an intake from a supplement, direct amounts, or both
pub fn log_intake(
    db: &Database,
    date: &str,
    supplement_id: Option<i64>,
    servings: f64,
    nutrients: Vec<NutrientAmountInput>,
    notes: Option<String>,
) -> Result<IntakeEntryResponse, String> {
    let date = parse_date(date)?;
    let nutrients = nutrients
        .iter()
        .map(|input| {
            input
                .to_canonical()
                .map(|(nutrient, amount)| NutrientContribution { nutrient, amount })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let data = IntakeCreate {
        date,
        supplement_id,
        servings,
        nutrients,
        notes,
    };

    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;
    let record = IntakeRecord::create(&conn, &data)
        .map_err(|e| format!("Failed to log intake: {}", e))?;

    tracing::info!(
        "Logged intake {} on {} ({} nutrients)",
        record.id,
        record.date,
        record.contributions.len()
    );
    Ok(record.into())
}

/// All intake logged on a date, with day totals
pub fn list_intake(db: &Database, date: &str) -> Result<ListIntakeResponse, String> {
    let day = parse_date(date)?;

    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;
    let records = IntakeRecord::list_between(&conn, day, day)
        .map_err(|e| format!("Failed to list intake: {}", e))?;

    let events: Vec<_> = records.iter().map(IntakeRecord::to_event).collect();
    let totals = daily_total(&events, day)
        .into_iter()
        .map(|(nutrient, amount)| NutrientAmountView::new(nutrient, amount))
        .collect();

    Ok(ListIntakeResponse {
        date: day.to_string(),
        entries: records.into_iter().map(Into::into).collect(),
        totals,
    })
}

/// Delete a logged intake
pub fn delete_intake(db: &Database, id: i64) -> Result<DeleteIntakeResponse, String> {
    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;
    let success = IntakeRecord::delete(&conn, id)
        .map_err(|e| format!("Failed to delete intake: {}", e))?;

    if success {
        tracing::info!("Deleted intake {}", id);
    }
    Ok(DeleteIntakeResponse { success, id })
}
