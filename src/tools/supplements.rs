//! Supplement MCP Tools
//!
//! Tools for managing supplement products.

use serde::Serialize;

use super::{NutrientAmountInput, NutrientAmountView};
use crate::db::Database;
use crate::models::{Supplement, SupplementCreate, SupplementNutrient};

/// Supplement with display-ready nutrient amounts
#[derive(Debug, Serialize)]
pub struct SupplementResponse {
    pub id: i64,
    pub name: String,
    pub brand: Option<String>,
    pub serving_description: Option<String>,
    pub notes: Option<String>,
    pub nutrients_per_serving: Vec<NutrientAmountView>,
}

impl From<Supplement> for SupplementResponse {
    fn from(supplement: Supplement) -> Self {
        Self {
            id: supplement.id,
            name: supplement.name,
            brand: supplement.brand,
            serving_description: supplement.serving_description,
            notes: supplement.notes,
            nutrients_per_serving: supplement
                .nutrients
                .iter()
                .map(|n| NutrientAmountView::new(n.nutrient, n.amount))
                .collect(),
        }
    }
}

/// Response for list_supplements
#[derive(Debug, Serialize)]
pub struct ListSupplementsResponse {
    pub supplements: Vec<SupplementResponse>,
    pub total: usize,
}

/// Response for delete_supplement
#[derive(Debug, Serialize)]
pub struct DeleteSupplementResponse {
    pub success: bool,
    pub id: i64,
    pub message: String,
}

/// Create a supplement; amounts are converted to canonical units
pub fn add_supplement(
    db: &Database,
    name: String,
    brand: Option<String>,
    serving_description: Option<String>,
    notes: Option<String>,
    nutrients: Vec<NutrientAmountInput>,
) -> Result<SupplementResponse, String> {
    let nutrients = nutrients
        .iter()
        .map(|input| {
            input
                .to_canonical()
                .map(|(nutrient, amount)| SupplementNutrient { nutrient, amount })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let data = SupplementCreate {
        name,
        brand,
        serving_description,
        notes,
        nutrients,
    };

    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;
    let supplement = Supplement::create(&conn, &data)
        .map_err(|e| format!("Failed to create supplement: {}", e))?;

    tracing::info!("Added supplement {} ({})", supplement.id, supplement.name);
    Ok(supplement.into())
}

/// Get a supplement by ID
pub fn get_supplement(db: &Database, id: i64) -> Result<Option<SupplementResponse>, String> {
    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;
    let supplement = Supplement::get_by_id(&conn, id)
        .map_err(|e| format!("Failed to get supplement: {}", e))?;
    Ok(supplement.map(SupplementResponse::from))
}

/// List supplements with an optional name/brand search
pub fn list_supplements(db: &Database, search: Option<&str>) -> Result<ListSupplementsResponse, String> {
    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;
    let supplements = Supplement::list(&conn, search)
        .map_err(|e| format!("Failed to list supplements: {}", e))?;

    let supplements: Vec<SupplementResponse> = supplements.into_iter().map(Into::into).collect();
    Ok(ListSupplementsResponse {
        total: supplements.len(),
        supplements,
    })
}

/// Delete a supplement; intake already logged from it is kept
pub fn delete_supplement(db: &Database, id: i64) -> Result<DeleteSupplementResponse, String> {
    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;
    let deleted = Supplement::delete(&conn, id)
        .map_err(|e| format!("Failed to delete supplement: {}", e))?;

    if deleted {
        tracing::info!("Deleted supplement {}", id);
    }

    Ok(DeleteSupplementResponse {
        success: deleted,
        id,
        message: if deleted {
            "Supplement deleted. Logged intake keeps its recorded amounts.".to_string()
        } else {
            "Supplement not found".to_string()
        },
    })
}
