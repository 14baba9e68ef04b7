//! VitaTrack MCP Server Implementation
//!
//! Implements the MCP server with all VitaTrack tools.

use std::path::PathBuf;
use std::sync::Arc;

use chrono::{Local, NaiveDate};
use rmcp::handler::server::router::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{
    CallToolResult, Content, Implementation, ProtocolVersion, ServerCapabilities, ServerInfo,
};
use rmcp::{schemars, tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::db::Database;
use crate::models::Person;
use crate::reference::RecommendationResolver;
use crate::tools::analysis::{self, DEFAULT_TREND_WINDOW_DAYS};
use crate::tools::intake;
use crate::tools::profile;
use crate::tools::status::StatusTracker;
use crate::tools::supplements;
use crate::tools::{parse_date, parse_nutrient, NutrientAmountInput};

/// VitaTrack MCP Service
#[derive(Clone)]
pub struct VitaTrackService {
    status_tracker: Arc<Mutex<StatusTracker>>,
    database: Database,
    resolver: RecommendationResolver,
    tool_router: ToolRouter<VitaTrackService>,
}

impl VitaTrackService {
    pub fn new(database_path: PathBuf, database: Database, resolver: RecommendationResolver) -> Self {
        let reference_version = resolver.table().version().to_string();
        Self {
            status_tracker: Arc::new(Mutex::new(StatusTracker::new(database_path, reference_version))),
            database,
            resolver,
            tool_router: Self::tool_router(),
        }
    }
}

fn to_json<T: Serialize>(value: &T) -> Result<CallToolResult, McpError> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| McpError::internal_error(e.to_string(), None))?;
    Ok(CallToolResult::success(vec![Content::text(json)]))
}

/// Date parameter, or today's local date when absent
fn date_or_today(date: Option<&str>) -> Result<NaiveDate, String> {
    match date {
        Some(date) => parse_date(date),
        None => Ok(Local::now().date_naive()),
    }
}

// ============================================================================
// Shared Parameter Structs
// ============================================================================

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct NutrientAmountParam {
    /// Nutrient key from list_nutrients (e.g., "vitamin_d", "magnesium")
    pub nutrient: String,
    /// Amount per serving
    pub amount: f64,
    /// Unit: mg, mcg, g or iu (defaults to the nutrient's own unit)
    pub unit: Option<String>,
}

impl From<NutrientAmountParam> for NutrientAmountInput {
    fn from(p: NutrientAmountParam) -> Self {
        Self {
            nutrient: p.nutrient,
            amount: p.amount,
            unit: p.unit,
        }
    }
}

// ============================================================================
// Supplement Parameter Structs
// ============================================================================

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct AddSupplementParams {
    /// Product name (e.g., "Vitamin D3 2000")
    pub name: String,
    pub brand: Option<String>,
    /// Serving as printed on the label (e.g., "1 capsule")
    pub serving_description: Option<String>,
    pub notes: Option<String>,
    /// Nutrient amounts per serving
    pub nutrients: Vec<NutrientAmountParam>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct GetSupplementParams {
    /// Supplement ID
    pub id: i64,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ListSupplementsParams {
    /// Search query for name or brand (optional)
    pub query: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct DeleteSupplementParams {
    /// Supplement ID to delete
    pub id: i64,
}

// ============================================================================
// Intake Parameter Structs
// ============================================================================

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct LogIntakeParams {
    /// Date (ISO format: YYYY-MM-DD)
    pub date: String,
    /// Supplement taken (optional if nutrients are given)
    pub supplement_id: Option<i64>,
    /// Servings of the supplement (default 1.0)
    #[serde(default = "default_servings")]
    pub servings: f64,
    /// Direct nutrient amounts (optional if supplement_id is given)
    #[serde(default)]
    pub nutrients: Vec<NutrientAmountParam>,
    pub notes: Option<String>,
}

fn default_servings() -> f64 { 1.0 }

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ListIntakeParams {
    /// Date (ISO format: YYYY-MM-DD)
    pub date: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct DeleteIntakeParams {
    /// Intake entry ID to delete
    pub id: i64,
}

// ============================================================================
// Profile Parameter Structs
// ============================================================================

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct SetProfileParams {
    /// Profile kind: male, female or child
    pub kind: String,
    /// Birth date, required for child (ISO format: YYYY-MM-DD)
    pub birth_date: Option<String>,
}

// ============================================================================
// Analysis Parameter Structs
// ============================================================================

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct GetRecommendationParams {
    /// Nutrient key from list_nutrients
    pub nutrient: String,
    /// Override the profile: male, female or child
    pub kind: Option<String>,
    /// Child age in years, used with kind = child
    pub age: Option<i32>,
    /// Date the profile age is computed for (default today)
    pub date: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct GetDailyReportParams {
    /// Date (ISO format: YYYY-MM-DD, default today)
    pub date: Option<String>,
    /// Include nutrients with no intake (default false)
    #[serde(default)]
    pub all_nutrients: bool,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct GetTrendParams {
    /// Nutrient key from list_nutrients
    pub nutrient: String,
    /// Last day of the window (ISO format: YYYY-MM-DD, default today)
    pub end_date: Option<String>,
    /// Days in the window (default 7, max 366)
    #[serde(default = "default_window_days")]
    pub window_days: u32,
}

fn default_window_days() -> u32 { DEFAULT_TREND_WINDOW_DAYS }

// ============================================================================
// Tool Implementations
// ============================================================================

#[tool_router]
impl VitaTrackService {
    // --- Status ---

    #[tool(description = "Get the current status of the VitaTrack service including build info, reference dataset version, database status, and process information")]
    async fn vitatrack_status(&self) -> Result<CallToolResult, McpError> {
        let tracker = self.status_tracker.lock().await;
        let status = tracker.get_status();
        let json = serde_json::to_string_pretty(&status)
            .map_err(|e| McpError::internal_error(format!("Serialization error: {}", e), None))?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    #[tool(description = "Get step-by-step instructions for logging supplement intake and reading reports. Call this when starting a session or when unsure how to use the tools.")]
    fn intake_instructions(&self) -> Result<CallToolResult, McpError> {
        use crate::tools::status::INTAKE_INSTRUCTIONS;
        Ok(CallToolResult::success(vec![Content::text(INTAKE_INSTRUCTIONS)]))
    }

    #[tool(description = "List every tracked nutrient with its key and unit")]
    fn list_nutrients(&self) -> Result<CallToolResult, McpError> {
        to_json(&analysis::list_nutrients())
    }

    // --- Supplements ---

    #[tool(description = "Add a supplement product with its nutrient amounts per serving. Units: mg, mcg, g or iu (vitamins A, D, E).")]
    fn add_supplement(&self, Parameters(p): Parameters<AddSupplementParams>) -> Result<CallToolResult, McpError> {
        let nutrients = p.nutrients.into_iter().map(Into::into).collect();
        let result = supplements::add_supplement(
            &self.database,
            p.name,
            p.brand,
            p.serving_description,
            p.notes,
            nutrients,
        )
        .map_err(|e| McpError::internal_error(e, None))?;
        to_json(&result)
    }

    #[tool(description = "Get a supplement by ID")]
    fn get_supplement(&self, Parameters(p): Parameters<GetSupplementParams>) -> Result<CallToolResult, McpError> {
        let result = supplements::get_supplement(&self.database, p.id)
            .map_err(|e| McpError::internal_error(e, None))?;
        match result {
            Some(supplement) => to_json(&supplement),
            None => Ok(CallToolResult::success(vec![Content::text(format!(
                r#"{{"error": "Supplement not found", "id": {}}}"#,
                p.id
            ))])),
        }
    }

    #[tool(description = "List supplements, optionally filtered by name or brand")]
    fn list_supplements(&self, Parameters(p): Parameters<ListSupplementsParams>) -> Result<CallToolResult, McpError> {
        let result = supplements::list_supplements(&self.database, p.query.as_deref())
            .map_err(|e| McpError::internal_error(e, None))?;
        to_json(&result)
    }

    #[tool(description = "Delete a supplement. Intake already logged from it keeps its recorded amounts.")]
    fn delete_supplement(&self, Parameters(p): Parameters<DeleteSupplementParams>) -> Result<CallToolResult, McpError> {
        let result = supplements::delete_supplement(&self.database, p.id)
            .map_err(|e| McpError::internal_error(e, None))?;
        to_json(&result)
    }

    // --- Intake ---

    #[tool(description = "Log intake for a date: a supplement times servings, direct nutrient amounts, or both")]
    fn log_intake(&self, Parameters(p): Parameters<LogIntakeParams>) -> Result<CallToolResult, McpError> {
        let nutrients = p.nutrients.into_iter().map(Into::into).collect();
        let result = intake::log_intake(
            &self.database,
            &p.date,
            p.supplement_id,
            p.servings,
            nutrients,
            p.notes,
        )
        .map_err(|e| McpError::internal_error(e, None))?;
        to_json(&result)
    }

    #[tool(description = "List all intake logged on a date with the day's nutrient totals")]
    fn list_intake(&self, Parameters(p): Parameters<ListIntakeParams>) -> Result<CallToolResult, McpError> {
        let result = intake::list_intake(&self.database, &p.date)
            .map_err(|e| McpError::internal_error(e, None))?;
        to_json(&result)
    }

    #[tool(description = "Delete a logged intake entry")]
    fn delete_intake(&self, Parameters(p): Parameters<DeleteIntakeParams>) -> Result<CallToolResult, McpError> {
        let result = intake::delete_intake(&self.database, p.id)
            .map_err(|e| McpError::internal_error(e, None))?;
        to_json(&result)
    }

    // --- Profile ---

    #[tool(description = "Set the profile intake is evaluated for: male, female, or child with a birth date")]
    fn set_profile(&self, Parameters(p): Parameters<SetProfileParams>) -> Result<CallToolResult, McpError> {
        let today = Local::now().date_naive();
        let result = profile::set_profile(&self.database, &p.kind, p.birth_date.as_deref(), today)
            .map_err(|e| McpError::internal_error(e, None))?;
        to_json(&result)
    }

    #[tool(description = "Get the current profile and the person it resolves to today")]
    fn get_profile(&self) -> Result<CallToolResult, McpError> {
        let today = Local::now().date_naive();
        let result = profile::get_profile(&self.database, today)
            .map_err(|e| McpError::internal_error(e, None))?;
        match result {
            Some(profile) => to_json(&profile),
            None => Ok(CallToolResult::success(vec![Content::text(
                r#"{"error": "No profile set"}"#,
            )])),
        }
    }

    // --- Analysis ---

    #[tool(description = "Get the recommended daily amount and upper limit of a nutrient for the profile, or for an explicit kind/age")]
    fn get_recommendation(&self, Parameters(p): Parameters<GetRecommendationParams>) -> Result<CallToolResult, McpError> {
        let nutrient = parse_nutrient(&p.nutrient).map_err(|e| McpError::internal_error(e, None))?;
        let date = date_or_today(p.date.as_deref()).map_err(|e| McpError::internal_error(e, None))?;
        let person = match p.kind.as_deref() {
            Some(kind) => Some(Person::from_parts(kind, p.age).ok_or_else(|| {
                McpError::internal_error(
                    format!("Invalid kind '{}': use male, female, or child with age", kind),
                    None,
                )
            })?),
            None => None,
        };
        let result = analysis::get_recommendation(&self.database, &self.resolver, nutrient, person, date)
            .map_err(|e| McpError::internal_error(e, None))?;
        to_json(&result)
    }

    #[tool(description = "Evaluate a day's intake: totals, reference values, insufficient/normal/excessive status, tips and a per-supplement breakdown")]
    fn get_daily_report(&self, Parameters(p): Parameters<GetDailyReportParams>) -> Result<CallToolResult, McpError> {
        let date = date_or_today(p.date.as_deref()).map_err(|e| McpError::internal_error(e, None))?;
        let result = analysis::get_daily_report(&self.database, &self.database, &self.resolver, date, p.all_nutrients)
            .map_err(|e| McpError::internal_error(e, None))?;
        to_json(&result)
    }

    #[tool(description = "Daily totals of one nutrient over a window ending at end_date, with the reference line and average")]
    fn get_trend(&self, Parameters(p): Parameters<GetTrendParams>) -> Result<CallToolResult, McpError> {
        let nutrient = parse_nutrient(&p.nutrient).map_err(|e| McpError::internal_error(e, None))?;
        let end_date = date_or_today(p.end_date.as_deref()).map_err(|e| McpError::internal_error(e, None))?;
        let result = analysis::get_trend(&self.database, &self.database, &self.resolver, nutrient, end_date, p.window_days)
            .map_err(|e| McpError::internal_error(e, None))?;
        to_json(&result)
    }
}

// ============================================================================
// Server Handler
// ============================================================================

#[tool_handler]
impl ServerHandler for VitaTrackService {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "vitatrack".into(),
                version: crate::build_info::VERSION.into(),
                title: Some("VitaTrack".into()),
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "VitaTrack - Supplement intake tracking against D-A-CH reference values. \
                 IMPORTANT: Call intake_instructions before logging. \
                 Profile: set_profile/get_profile (male, female, or child with birth date). \
                 Supplements: add/get/list/delete_supplement. \
                 Intake: log_intake/list_intake/delete_intake. \
                 Analysis: list_nutrients, get_recommendation, get_daily_report, get_trend. \
                 Status: vitatrack_status."
                    .into(),
            ),
        }
    }
}
