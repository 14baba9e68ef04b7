//! Profile MCP Tools

use chrono::NaiveDate;
use serde::Serialize;

use super::parse_date;
use crate::db::Database;
use crate::models::{Person, Profile, ProfileKind};

/// Profile as shown to callers, with the person it resolves to today
#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub kind: &'static str,
    pub birth_date: Option<String>,
    pub person: Person,
    pub as_of: String,
    pub updated_at: String,
}

impl ProfileResponse {
    fn new(profile: Profile, as_of: NaiveDate) -> Self {
        let birth_date = match profile.kind {
            ProfileKind::Child { birth_date } => Some(birth_date.to_string()),
            _ => None,
        };
        Self {
            kind: profile.kind.as_str(),
            birth_date,
            person: profile.kind.person_on(as_of),
            as_of: as_of.to_string(),
            updated_at: profile.updated_at,
        }
    }
}

/// Set the profile
pub fn set_profile(
    db: &Database,
    kind: &str,
    birth_date: Option<&str>,
    today: NaiveDate,
) -> Result<ProfileResponse, String> {
    let birth_date = birth_date.map(parse_date).transpose()?;
    let kind = ProfileKind::from_parts(kind, birth_date).map_err(|e| e.to_string())?;

    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;
    let profile = Profile::set(&conn, kind).map_err(|e| format!("Failed to set profile: {}", e))?;

    tracing::info!("Profile set to {}", profile.kind.as_str());
    Ok(ProfileResponse::new(profile, today))
}

/// Get the profile, if one has been set
pub fn get_profile(db: &Database, today: NaiveDate) -> Result<Option<ProfileResponse>, String> {
    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;
    let profile = Profile::get(&conn).map_err(|e| format!("Failed to get profile: {}", e))?;
    Ok(profile.map(|p| ProfileResponse::new(p, today)))
}
