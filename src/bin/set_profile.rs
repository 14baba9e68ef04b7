//! Utility to set the profile in the database
//!
//! Usage: `set_profile male | female | child YYYY-MM-DD`

use chrono::NaiveDate;

use vitatrack::config::Config;
use vitatrack::db::Database;
use vitatrack::models::{Profile, ProfileKind};

const USAGE: &str = "usage: set_profile male | female | child YYYY-MM-DD";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let kind = args.first().ok_or(USAGE)?;
    let birth_date = args
        .get(1)
        .map(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d"))
        .transpose()?;
    let kind = ProfileKind::from_parts(kind, birth_date)?;

    let config = Config::from_env();
    let db_path = config.database_path;
    println!("Database path: {}", db_path.display());

    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let database = Database::open(&db_path)?;

    database.with_conn(|conn| {
        let profile = Profile::set(conn, kind)?;
        let today = chrono::Local::now().date_naive();
        println!("Profile set:");
        println!("  Kind: {}", profile.kind.as_str());
        println!("  Evaluated as: {}", profile.kind.person_on(today));
        println!("  Updated: {}", profile.updated_at);
        Ok(())
    })?;

    Ok(())
}
