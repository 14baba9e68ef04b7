//! Database migrations
//!
//! Schema creation and migration logic.

use rusqlite::Connection;

use super::connection::DbResult;

/// Current schema version
const SCHEMA_VERSION: i32 = 1;

/// Run all migrations to bring the database up to the current schema version
pub fn run_migrations(conn: &Connection) -> DbResult<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS schema_migrations (
            version INTEGER PRIMARY KEY,
            applied_at TEXT NOT NULL DEFAULT (datetime('now'))
        )",
        [],
    )?;

    let current_version = get_schema_version(conn)?;

    if current_version < 1 {
        migrate_v1(conn)?;
        conn.execute("INSERT INTO schema_migrations (version) VALUES (1)", [])?;
        tracing::info!("Applied schema migration v1");
    }

    Ok(())
}

/// Highest applied schema version, 0 for a fresh database
pub fn get_schema_version(conn: &Connection) -> DbResult<i32> {
    let version = conn.query_row(
        "SELECT COALESCE(MAX(version), 0) FROM schema_migrations",
        [],
        |row| row.get(0),
    )?;
    Ok(version)
}

pub fn latest_version() -> i32 {
    SCHEMA_VERSION
}

/// Migration v1: Initial schema
fn migrate_v1(conn: &Connection) -> DbResult<()> {
    conn.execute_batch(
        r#"
        -- ============================================
        -- SUPPLEMENTS
        -- Products with per-serving nutrient content
        -- ============================================
        CREATE TABLE supplements (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            brand TEXT,                          -- nullable, for branded products
            serving_description TEXT,            -- e.g., "1 tablet", "2 gummies"
            notes TEXT,
            created_at TEXT NOT NULL DEFAULT (datetime('now')),
            updated_at TEXT NOT NULL DEFAULT (datetime('now'))
        );

        CREATE INDEX idx_supplements_name ON supplements(name);

        -- Amounts are stored in the nutrient's canonical unit (mg or µg)
        CREATE TABLE supplement_nutrients (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            supplement_id INTEGER NOT NULL REFERENCES supplements(id) ON DELETE CASCADE,
            nutrient TEXT NOT NULL,
            amount REAL NOT NULL CHECK(amount >= 0),

            UNIQUE(supplement_id, nutrient)
        );

        CREATE INDEX idx_supplement_nutrients_supplement ON supplement_nutrients(supplement_id);

        -- ============================================
        -- INTAKE EVENTS
        -- One logged consumption on a calendar day
        -- ============================================
        CREATE TABLE intake_events (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            date TEXT NOT NULL,                  -- ISO date: "2025-01-09"
            supplement_id INTEGER REFERENCES supplements(id) ON DELETE SET NULL,
            group_name TEXT,                     -- snapshot of the supplement name
            servings REAL NOT NULL DEFAULT 1.0,
            notes TEXT,
            created_at TEXT NOT NULL DEFAULT (datetime('now'))
        );

        CREATE INDEX idx_intake_events_date ON intake_events(date);

        -- Snapshot of the amounts at log time; later supplement edits do not
        -- rewrite history
        CREATE TABLE intake_contributions (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            intake_event_id INTEGER NOT NULL REFERENCES intake_events(id) ON DELETE CASCADE,
            nutrient TEXT NOT NULL,
            amount REAL NOT NULL CHECK(amount >= 0)
        );

        CREATE INDEX idx_intake_contributions_event ON intake_contributions(intake_event_id);

        -- ============================================
        -- PROFILE
        -- Single row describing who intake is evaluated for
        -- ============================================
        CREATE TABLE profile (
            id INTEGER PRIMARY KEY CHECK(id = 1),
            kind TEXT NOT NULL CHECK(kind IN ('male', 'female', 'child')),
            birth_date TEXT,                     -- required for children
            created_at TEXT NOT NULL DEFAULT (datetime('now')),
            updated_at TEXT NOT NULL DEFAULT (datetime('now'))
        );
        "#,
    )?;

    Ok(())
}
