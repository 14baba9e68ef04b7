//! Process configuration
//!
//! Everything is read from the environment:
//! - `VITATRACK_DATABASE_PATH`: SQLite file (default `<project>/data/vitatrack.db`)
//! - `VITATRACK_REFERENCE_PATH`: optional JSON reference dataset
//! - `RUST_LOG`: log filter, on top of the `vitatrack=info` default

use std::path::{Path, PathBuf};

use crate::reference::{ReferenceError, ReferenceTable};

/// Default tracing directive
pub const DEFAULT_LOG_DIRECTIVE: &str = "vitatrack=info";

#[derive(Debug, Clone)]
pub struct Config {
    pub database_path: PathBuf,
    pub reference_path: Option<PathBuf>,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            database_path: std::env::var("VITATRACK_DATABASE_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| default_database_path()),
            reference_path: std::env::var("VITATRACK_REFERENCE_PATH").ok().map(PathBuf::from),
        }
    }

    /// Load the reference table: the configured JSON file, or the bundled dataset
    pub fn load_reference_table(&self) -> Result<ReferenceTable, ReferenceError> {
        match &self.reference_path {
            Some(path) => load_reference_file(path),
            None => ReferenceTable::bundled(),
        }
    }
}

fn load_reference_file(path: &Path) -> Result<ReferenceTable, ReferenceError> {
    let json = std::fs::read_to_string(path).map_err(|e| {
        ReferenceError::InvalidTable(format!("cannot read {}: {}", path.display(), e))
    })?;
    ReferenceTable::from_json(&json)
}

/// `data/vitatrack.db` at the project root, found from the executable path
fn default_database_path() -> PathBuf {
    let mut path = std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(|p| p.to_path_buf()))
        .unwrap_or_else(|| PathBuf::from("."));

    // Go up from target/release or target/debug to project root
    if path.ends_with("release") || path.ends_with("debug") {
        if let Some(parent) = path.parent() {
            if let Some(grandparent) = parent.parent() {
                path = grandparent.to_path_buf();
            }
        }
    }

    path.push("data");
    path.push("vitatrack.db");
    path
}
