//! Database module
//!
//! Handles SQLite connection, migrations, and the record-store side of the
//! event and profile sources.

pub mod connection;
pub mod migrations;
mod sources;
mod sql_types;

pub use connection::{Database, DbError, DbResult};
