//! VitaTrack
//!
//! An MCP server for supplement intake tracking.

use std::sync::Arc;

use rmcp::ServiceExt;
use tokio::io::{stdin, stdout};
use tracing_subscriber::EnvFilter;

use vitatrack::build_info;
use vitatrack::config::{Config, DEFAULT_LOG_DIRECTIVE};
use vitatrack::db::{migrations, Database};
use vitatrack::mcp::VitaTrackService;
use vitatrack::reference::RecommendationResolver;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging (output to stderr to not interfere with MCP stdio)
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(DEFAULT_LOG_DIRECTIVE.parse()?))
        .with_writer(std::io::stderr)
        .init();

    let config = Config::from_env();

    let table = config.load_reference_table()?;
    tracing::info!(
        "Loaded reference table {} ({} entries)",
        table.version(),
        table.len()
    );
    for (nutrient, band) in table.missing_entries() {
        tracing::warn!("Reference table has no entry for {} ({})", nutrient, band);
    }

    build_info::print_startup_banner(table.version());
    eprintln!("Starting MCP server on stdio...");

    let db_path = config.database_path.clone();
    eprintln!("Database path: {}", db_path.display());

    // Ensure data directory exists
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    eprintln!("Initializing database...");
    let database = Database::open(&db_path)?;
    let version = database.with_conn(migrations::get_schema_version)?;
    eprintln!("Database schema version: {}", version);

    let resolver = RecommendationResolver::new(Arc::new(table));
    let service = VitaTrackService::new(db_path, database, resolver);

    // Create stdio transport
    let transport = (stdin(), stdout());

    // Start the MCP server
    let server = service.serve(transport).await?;

    // Wait for the server to complete
    server.waiting().await?;

    Ok(())
}
