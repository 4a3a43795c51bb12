//! CLI command implementations

use anyhow::Result;
use std::fs;

use crate::cli::{info, success, warn};
use crate::config;
use crate::db::{migrations, Database};

/// Initialize a new stackpad.toml configuration file
pub async fn init() -> Result<()> {
    let config_path = std::path::Path::new("stackpad.toml");

    if config_path.exists() {
        warn("stackpad.toml already exists");
        return Ok(());
    }

    let content = config::loader::default_config_content();
    fs::write(config_path, content)?;

    success("Created stackpad.toml");
    info("Edit the configuration file and run 'stackpad migrate' to create the database schema");

    Ok(())
}

/// Create the database schema
pub async fn migrate() -> Result<()> {
    let config = config::load_config()?;

    info(&format!("Connecting to {}", config.database.url));
    let db = Database::connect(&config.database.url).await?;
    migrations::run(&db).await?;

    success("Database schema is up to date");
    Ok(())
}

/// Run the HTTP server
pub async fn serve(host: Option<String>, port: Option<u16>) -> Result<()> {
    let config = config::load_config()?;

    let host = host.unwrap_or_else(|| config.server.host.clone());
    let port = port.unwrap_or(config.server.port);

    crate::api::run_server(config, &host, port).await?;
    Ok(())
}
