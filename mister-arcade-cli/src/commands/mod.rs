pub(crate) mod build;
pub(crate) mod config;
pub(crate) mod lookup;
pub(crate) mod stats;

use std::path::{Path, PathBuf};

use mister_arcade_import::BuildConfig;

use crate::CliError;

/// Load the config file (or defaults) for a command.
pub(crate) fn load_config(path: Option<&Path>) -> Result<BuildConfig, CliError> {
    BuildConfig::load_or_default(path).map_err(|e| CliError::config(e.to_string()))
}

/// Open the database for a read-only command, `None` if it doesn't exist yet.
pub(crate) fn open_existing(
    db_path: &Path,
) -> Result<Option<mister_arcade_db::Connection>, CliError> {
    if !db_path.exists() {
        log::warn!("No database found at {}", db_path.display());
        log::info!("Run 'mister-arcade build' to create one.");
        return Ok(None);
    }
    let conn = mister_arcade_db::open_database_read_only(db_path)
        .map_err(|e| CliError::database(format!("Failed to open database: {}", e)))?;
    Ok(Some(conn))
}

/// The database path from a flag, falling back to the config.
pub(crate) fn database_path(config: &BuildConfig, flag: Option<PathBuf>) -> PathBuf {
    flag.unwrap_or_else(|| config.database.clone())
}
