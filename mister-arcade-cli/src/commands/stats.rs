use std::path::{Path, PathBuf};

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use crate::CliError;

use super::{database_path, load_config, open_existing};

pub(crate) fn run_stats(
    config_path: Option<&Path>,
    database: Option<PathBuf>,
) -> Result<(), CliError> {
    let config = load_config(config_path)?;
    let db_path = database_path(&config, database);
    let Some(conn) = open_existing(&db_path)? else {
        return Ok(());
    };

    let stats = mister_arcade_db::store_stats(&conn)
        .map_err(|e| CliError::database(format!("Failed to query stats: {}", e)))?;

    log::info!(
        "{}",
        "Arcade Database Statistics".if_supports_color(Stdout, |t| t.bold()),
    );
    log::info!("  Database: {}", db_path.display());
    crate::log_blank();
    log::info!("  Games:          {:>8}", stats.games);
    log::info!("  With .mra:      {:>8}", stats.with_path);
    log::info!("  Defaults:       {:>8}", stats.defaults);
    log::info!("  Unique names:   {:>8}", stats.names);

    Ok(())
}
