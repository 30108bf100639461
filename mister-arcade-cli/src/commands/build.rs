use std::path::{Path, PathBuf};

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use mister_arcade_import::{BuildStats, run_build};

use crate::CliError;
use crate::spinner::SpinnerProgress;

use super::load_config;

/// Rebuild the database from the metadata export and descriptor folders.
pub(crate) fn run_build_command(
    config_path: Option<&Path>,
    export: Option<PathBuf>,
    database: Option<PathBuf>,
    share_root: Option<PathBuf>,
    quiet: bool,
) -> Result<(), CliError> {
    let mut config = load_config(config_path)?;
    if let Some(export) = export {
        config.metadata_export = export;
    }
    if let Some(database) = database {
        config.database = database;
    }
    if let Some(share_root) = share_root {
        config.share_root = share_root;
    }

    log::info!(
        "{}",
        format!("Building {}", config.database.display()).if_supports_color(Stdout, |t| t.bold()),
    );
    log::info!("  Export:  {}", config.metadata_export.display());
    log::info!("  Arcade:  {}", config.arcade_root().display());
    log::info!("  Device:  {}", config.device_root);
    crate::log_blank();

    let progress = SpinnerProgress::new(quiet);
    let stats = run_build(&config, &progress)?;

    crate::log_blank();
    print_summary(&stats);
    Ok(())
}

fn print_summary(stats: &BuildStats) {
    log::info!("{}", "Build complete".if_supports_color(Stdout, |t| t.green()));
    log::info!("  Games found:          {:>8}", stats.games_found);
    log::info!("  Descriptors:          {:>8}", stats.descriptors_processed);
    log::info!("  Games updated:        {:>8}", stats.games_updated);
    log::info!("  Duplicates skipped:   {:>8}", stats.duplicates_skipped);
    if stats.errors > 0 {
        log::warn!(
            "  Errors:               {:>8}",
            stats.errors.if_supports_color(Stdout, |t| t.red()),
        );
    } else {
        log::info!("  Errors:               {:>8}", stats.errors);
    }
}
