use std::path::Path;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use mister_arcade_import::BuildConfig;

use crate::CliError;

use super::load_config;

/// Show the effective configuration and where it came from.
pub(crate) fn run_config_show(config_path: Option<&Path>) -> Result<(), CliError> {
    let path = config_path
        .map(Path::to_path_buf)
        .unwrap_or_else(BuildConfig::default_path);
    let config = load_config(config_path)?;

    log::info!(
        "{}",
        "mister-arcade Configuration".if_supports_color(Stdout, |t| t.bold()),
    );
    crate::log_blank();

    if path.exists() {
        log::info!(
            "  Config file: {} {}",
            path.display().if_supports_color(Stdout, |t| t.cyan()),
            "(exists)".if_supports_color(Stdout, |t| t.green()),
        );
    } else {
        log::info!(
            "  Config file: {} {}",
            path.display().if_supports_color(Stdout, |t| t.cyan()),
            "(not found, using defaults)".if_supports_color(Stdout, |t| t.dimmed()),
        );
    }
    crate::log_blank();

    let text = config
        .to_toml()
        .map_err(|e| CliError::config(e.to_string()))?;
    for line in text.lines() {
        log::info!("  {}", line);
    }
    Ok(())
}

/// Print the config file path.
pub(crate) fn run_config_path(config_path: Option<&Path>) {
    let path = config_path
        .map(Path::to_path_buf)
        .unwrap_or_else(BuildConfig::default_path);
    log::info!("{}", path.display());
}
