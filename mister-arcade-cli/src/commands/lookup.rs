use std::path::{Path, PathBuf};

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use mister_arcade_db::{Variant, find_game, find_variants};

use crate::CliError;

use super::{database_path, load_config, open_existing};

/// List the playable variants of a game, selected (`*`) and default (`+`) first.
pub(crate) fn run_lookup(
    config_path: Option<&Path>,
    setname: &str,
    database: Option<PathBuf>,
) -> Result<(), CliError> {
    let config = load_config(config_path)?;
    let db_path = database_path(&config, database);
    let Some(conn) = open_existing(&db_path)? else {
        return Ok(());
    };

    let game = find_game(&conn, setname)
        .map_err(|e| CliError::database(e.to_string()))?
        .ok_or_else(|| CliError::not_found(setname))?;

    log::info!(
        "{} {}",
        game.description.if_supports_color(Stdout, |t| t.bold()),
        format!("[{}]", game.name).if_supports_color(Stdout, |t| t.dimmed()),
    );
    if game.year > 0 {
        log::info!("  Year: {}", game.year);
    }
    crate::log_blank();

    let variants =
        find_variants(&conn, setname).map_err(|e| CliError::database(e.to_string()))?;
    if variants.is_empty() {
        log::info!("  No playable variants found.");
        return Ok(());
    }
    for variant in &variants {
        print_variant(variant);
    }
    Ok(())
}

fn print_variant(variant: &Variant) {
    let marker = if variant.selected {
        "*"
    } else if variant.game.is_default {
        "+"
    } else {
        " "
    };
    let path = variant.game.path.as_deref().unwrap_or_default();
    log::info!(
        "  {} {:<12} {}",
        marker.if_supports_color(Stdout, |t| t.green()),
        variant.game.setname,
        variant.game.description,
    );
    log::info!(
        "    {}",
        path.if_supports_color(Stdout, |t| t.cyan())
    );
}
