//! Full database build: export import, descriptor scan, index.

use std::path::{Path, PathBuf};

use mister_arcade_db::{
    OperationError, SchemaError, create_name_index, open_database, remove_database,
};
use mister_arcade_meta::{GameRecord, MetaError, open_export};
use rusqlite::Connection;
use thiserror::Error;

use crate::config::{BuildConfig, ConfigError};
use crate::context::{BuildStats, RunContext};
use crate::progress::BuildProgress;
use crate::scan::scan_descriptors;

#[derive(Debug, Error)]
pub enum BuildError {
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
    #[error("Database error: {0}")]
    Schema(#[from] SchemaError),
    #[error("Database error: {0}")]
    Operation(#[from] OperationError),
    #[error("Metadata error: {0}")]
    Meta(#[from] MetaError),
    #[error("Failed to read metadata export {path}: {source}")]
    Export { path: PathBuf, source: MetaError },
    #[error("Arcade folder not found: {0}")]
    MissingFolder(PathBuf),
    #[error("Failed to list {path}: {source}")]
    ReadDir {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Stream export records into the games table through the context's batch.
pub fn import_records<I>(
    conn: &Connection,
    ctx: &mut RunContext,
    records: I,
    progress: &dyn BuildProgress,
) -> Result<(), BuildError>
where
    I: IntoIterator<Item = Result<GameRecord, MetaError>>,
{
    for record in records {
        let record = record?;
        ctx.stats.games_found += 1;
        progress.on_game(ctx.stats.games_found, &record);
        ctx.batch.push(conn, record)?;
    }
    ctx.batch.flush(conn)?;
    Ok(())
}

/// Open and import a metadata export file.
pub fn import_export(
    conn: &Connection,
    ctx: &mut RunContext,
    path: &Path,
    progress: &dyn BuildProgress,
) -> Result<(), BuildError> {
    let mut records = open_export(path).map_err(|source| export_error(path, source))?;
    import_records(conn, ctx, records.by_ref(), progress).map_err(|e| match e {
        BuildError::Meta(source) => export_error(path, source),
        other => other,
    })?;

    let abandoned = records.parser().abandoned();
    if abandoned > 0 {
        log::warn!("{} unterminated record(s) in {}", abandoned, path.display());
    }
    if records.lines().had_replacements() {
        log::warn!(
            "{} contains malformed text; affected characters were replaced",
            path.display()
        );
    }
    Ok(())
}

fn export_error(path: &Path, source: MetaError) -> BuildError {
    BuildError::Export {
        path: path.to_path_buf(),
        source,
    }
}

/// Run every build step against an already open database.
pub fn build_into(
    conn: &Connection,
    config: &BuildConfig,
    progress: &dyn BuildProgress,
) -> Result<BuildStats, BuildError> {
    config.validate()?;
    let mut ctx = RunContext::new(config.path_mapping(), config.batch_size);

    progress.on_phase(&format!("Importing {}", config.metadata_export.display()));
    import_export(conn, &mut ctx, &config.metadata_export, progress)?;

    progress.on_phase(&format!(
        "Scanning descriptors under {}",
        config.arcade_root().display()
    ));
    scan_descriptors(conn, &mut ctx, config, progress)?;

    progress.on_phase("Creating name index");
    create_name_index(conn)?;

    progress.on_complete(&ctx.stats);
    Ok(ctx.stats)
}

/// Rebuild the database from scratch.
///
/// The export is checked first so that a bad export path leaves an existing
/// database untouched.
pub fn run_build(
    config: &BuildConfig,
    progress: &dyn BuildProgress,
) -> Result<BuildStats, BuildError> {
    config.validate()?;
    if !config.metadata_export.is_file() {
        return Err(export_error(
            &config.metadata_export,
            MetaError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "file not found",
            )),
        ));
    }

    if remove_database(&config.database)? {
        log::info!("Removed existing {}", config.database.display());
    }
    let conn = open_database(&config.database)?;
    build_into(&conn, config, progress)
}
