//! Descriptor folder scanning.
//!
//! Folders are visited in a fixed priority order: the primary arcade folder
//! (its own files only), then every configured scan folder and all of its
//! subdirectories, depth-first in name order. Each directory is one pass;
//! within a pass standard descriptors resolve in file name order, and
//! bootlegs then homebrews resolve once the standard files are done.

use std::path::{Path, PathBuf};

use mister_arcade_meta::{Descriptor, parse_descriptor_file};
use rusqlite::Connection;
use walkdir::WalkDir;

use crate::build::BuildError;
use crate::config::BuildConfig;
use crate::context::RunContext;
use crate::progress::BuildProgress;
use crate::resolve::update_game;

/// Scan the primary folder and every configured scan folder.
///
/// A missing primary folder is an error; a missing scan folder is skipped,
/// as is any directory under a scan folder that cannot be listed.
pub fn scan_descriptors(
    conn: &Connection,
    ctx: &mut RunContext,
    config: &BuildConfig,
    progress: &dyn BuildProgress,
) -> Result<(), BuildError> {
    let extension = config.extension();

    let primary = config.arcade_root();
    if !primary.is_dir() {
        return Err(BuildError::MissingFolder(primary));
    }
    scan_pass(conn, ctx, &primary, extension, progress)?;

    for folder in config.scan_folder_paths() {
        if !folder.is_dir() {
            log::warn!("Scan folder {} not found; skipping", folder.display());
            continue;
        }
        scan_tree(conn, ctx, &folder, extension, progress)?;
    }
    Ok(())
}

/// Run one pass per directory under `root`, `root` included.
pub fn scan_tree(
    conn: &Connection,
    ctx: &mut RunContext,
    root: &Path,
    extension: &str,
    progress: &dyn BuildProgress,
) -> Result<(), BuildError> {
    let walker = WalkDir::new(root).follow_links(true).sort_by_file_name();
    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                log::warn!("Skipping unreadable entry under {}: {}", root.display(), e);
                continue;
            }
        };
        if entry.file_type().is_dir() {
            scan_subfolder(conn, ctx, entry.path(), extension, progress)?;
        }
    }
    Ok(())
}

/// Like [`scan_pass`], but a directory that cannot be listed is counted as
/// an error and skipped.
pub fn scan_subfolder(
    conn: &Connection,
    ctx: &mut RunContext,
    dir: &Path,
    extension: &str,
    progress: &dyn BuildProgress,
) -> Result<(), BuildError> {
    match descriptor_files(dir, extension) {
        Ok(files) => resolve_files(conn, ctx, dir, files, progress),
        Err(e) => {
            log::warn!("Skipping folder: {}", e);
            ctx.stats.errors += 1;
            Ok(())
        }
    }
}

/// Resolve every descriptor directly inside `dir`.
///
/// Unreadable descriptors are counted and reported; the pass continues.
pub fn scan_pass(
    conn: &Connection,
    ctx: &mut RunContext,
    dir: &Path,
    extension: &str,
    progress: &dyn BuildProgress,
) -> Result<(), BuildError> {
    let files = descriptor_files(dir, extension)?;
    resolve_files(conn, ctx, dir, files, progress)
}

fn resolve_files(
    conn: &Connection,
    ctx: &mut RunContext,
    dir: &Path,
    files: Vec<PathBuf>,
    progress: &dyn BuildProgress,
) -> Result<(), BuildError> {
    progress.on_folder(dir);
    ctx.begin_pass();

    for path in files {
        match parse_descriptor_file(&path) {
            Ok(Some(descriptor)) => {
                if let Some(descriptor) = ctx.defer(descriptor) {
                    resolve(conn, ctx, &descriptor, progress)?;
                }
            }
            Ok(None) => log::debug!("No set name in {}", path.display()),
            Err(e) => {
                ctx.stats.errors += 1;
                progress.on_error(&path, &e);
            }
        }
    }

    for descriptor in ctx.take_deferred() {
        resolve(conn, ctx, &descriptor, progress)?;
    }
    Ok(())
}

fn resolve(
    conn: &Connection,
    ctx: &mut RunContext,
    descriptor: &Descriptor,
    progress: &dyn BuildProgress,
) -> Result<(), BuildError> {
    let resolution = update_game(conn, ctx, descriptor)?;
    progress.on_resolved(descriptor, &resolution);
    Ok(())
}

/// Files in `dir` (not subdirectories) with the given extension, sorted by name.
///
/// The extension is matched case-insensitively.
pub fn descriptor_files(dir: &Path, extension: &str) -> Result<Vec<PathBuf>, BuildError> {
    let read_dir = std::fs::read_dir(dir).map_err(|source| BuildError::ReadDir {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut files = Vec::new();
    for entry in read_dir {
        let entry = entry.map_err(|source| BuildError::ReadDir {
            path: dir.to_path_buf(),
            source,
        })?;
        let path = entry.path();
        let matches = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case(extension));
        if matches && path.is_file() {
            files.push(path);
        }
    }
    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}
