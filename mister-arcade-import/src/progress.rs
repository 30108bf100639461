//! Build progress reporting.

use std::path::Path;

use mister_arcade_meta::{Descriptor, GameRecord, MetaError};

use crate::context::BuildStats;
use crate::resolve::Resolution;

/// Trait for receiving build progress updates.
pub trait BuildProgress {
    /// Called when a phase starts (e.g., "Importing MAME.xml").
    fn on_phase(&self, message: &str);

    /// Called for each record read from the metadata export.
    fn on_game(&self, current: u64, game: &GameRecord);

    /// Called when a descriptor folder pass starts.
    fn on_folder(&self, folder: &Path);

    /// Called after a descriptor has been merged into the table.
    fn on_resolved(&self, descriptor: &Descriptor, resolution: &Resolution);

    /// Called when a descriptor file could not be read.
    fn on_error(&self, path: &Path, error: &MetaError);

    /// Called when the build is complete.
    fn on_complete(&self, stats: &BuildStats);
}

/// A no-op progress reporter that discards all updates.
pub struct SilentProgress;

impl BuildProgress for SilentProgress {
    fn on_phase(&self, _: &str) {}
    fn on_game(&self, _: u64, _: &GameRecord) {}
    fn on_folder(&self, _: &Path) {}
    fn on_resolved(&self, _: &Descriptor, _: &Resolution) {}
    fn on_error(&self, _: &Path, _: &MetaError) {}
    fn on_complete(&self, _: &BuildStats) {}
}

/// A progress reporter that logs to the `log` crate.
pub struct LogProgress;

impl BuildProgress for LogProgress {
    fn on_phase(&self, message: &str) {
        log::info!("{}", message);
    }

    fn on_game(&self, current: u64, game: &GameRecord) {
        log::debug!("  {} {}", game.setname, game.description);
        if current.is_multiple_of(1000) {
            log::info!("  [{}] {}", current, game.setname);
        }
    }

    fn on_folder(&self, folder: &Path) {
        log::info!("Scanning {}", folder.display());
    }

    fn on_resolved(&self, descriptor: &Descriptor, resolution: &Resolution) {
        match resolution {
            Resolution::Skipped { existing } => log::info!(
                "  Skipping duplicate {} ({}); already have {}",
                descriptor.setname,
                descriptor.description,
                existing
            ),
            Resolution::Updated { path, is_default } => log::debug!(
                "  Updated {} -> {} (default: {})",
                descriptor.setname,
                path,
                is_default
            ),
            Resolution::Inserted { path, is_default } => log::debug!(
                "  Inserted {} -> {} (default: {})",
                descriptor.setname,
                path,
                is_default
            ),
        }
    }

    fn on_error(&self, path: &Path, error: &MetaError) {
        log::warn!("Error reading {}: {}", path.display(), error);
    }

    fn on_complete(&self, stats: &BuildStats) {
        log::info!("{}", stats.summary());
    }
}
