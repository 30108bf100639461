//! Spinner-backed build progress.
//!
//! Log lines are printed above the spinner through `ProgressBar::suspend` so
//! the two never interleave on one line.

use std::path::Path;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use mister_arcade_import::{BuildProgress, BuildStats, LogProgress, Resolution};
use mister_arcade_meta::{Descriptor, GameRecord, MetaError};

/// Shows the current phase and item on a spinner line.
pub struct SpinnerProgress {
    pb: ProgressBar,
}

impl SpinnerProgress {
    /// When `quiet` is true the spinner is hidden.
    pub fn new(quiet: bool) -> Self {
        let pb = ProgressBar::new_spinner();
        if quiet {
            pb.set_draw_target(ProgressDrawTarget::hidden());
        }
        let style = ProgressStyle::with_template("  {spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_chars("/-\\|");
        pb.set_style(style);
        pb.enable_steady_tick(Duration::from_millis(100));
        Self { pb }
    }

    fn file_name(path: &Path) -> String {
        path.file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string())
    }
}

impl BuildProgress for SpinnerProgress {
    fn on_phase(&self, message: &str) {
        self.pb.suspend(|| LogProgress.on_phase(message));
        self.pb.set_message(message.to_string());
    }

    fn on_game(&self, current: u64, game: &GameRecord) {
        if current.is_multiple_of(250) {
            self.pb
                .set_message(format!("[{}] {}", current, game.description));
        }
    }

    fn on_folder(&self, folder: &Path) {
        self.pb.set_message(Self::file_name(folder));
    }

    fn on_resolved(&self, descriptor: &Descriptor, resolution: &Resolution) {
        if matches!(resolution, Resolution::Skipped { .. }) {
            self.pb
                .suspend(|| LogProgress.on_resolved(descriptor, resolution));
        } else {
            self.pb.set_message(Self::file_name(&descriptor.path));
        }
    }

    fn on_error(&self, path: &Path, error: &MetaError) {
        self.pb.suspend(|| LogProgress.on_error(path, error));
    }

    fn on_complete(&self, _stats: &BuildStats) {
        self.pb.disable_steady_tick();
        self.pb.finish_and_clear();
    }
}

impl Drop for SpinnerProgress {
    fn drop(&mut self) {
        if !self.pb.is_finished() {
            self.pb.finish_and_clear();
        }
    }
}
