//! Build the arcade game database from a metadata export and descriptor files.
//!
//! This crate owns the build pipeline: configuration, batched export import,
//! duplicate resolution across descriptor scan passes, and the run summary.

pub mod batch;
pub mod build;
pub mod config;
pub mod context;
pub mod progress;
pub mod resolve;
pub mod scan;

pub use batch::BatchWriter;
pub use build::{BuildError, build_into, import_export, import_records, run_build};
pub use config::{BuildConfig, ConfigError};
pub use context::{BuildStats, RunContext};
pub use progress::{BuildProgress, LogProgress, SilentProgress};
pub use resolve::{Resolution, update_game};
pub use scan::{descriptor_files, scan_descriptors, scan_pass, scan_subfolder, scan_tree};
