//! Build configuration (`~/.config/mister-arcade/config.toml`).
//!
//! Every field has a default, so a partial file (or none at all) is fine:
//!
//! ```toml
//! metadata_export = "/home/me/LaunchBox/Metadata/MAME.xml"
//! database = "/home/me/LaunchBox/Metadata/arcade.db"
//! share_root = "/mnt/mister"
//! scan_folders = ["_alternatives", "_Organized/_1 A-E"]
//! ```

use std::path::{Path, PathBuf};

use mister_arcade_meta::PathMapping;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid TOML: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("Invalid config value: {0}")]
    Invalid(String),
}

/// Folders under the arcade directory scanned after it, in priority order.
const DEFAULT_SCAN_FOLDERS: [&str; 11] = [
    "_alternatives",
    "_Organized/_1 0-9",
    "_Organized/_1 A-E",
    "_Organized/_1 F-K",
    "_Organized/_1 L-Q",
    "_Organized/_1 R-T",
    "_Organized/_1 U-Z",
    "_Organized/_2 Region/_USA",
    "_Organized/_2 Region/_Japan",
    "_Organized/_2 Region/_World",
    "_Organized/_2 Region/_Europe",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    /// MAME `-listxml` output or LaunchBox `MAME.xml`.
    pub metadata_export: PathBuf,
    /// SQLite database to (re)build.
    pub database: PathBuf,
    /// Where the device's storage is reachable from this machine.
    pub share_root: PathBuf,
    /// The same storage root as seen by the device; stored paths use it.
    pub device_root: String,
    /// Primary descriptor folder under the storage root, scanned first.
    pub arcade_dir: String,
    /// Folders under `arcade_dir`, scanned recursively in this order.
    /// Either `/` or `\` may separate components.
    pub scan_folders: Vec<String>,
    pub descriptor_extension: String,
    /// Export records per insert transaction.
    pub batch_size: usize,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            metadata_export: PathBuf::from("MAME.xml"),
            database: PathBuf::from("arcade.db"),
            share_root: PathBuf::from("/mnt/mister"),
            device_root: "/media/fat".to_string(),
            arcade_dir: "_Arcade".to_string(),
            scan_folders: DEFAULT_SCAN_FOLDERS.iter().map(|s| s.to_string()).collect(),
            descriptor_extension: "mra".to_string(),
            batch_size: 20,
        }
    }
}

impl BuildConfig {
    /// Canonical config file location: `~/.config/mister-arcade/config.toml`.
    pub fn default_path() -> PathBuf {
        let config = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        config.join("mister-arcade").join("config.toml")
    }

    /// Load and validate a config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load `path` if given, else the default file if it exists, else defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = path {
            return Self::load(path);
        }
        let default_path = Self::default_path();
        if default_path.exists() {
            Self::load(&default_path)
        } else {
            log::debug!("No config file at {}; using defaults", default_path.display());
            Ok(Self::default())
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.batch_size == 0 {
            return Err(ConfigError::Invalid("batch_size must be at least 1".into()));
        }
        if self.descriptor_extension.trim_start_matches('.').is_empty() {
            return Err(ConfigError::Invalid(
                "descriptor_extension must not be empty".into(),
            ));
        }
        if self.arcade_dir.is_empty() {
            return Err(ConfigError::Invalid("arcade_dir must not be empty".into()));
        }
        Ok(())
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// The primary descriptor folder as reachable from this machine.
    pub fn arcade_root(&self) -> PathBuf {
        join_components(&self.share_root, &self.arcade_dir)
    }

    /// Absolute paths of the secondary scan folders, in priority order.
    pub fn scan_folder_paths(&self) -> Vec<PathBuf> {
        let root = self.arcade_root();
        self.scan_folders
            .iter()
            .map(|folder| join_components(&root, folder))
            .collect()
    }

    /// Extension without a leading dot.
    pub fn extension(&self) -> &str {
        self.descriptor_extension.trim_start_matches('.')
    }

    pub fn path_mapping(&self) -> PathMapping {
        let share = self.share_root.to_string_lossy();
        PathMapping::new(
            share.trim_end_matches(['/', '\\']),
            self.device_root.trim_end_matches(['/', '\\']),
        )
    }
}

/// Join a `/`- or `\`-separated relative path onto `base`.
fn join_components(base: &Path, relative: &str) -> PathBuf {
    relative
        .split(['/', '\\'])
        .filter(|part| !part.is_empty())
        .fold(base.to_path_buf(), |path, part| path.join(part))
}
