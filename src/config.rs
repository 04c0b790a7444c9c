//! Configuration file handling.
//!
//! Every field has a default, so an empty or partial TOML file is valid.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub normalize: NormalizeConfig,
    pub view: DumpConfig,
}

/// Settings for the batch normalizer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizeConfig {
    /// File name suffix that marks a raw episode file.
    pub input_suffix: String,
    /// Keep going after an episode fails (the failure is still reported).
    pub continue_on_error: bool,
}

impl Default for NormalizeConfig {
    fn default() -> Self {
        Self {
            input_suffix: ".hdf5".to_string(),
            continue_on_error: true,
        }
    }
}

/// Settings for the structure dumper.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DumpConfig {
    /// Maximum number of groups expanded per report.
    pub max_groups: usize,
    /// Rows rendered per dataset before truncating.
    pub max_rows: usize,
    /// Directory the reports are written to.
    pub log_dir: PathBuf,
}

impl Default for DumpConfig {
    fn default() -> Self {
        Self {
            max_groups: 100,
            max_rows: 100,
            log_dir: PathBuf::from("./log"),
        }
    }
}

impl Config {
    /// Load configuration.
    ///
    /// An explicit path must exist. Without one, the per-user config file is
    /// used when present, otherwise defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::load_from(path),
            None => match Self::config_path() {
                Some(path) if path.exists() => Self::load_from(&path),
                _ => Ok(Self::default()),
            },
        }
    }

    /// Parse the TOML file at `path`.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| Error::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        toml::from_str(&content).map_err(|e| Error::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Per-user config file location (`<config_dir>/h5ep/config.toml`).
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("h5ep").join("config.toml"))
    }

    /// Render the configuration as TOML.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::Config {
            path: PathBuf::new(),
            message: e.to_string(),
        })
    }
}
