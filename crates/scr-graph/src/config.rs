//! Configuration file support.
//!
//! The command line tool reads defaults from an optional YAML file, by default
//! `scr-graph.yaml` in the working directory:
//!
//! ```yaml
//! snapshot: runtime.json
//! include-foreign-references: true
//! plain: false
//! identifier-only: false
//! ```
//!
//! A relative `snapshot` path is resolved against the directory holding the
//! configuration file.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};

/// Name of the configuration file looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "scr-graph.yaml";

/// Defaults for graph queries and output.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct ScrGraphConfig {
    /// Runtime snapshot to inspect
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snapshot: Option<PathBuf>,

    /// Add vertices for bound services no known component declares
    #[serde(default)]
    pub include_foreign_references: bool,

    /// List cycles as text instead of DOT
    #[serde(default)]
    pub plain: bool,

    /// Show ids instead of labels in plain listings
    #[serde(default)]
    pub identifier_only: bool,
}

impl ScrGraphConfig {
    /// Load configuration from a file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the file cannot be read or is not a valid
    /// configuration.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("cannot read {}: {e}", path.display())))?;
        let mut config: Self = serde_yaml::from_str(&content)
            .map_err(|e| Error::Config(format!("{}: {e}", path.display())))?;

        if let (Some(snapshot), Some(base)) = (config.snapshot.as_mut(), path.parent())
            && snapshot.is_relative()
        {
            *snapshot = base.join(&*snapshot);
        }

        debug!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    /// Load the configuration in effect.
    ///
    /// An `explicit` path must exist. Otherwise [`CONFIG_FILE_NAME`] in
    /// `working_dir` is used if present, and defaults if not.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the chosen file cannot be loaded.
    pub fn discover(explicit: Option<&Path>, working_dir: &Path) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }

        let default_path = working_dir.join(CONFIG_FILE_NAME);
        if default_path.is_file() {
            Self::load(&default_path)
        } else {
            debug!(path = %default_path.display(), "No configuration file, using defaults");
            Ok(Self::default())
        }
    }
}
