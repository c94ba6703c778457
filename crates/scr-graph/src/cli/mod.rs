//! CLI command implementations.

mod output;

pub mod cycle;
pub mod graph;

use std::path::{Path, PathBuf};

use scr_graph::{CONFIG_FILE_NAME, Error, Result, ScrGraph, ScrGraphConfig, SnapshotDirectory};

/// Effective options: the configuration file overlaid with command line flags.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Settings {
    /// Snapshot file to read
    pub snapshot: Option<PathBuf>,
    pub include_foreign_references: bool,
    pub plain: bool,
    pub identifier_only: bool,
}

impl Settings {
    /// Load the configuration in effect and apply the global flags to it.
    pub fn resolve(
        config_path: Option<&Path>,
        snapshot: Option<PathBuf>,
        working_dir: &Path,
    ) -> Result<Self> {
        let config = ScrGraphConfig::discover(config_path, working_dir)?;
        Ok(Self::from(config).with_snapshot(snapshot))
    }

    /// A `--snapshot` flag replaces the configured snapshot.
    #[must_use]
    pub fn with_snapshot(mut self, snapshot: Option<PathBuf>) -> Self {
        if snapshot.is_some() {
            self.snapshot = snapshot;
        }
        self
    }

    /// `--foreign` turns foreign references on.
    #[must_use]
    pub fn with_foreign(mut self, foreign: bool) -> Self {
        self.include_foreign_references |= foreign;
        self
    }

    #[must_use]
    pub fn with_listing(mut self, plain: bool, identifier_only: bool) -> Self {
        self.plain |= plain;
        self.identifier_only |= identifier_only;
        self
    }

    /// Open an inspector over the configured snapshot.
    pub fn open(&self) -> Result<ScrGraph<SnapshotDirectory>> {
        let path = self.snapshot.as_deref().ok_or_else(|| {
            Error::Config(format!(
                "no snapshot given; pass --snapshot or set `snapshot` in {CONFIG_FILE_NAME}"
            ))
        })?;
        Ok(ScrGraph::new(SnapshotDirectory::load(path)?))
    }
}

impl From<ScrGraphConfig> for Settings {
    fn from(config: ScrGraphConfig) -> Self {
        Self {
            snapshot: config.snapshot,
            include_foreign_references: config.include_foreign_references,
            plain: config.plain,
            identifier_only: config.identifier_only,
        }
    }
}
