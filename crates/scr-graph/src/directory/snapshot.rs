//! Component directory backed by a captured runtime snapshot.
//!
//! A snapshot lists every component description with its configurations,
//! using the same camelCase keys the runtime uses for its records:
//!
//! ```json
//! {
//!   "components": [
//!     {
//!       "name": "com.example.Cache",
//!       "configurations": [
//!         {
//!           "id": 4,
//!           "state": "ACTIVE",
//!           "satisfiedReferences": [
//!             {
//!               "name": "store",
//!               "boundServices": [
//!                 { "id": 12, "properties": { "component.name": "com.example.Store" } }
//!               ]
//!             }
//!           ]
//!         }
//!       ]
//!     }
//!   ]
//! }
//! ```
//!
//! The same structure may be written as YAML.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::ComponentDirectory;
use crate::error::{Error, Result};
use crate::types::{ComponentConfiguration, ComponentDescription};

/// One component description and its configurations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentRecord {
    /// Component name
    pub name: String,
    /// Configuration instances
    #[serde(default)]
    pub configurations: Vec<ComponentConfiguration>,
}

/// A point-in-time capture of a component runtime.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RuntimeSnapshot {
    /// Component descriptions in runtime order
    #[serde(default)]
    pub components: Vec<ComponentRecord>,
}

impl RuntimeSnapshot {
    /// Create an empty snapshot.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a component description with its configurations.
    #[must_use]
    pub fn with_component(
        mut self,
        name: impl Into<String>,
        configurations: Vec<ComponentConfiguration>,
    ) -> Self {
        self.components.push(ComponentRecord {
            name: name.into(),
            configurations,
        });
        self
    }
}

/// A [`ComponentDirectory`] that answers from a [`RuntimeSnapshot`].
#[derive(Debug, Clone, Default)]
pub struct SnapshotDirectory {
    snapshot: RuntimeSnapshot,
}

impl SnapshotDirectory {
    /// Wrap an in-memory snapshot.
    #[must_use]
    pub fn new(snapshot: RuntimeSnapshot) -> Self {
        Self { snapshot }
    }

    /// Load a snapshot file.
    ///
    /// `.yaml` and `.yml` files are decoded as YAML, everything else as JSON.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Snapshot`] if the file cannot be read or decoded.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::Snapshot {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        let is_yaml = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"));

        let snapshot = if is_yaml {
            serde_yaml::from_str(&content).map_err(|e| e.to_string())
        } else {
            serde_json::from_str(&content).map_err(|e| e.to_string())
        }
        .map_err(|message| Error::Snapshot {
            path: path.to_path_buf(),
            message,
        })?;

        let directory = Self::new(snapshot);
        debug!(
            path = %path.display(),
            components = directory.snapshot.components.len(),
            "Loaded runtime snapshot"
        );
        Ok(directory)
    }

    /// The snapshot this directory answers from.
    #[must_use]
    pub fn snapshot(&self) -> &RuntimeSnapshot {
        &self.snapshot
    }
}

impl From<RuntimeSnapshot> for SnapshotDirectory {
    fn from(snapshot: RuntimeSnapshot) -> Self {
        Self::new(snapshot)
    }
}

impl ComponentDirectory for SnapshotDirectory {
    fn list_descriptions(&self) -> Result<Vec<ComponentDescription>> {
        Ok(self
            .snapshot
            .components
            .iter()
            .map(|record| ComponentDescription::new(record.name.clone()))
            .collect())
    }

    fn list_configurations(
        &self,
        description: &ComponentDescription,
    ) -> Result<Vec<ComponentConfiguration>> {
        Ok(self
            .snapshot
            .components
            .iter()
            .filter(|record| record.name == description.name)
            .flat_map(|record| record.configurations.iter().cloned())
            .collect())
    }
}
