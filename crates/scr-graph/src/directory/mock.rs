//! Scripted component directory for tests.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use super::ComponentDirectory;
use crate::error::{Error, Result};
use crate::types::{ComponentConfiguration, ComponentDescription};

/// A [`ComponentDirectory`] with scripted answers.
///
/// Each component holds one or more *revisions* of its configurations. The
/// first `list_configurations` call for a component returns the first
/// revision, the second call the second revision and so on; the last revision
/// repeats. This lets tests model a runtime that changes between the graph
/// builder's vertex and edge passes.
///
/// # Example
///
/// ```rust,ignore
/// use scr_graph::directory::MockDirectory;
///
/// let directory = MockDirectory::new()
///     .component("A", vec![])
///     .unavailable("runtime stopped");
/// ```
#[derive(Debug, Default)]
pub struct MockDirectory {
    components: Vec<(String, Vec<Vec<ComponentConfiguration>>)>,
    unavailable: Option<String>,
    failing_components: Vec<String>,
    reads: Mutex<HashMap<String, usize>>,
}

impl MockDirectory {
    /// Create an empty directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a component whose configurations never change.
    #[must_use]
    pub fn component(
        self,
        name: impl Into<String>,
        configurations: Vec<ComponentConfiguration>,
    ) -> Self {
        self.component_revisions(name, vec![configurations])
    }

    /// Add a component whose configurations change on every read.
    #[must_use]
    pub fn component_revisions(
        mut self,
        name: impl Into<String>,
        revisions: Vec<Vec<ComponentConfiguration>>,
    ) -> Self {
        self.components.push((name.into(), revisions));
        self
    }

    /// Make every query fail with [`Error::Directory`].
    #[must_use]
    pub fn unavailable(mut self, message: impl Into<String>) -> Self {
        self.unavailable = Some(message.into());
        self
    }

    /// Make configuration queries for one component fail.
    #[must_use]
    pub fn failing_component(mut self, name: impl Into<String>) -> Self {
        self.failing_components.push(name.into());
        self
    }

    /// How many times the configurations of `name` were read.
    #[must_use]
    pub fn reads_of(&self, name: &str) -> usize {
        self.reads
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .copied()
            .unwrap_or(0)
    }

    fn check_available(&self) -> Result<()> {
        match &self.unavailable {
            Some(message) => Err(Error::Directory(message.clone())),
            None => Ok(()),
        }
    }
}

impl ComponentDirectory for MockDirectory {
    fn list_descriptions(&self) -> Result<Vec<ComponentDescription>> {
        self.check_available()?;
        Ok(self
            .components
            .iter()
            .map(|(name, _)| ComponentDescription::new(name.clone()))
            .collect())
    }

    fn list_configurations(
        &self,
        description: &ComponentDescription,
    ) -> Result<Vec<ComponentConfiguration>> {
        self.check_available()?;
        if self.failing_components.contains(&description.name) {
            return Err(Error::Directory(format!(
                "configurations of {} unavailable",
                description.name
            )));
        }

        let read = {
            let mut reads = self.reads.lock().unwrap_or_else(PoisonError::into_inner);
            let count = reads.entry(description.name.clone()).or_insert(0);
            *count += 1;
            *count - 1
        };

        let revisions = self
            .components
            .iter()
            .find(|(name, _)| *name == description.name)
            .map(|(_, revisions)| revisions.as_slice())
            .unwrap_or_default();

        Ok(revisions
            .get(read)
            .or_else(|| revisions.last())
            .cloned()
            .unwrap_or_default())
    }
}
