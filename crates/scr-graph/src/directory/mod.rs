//! Component directory abstraction.
//!
//! The directory is the only window onto the component runtime. It supports
//! multiple implementations:
//!
//! - **Snapshot**: a runtime state captured to a JSON or YAML file, or built in memory
//! - **Mock**: scripted responses and injected failures for tests
//!
//! # Consistency
//!
//! Implementations report the runtime state at the time of each call. The
//! graph builder calls [`ComponentDirectory::list_configurations`] once while
//! collecting vertices and again while collecting edges, so a live runtime may
//! change in between. That window is accepted; see [`crate::build_graph`].
//!
//! # Test Utilities
//!
//! [`MockDirectory`] is available under `cfg(test)` or with the `test-util`
//! feature:
//!
//! ```toml
//! [dev-dependencies]
//! scr-graph = { version = "...", features = ["test-util"] }
//! ```

use crate::error::Result;
use crate::types::{ComponentConfiguration, ComponentDescription};

mod snapshot;

pub use snapshot::{ComponentRecord, RuntimeSnapshot, SnapshotDirectory};

#[cfg(any(test, feature = "test-util"))]
mod mock;

#[cfg(any(test, feature = "test-util"))]
pub use mock::MockDirectory;

/// Read access to the components of a runtime.
///
/// Implementations must be `Send + Sync`: several graph queries may run at
/// once and each one queries the directory independently.
///
/// # Errors
///
/// Both methods return [`crate::Error::Directory`] when the runtime cannot be
/// queried. Callers get the error unchanged; nothing is retried.
pub trait ComponentDirectory: Send + Sync {
    /// All declared component descriptions.
    fn list_descriptions(&self) -> Result<Vec<ComponentDescription>>;

    /// Current configuration instances of one description (zero or more).
    fn list_configurations(
        &self,
        description: &ComponentDescription,
    ) -> Result<Vec<ComponentConfiguration>>;
}

impl<D: ComponentDirectory + ?Sized> ComponentDirectory for &D {
    fn list_descriptions(&self) -> Result<Vec<ComponentDescription>> {
        (**self).list_descriptions()
    }

    fn list_configurations(
        &self,
        description: &ComponentDescription,
    ) -> Result<Vec<ComponentConfiguration>> {
        (**self).list_configurations(description)
    }
}

impl<D: ComponentDirectory + ?Sized> ComponentDirectory for Box<D> {
    fn list_descriptions(&self) -> Result<Vec<ComponentDescription>> {
        (**self).list_descriptions()
    }

    fn list_configurations(
        &self,
        description: &ComponentDescription,
    ) -> Result<Vec<ComponentConfiguration>> {
        (**self).list_configurations(description)
    }
}
