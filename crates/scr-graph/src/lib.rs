//! # scr-graph: Service Component Dependency Inspector
//!
//! scr-graph snapshots the components of a Declarative Services runtime,
//! builds the directed graph of which component depends on which, enumerates
//! every dependency cycle, and renders graphs as deterministic Graphviz DOT.
//!
//! ## Design Philosophy
//!
//! - **Read-only** - The runtime is only ever queried, never changed
//! - **Fresh per query** - Each call takes a new snapshot; nothing is cached
//! - **Deterministic output** - Equal graphs render to identical bytes
//! - **Library first** - The `scr-graph` binary is a thin shell over this crate
//!
//! ## Quick Start
//!
//! ```no_run
//! use scr_graph::{ScrGraph, SnapshotDirectory, select_cycles};
//! use std::path::Path;
//!
//! let directory = SnapshotDirectory::load(Path::new("runtime.json"))?;
//! let inspector = ScrGraph::new(directory);
//!
//! // Full dependency graph as DOT
//! let graph = inspector.build_graph(false)?;
//! inspector.export(&graph, &mut std::io::stdout())?;
//!
//! // Every cycle, listed one per line
//! let cycles = inspector.find_cycles(false)?;
//! print!("{}", select_cycles(&cycles, 0)?.render_plain(false));
//! # Ok::<(), scr_graph::Error>(())
//! ```

pub mod config;
pub mod directory;
mod error;
mod graph;
mod render;
mod selection;
mod types;

pub use config::{CONFIG_FILE_NAME, ScrGraphConfig};
#[cfg(any(test, feature = "test-util"))]
pub use directory::MockDirectory;
pub use directory::{ComponentDirectory, ComponentRecord, RuntimeSnapshot, SnapshotDirectory};
pub use error::{Error, Result};
pub use graph::{DependencyGraph, all_cycles_to_graph, build_graph, cycle_to_graph, find_cycles};
pub use render::{
    CHAIN_SEPARATOR, GRAPH_ID, export, render_cycle_line, render_cycles_plain, to_dot,
};
pub use selection::{CycleSelection, select_cycles};
pub use types::{
    COMPONENT_NAME_PROPERTY, Component, ComponentConfiguration, ComponentDescription,
    ComponentKey, ComponentState, ConfigurationId, Cycle, ForeignReference,
    OBJECT_CLASS_PROPERTY, RegisteredComponent, SatisfiedReference, ServiceId, ServiceReference,
    UNKNOWN_CLASS_NAME,
};

use std::io;

use tracing::debug;

/// Dependency graph queries over one component directory.
///
/// Every query reads the directory afresh, so results reflect the runtime at
/// the time of the call.
#[derive(Debug, Clone)]
pub struct ScrGraph<D> {
    directory: D,
}

impl<D: ComponentDirectory> ScrGraph<D> {
    /// Create an inspector over `directory`.
    #[must_use]
    pub fn new(directory: D) -> Self {
        Self { directory }
    }

    /// The directory being inspected.
    #[must_use]
    pub fn directory(&self) -> &D {
        &self.directory
    }

    /// Build the dependency graph of the satisfied and active components.
    ///
    /// With `include_foreign_references`, bound services that no known
    /// component declares become foreign vertices instead of being skipped.
    ///
    /// # Errors
    ///
    /// Propagates directory failures.
    pub fn build_graph(&self, include_foreign_references: bool) -> Result<DependencyGraph> {
        build_graph(&self.directory, include_foreign_references)
    }

    /// Every elementary dependency cycle.
    ///
    /// # Errors
    ///
    /// Propagates directory failures.
    pub fn find_cycles(&self, include_foreign_references: bool) -> Result<Vec<Cycle>> {
        let graph = self.build_graph(include_foreign_references)?;
        Ok(find_cycles(&graph))
    }

    /// The graph of a single cycle.
    #[must_use]
    pub fn cycle_to_graph(&self, cycle: &Cycle) -> DependencyGraph {
        cycle_to_graph(cycle)
    }

    /// The union of the graphs of every cycle.
    ///
    /// # Errors
    ///
    /// Propagates directory failures.
    pub fn all_cycles_to_graph(&self, include_foreign_references: bool) -> Result<DependencyGraph> {
        let cycles = self.find_cycles(include_foreign_references)?;
        debug!(cycle_count = cycles.len(), "Merging cycle subgraphs");
        Ok(all_cycles_to_graph(&cycles))
    }

    /// Write `graph` as DOT to `writer`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Export`] if the writer fails.
    pub fn export<W: io::Write + ?Sized>(&self, graph: &DependencyGraph, writer: &mut W) -> Result<()> {
        export(graph, writer)
    }
}
