//! Picking cycles by serial number.
//!
//! Cycles are numbered `1..=N` in the order [`crate::find_cycles`] returned
//! them. Serial `0` stands for "all cycles".

use crate::error::{Error, Result};
use crate::graph::{DependencyGraph, all_cycles_to_graph, cycle_to_graph};
use crate::render::render_cycle_line;
use crate::types::Cycle;

/// Outcome of [`select_cycles`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleSelection<'a> {
    /// The graph has no cycles at all.
    NoCycles,
    /// Every cycle was selected.
    All(&'a [Cycle]),
    /// One cycle, with the serial it was selected by.
    Single {
        /// 1-based serial number
        serial: usize,
        /// The selected cycle
        cycle: &'a Cycle,
    },
}

impl CycleSelection<'_> {
    /// The subgraph formed by the selected cycles. Empty for
    /// [`CycleSelection::NoCycles`].
    #[must_use]
    pub fn to_graph(&self) -> DependencyGraph {
        match self {
            Self::NoCycles => DependencyGraph::new(),
            Self::All(cycles) => all_cycles_to_graph(cycles),
            Self::Single { cycle, .. } => cycle_to_graph(cycle),
        }
    }

    /// Plain listing of the selected cycles. A single cycle keeps its serial.
    #[must_use]
    pub fn render_plain(&self, identifier_only: bool) -> String {
        match self {
            Self::NoCycles => String::new(),
            Self::All(cycles) => crate::render::render_cycles_plain(cycles, identifier_only),
            Self::Single { serial, cycle } => {
                let mut line = render_cycle_line(*serial, cycle, identifier_only);
                line.push('\n');
                line
            }
        }
    }
}

/// Select cycles by serial number.
///
/// # Errors
///
/// Returns [`Error::CycleOutOfRange`] when `serial` is neither `0` nor in
/// `1..=cycles.len()`. An empty `cycles` slice is never an error.
pub fn select_cycles(cycles: &[Cycle], serial: usize) -> Result<CycleSelection<'_>> {
    if cycles.is_empty() {
        return Ok(CycleSelection::NoCycles);
    }
    if serial == 0 {
        return Ok(CycleSelection::All(cycles));
    }
    cycles
        .get(serial - 1)
        .map(|cycle| CycleSelection::Single { serial, cycle })
        .ok_or(Error::CycleOutOfRange {
            requested: serial,
            available: cycles.len(),
        })
}
