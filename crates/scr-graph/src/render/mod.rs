//! Text renderings of graphs and cycles.
//!
//! - [`to_dot`] / [`export`]: Graphviz DOT, byte-for-byte stable for equal graphs
//! - [`render_cycles_plain`]: one numbered line per cycle, for terminals

mod dot;
mod plain;

pub use dot::{GRAPH_ID, export, to_dot};
pub use plain::{CHAIN_SEPARATOR, render_cycle_line, render_cycles_plain};
