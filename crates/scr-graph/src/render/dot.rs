//! Graphviz DOT export.
//!
//! Output layout:
//!
//! ```text
//! digraph G {
//!   n0 [ label="com.example.A [1]" ];
//!   n1 [ label="com.example.B [2]" ];
//!   n0 -> n1;
//! }
//! ```
//!
//! Vertices are numbered `n0, n1, ...` in identity order and edges are sorted
//! by `(dependent, provider)` identity, so equal graphs render identically.
//! Labels are escaped for DOT strings and written as ASCII; other characters
//! become `&#N;` entities.

use std::collections::HashMap;
use std::fmt::Write as _;
use std::io;

use crate::error::{Error, Result};
use crate::graph::DependencyGraph;
use crate::types::ComponentKey;

/// Identifier of the rendered graph.
pub const GRAPH_ID: &str = "G";

/// Render `graph` as DOT text.
#[must_use]
pub fn to_dot(graph: &DependencyGraph) -> String {
    let vertices = graph.sorted_vertices();
    let ids: HashMap<ComponentKey<'_>, usize> = vertices
        .iter()
        .enumerate()
        .map(|(id, vertex)| (vertex.key(), id))
        .collect();

    let mut edges: Vec<(usize, usize)> = graph
        .edges()
        .filter_map(|(from, to)| Some((*ids.get(&from.key())?, *ids.get(&to.key())?)))
        .collect();
    edges.sort_unstable();

    let mut out = String::new();
    let _ = writeln!(out, "digraph {GRAPH_ID} {{");
    for (id, vertex) in vertices.iter().enumerate() {
        let _ = write!(out, "  n{id} [ label=\"");
        write_escaped_label(&mut out, &vertex.label());
        let _ = writeln!(out, "\" ];");
    }
    for (from, to) in edges {
        let _ = writeln!(out, "  n{from} -> n{to};");
    }
    let _ = writeln!(out, "}}");
    out
}

/// Write `graph` as DOT text to `writer`.
///
/// # Errors
///
/// Returns [`Error::Export`] if writing or flushing fails.
pub fn export<W: io::Write + ?Sized>(graph: &DependencyGraph, writer: &mut W) -> Result<()> {
    writer
        .write_all(to_dot(graph).as_bytes())
        .and_then(|()| writer.flush())
        .map_err(Error::Export)
}

fn write_escaped_label(out: &mut String, label: &str) {
    for ch in label.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '&' => out.push_str("&amp;"),
            c if c.is_ascii() && !c.is_ascii_control() => out.push(c),
            c => {
                let _ = write!(out, "&#{};", u32::from(c));
            }
        }
    }
}
