//! Dependency graph and the algorithms that run over it.
//!
//! ## Design
//!
//! - `DependencyGraph` wraps a petgraph `DiGraph` plus an identity index
//! - Graphs are built fresh per query and never mutated once returned
//! - Algorithms iterate vertices in identity order so results do not depend
//!   on the order the directory reported components in
//!
//! ## Operations
//!
//! | Operation | Algorithm |
//! |-----------|-----------|
//! | Graph construction | Two-pass directory read |
//! | Cycle enumeration | Johnson's circuit search over Tarjan SCCs |
//! | Cycle subgraph | Consecutive members joined modulo cycle length |

mod builder;
mod cycles;
mod subgraph;

pub use builder::build_graph;
pub use cycles::find_cycles;
pub use subgraph::{all_cycles_to_graph, cycle_to_graph};

use std::collections::HashMap;

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;

use crate::types::{Component, Cycle};

/// A simple directed graph of components.
///
/// Edges point from a dependent component to the component (or foreign
/// service) satisfying its dependency. Parallel edges are collapsed, and every
/// edge endpoint is a vertex of the graph.
///
/// Two graphs are equal when they have the same vertex set and the same edge
/// set, whatever order they were built in.
#[derive(Debug, Clone, Default)]
pub struct DependencyGraph {
    graph: DiGraph<Component, ()>,
    nodes: HashMap<Component, NodeIndex>,
}

impl DependencyGraph {
    /// Create an empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a graph from vertices and edges.
    ///
    /// Edge endpoints missing from `vertices` are added as vertices. When a
    /// component appears more than once, the first occurrence is kept.
    pub fn from_edges(
        vertices: impl IntoIterator<Item = Component>,
        edges: impl IntoIterator<Item = (Component, Component)>,
    ) -> Self {
        let mut graph = Self::new();
        for vertex in vertices {
            graph.add_vertex(vertex);
        }
        for (from, to) in edges {
            let from = graph.add_vertex(from);
            let to = graph.add_vertex(to);
            graph.add_edge(from, to);
        }
        graph
    }

    /// Insert a vertex, returning the index of the existing vertex with the
    /// same identity if there is one.
    pub(crate) fn add_vertex(&mut self, component: Component) -> NodeIndex {
        if let Some(&idx) = self.nodes.get(&component) {
            return idx;
        }
        let idx = self.graph.add_node(component.clone());
        self.nodes.insert(component, idx);
        idx
    }

    /// Insert an edge unless it already exists.
    pub(crate) fn add_edge(&mut self, from: NodeIndex, to: NodeIndex) {
        self.graph.update_edge(from, to, ());
    }

    pub(crate) fn index_of(&self, component: &Component) -> Option<NodeIndex> {
        self.nodes.get(component).copied()
    }

    /// Number of vertices.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Returns `true` if the graph has no vertices.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    /// Vertices in insertion order.
    pub fn vertices(&self) -> impl Iterator<Item = &Component> + '_ {
        self.graph.node_indices().map(|idx| &self.graph[idx])
    }

    /// Vertices in identity order.
    #[must_use]
    pub fn sorted_vertices(&self) -> Vec<&Component> {
        let mut vertices: Vec<&Component> = self.vertices().collect();
        vertices.sort();
        vertices
    }

    /// Edges as `(dependent, provider)` pairs in insertion order.
    pub fn edges(&self) -> impl Iterator<Item = (&Component, &Component)> + '_ {
        self.graph
            .edge_references()
            .map(|edge| (&self.graph[edge.source()], &self.graph[edge.target()]))
    }

    /// Edges in identity order of `(dependent, provider)`.
    #[must_use]
    pub fn sorted_edges(&self) -> Vec<(&Component, &Component)> {
        let mut edges: Vec<_> = self.edges().collect();
        edges.sort();
        edges
    }

    /// The stored vertex with the same identity as `component`.
    #[must_use]
    pub fn vertex(&self, component: &Component) -> Option<&Component> {
        self.index_of(component).map(|idx| &self.graph[idx])
    }

    /// Returns `true` if a vertex with the identity of `component` exists.
    #[must_use]
    pub fn contains_vertex(&self, component: &Component) -> bool {
        self.nodes.contains_key(component)
    }

    /// Returns `true` if `from` depends directly on `to`.
    #[must_use]
    pub fn contains_edge(&self, from: &Component, to: &Component) -> bool {
        match (self.index_of(from), self.index_of(to)) {
            (Some(from), Some(to)) => self.graph.contains_edge(from, to),
            _ => false,
        }
    }

    /// Direct dependencies of `component`, in identity order.
    #[must_use]
    pub fn dependencies_of(&self, component: &Component) -> Vec<&Component> {
        let Some(idx) = self.index_of(component) else {
            return Vec::new();
        };
        let mut targets: Vec<&Component> = self
            .graph
            .neighbors(idx)
            .map(|target| &self.graph[target])
            .collect();
        targets.sort();
        targets
    }

    /// Returns `true` if every edge of `cycle` is an edge of this graph.
    #[must_use]
    pub fn contains_cycle(&self, cycle: &Cycle) -> bool {
        cycle.edges().all(|(from, to)| self.contains_edge(from, to))
    }

    /// The underlying petgraph graph, for running other graph algorithms.
    #[must_use]
    pub fn as_petgraph(&self) -> &DiGraph<Component, ()> {
        &self.graph
    }
}

impl PartialEq for DependencyGraph {
    fn eq(&self, other: &Self) -> bool {
        self.vertex_count() == other.vertex_count()
            && self.edge_count() == other.edge_count()
            && self.vertices().all(|v| other.contains_vertex(v))
            && self.edges().all(|(from, to)| other.contains_edge(from, to))
    }
}

impl Eq for DependencyGraph {}
