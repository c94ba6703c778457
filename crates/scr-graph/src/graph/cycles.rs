//! Elementary circuit enumeration.
//!
//! Uses Johnson's algorithm. Vertices are numbered in identity order; for each
//! vertex `s` the search is restricted to the strongly connected component
//! containing `s` within the subgraph of vertices numbered `s` or higher, so
//! every circuit is reported exactly once, rooted at its least member.
//!
//! A vertex visited by the search stays *blocked* until a circuit is found
//! through it. A vertex that leads to no circuit records which neighbours
//! should unblock it later (the `blocked_by` sets), which keeps the search
//! from re-exploring dead ends.

use std::collections::{BTreeSet, HashMap};

use petgraph::algo::tarjan_scc;
use petgraph::graph::{DiGraph, NodeIndex};
use tracing::{debug, info};

use super::DependencyGraph;
use crate::types::Cycle;

/// Enumerate every elementary circuit of `graph`.
///
/// Self-loops are reported as one-member circuits. The result is empty for an
/// acyclic graph and is the same for equal graphs whatever order they were
/// built in. Which member a circuit starts with, and the order of circuits in
/// the result, are not part of the contract.
#[must_use]
pub fn find_cycles(graph: &DependencyGraph) -> Vec<Cycle> {
    let inner = graph.as_petgraph();

    let mut order: Vec<NodeIndex> = inner.node_indices().collect();
    order.sort_by(|a, b| inner[*a].cmp(&inner[*b]));
    let position: HashMap<NodeIndex, usize> =
        order.iter().enumerate().map(|(pos, &idx)| (idx, pos)).collect();

    let adjacency: Vec<Vec<usize>> = order
        .iter()
        .map(|&idx| {
            let mut targets: Vec<usize> = inner
                .neighbors(idx)
                .filter_map(|target| position.get(&target).copied())
                .collect();
            targets.sort_unstable();
            targets.dedup();
            targets
        })
        .collect();

    debug!(
        node_count = graph.vertex_count(),
        edge_count = graph.edge_count(),
        "Starting elementary circuit search"
    );

    let mut circuits: Vec<Vec<usize>> = Vec::new();
    for start in 0..adjacency.len() {
        let Some(members) = component_of(&adjacency, start) else {
            continue;
        };
        let mut search = CircuitSearch::new(&adjacency, members, start);
        search.circuit(start);
        circuits.append(&mut search.found);
    }

    let cycles: Vec<Cycle> = circuits
        .into_iter()
        .filter_map(|circuit| {
            Cycle::new(
                circuit
                    .into_iter()
                    .map(|pos| inner[order[pos]].clone())
                    .collect(),
            )
        })
        .collect();

    info!(cycle_count = cycles.len(), "Cycle detection complete");
    cycles
}

/// Membership mask of the strongly connected component holding `start` in the
/// subgraph induced by vertices `start..`, or `None` when that component
/// cannot hold a circuit (a single vertex without a self-loop).
fn component_of(adjacency: &[Vec<usize>], start: usize) -> Option<Vec<bool>> {
    let n = adjacency.len();
    let mut induced: DiGraph<usize, ()> = DiGraph::with_capacity(n - start, 0);
    for v in start..n {
        induced.add_node(v);
    }
    for v in start..n {
        for &w in adjacency[v].iter().filter(|&&w| w >= start) {
            induced.add_edge(NodeIndex::new(v - start), NodeIndex::new(w - start), ());
        }
    }

    let root = NodeIndex::new(0);
    let scc = tarjan_scc(&induced)
        .into_iter()
        .find(|scc| scc.contains(&root))?;

    if scc.len() == 1 && !adjacency[start].contains(&start) {
        return None;
    }

    let mut members = vec![false; n];
    for idx in scc {
        members[induced[idx]] = true;
    }
    Some(members)
}

/// Johnson's circuit search rooted at one vertex.
struct CircuitSearch<'a> {
    adjacency: &'a [Vec<usize>],
    members: Vec<bool>,
    blocked: Vec<bool>,
    blocked_by: Vec<BTreeSet<usize>>,
    stack: Vec<usize>,
    start: usize,
    found: Vec<Vec<usize>>,
}

impl<'a> CircuitSearch<'a> {
    fn new(adjacency: &'a [Vec<usize>], members: Vec<bool>, start: usize) -> Self {
        let n = adjacency.len();
        Self {
            adjacency,
            members,
            blocked: vec![false; n],
            blocked_by: vec![BTreeSet::new(); n],
            stack: Vec::new(),
            start,
            found: Vec::new(),
        }
    }

    /// Explore from `v`; returns `true` if any circuit passes through it.
    fn circuit(&mut self, v: usize) -> bool {
        let adjacency = self.adjacency;
        let mut closed = false;

        self.stack.push(v);
        self.blocked[v] = true;

        for &w in &adjacency[v] {
            if !self.members[w] {
                continue;
            }
            if w == self.start {
                self.found.push(self.stack.clone());
                closed = true;
            } else if !self.blocked[w] && self.circuit(w) {
                closed = true;
            }
        }

        if closed {
            self.unblock(v);
        } else {
            for &w in &adjacency[v] {
                if self.members[w] {
                    self.blocked_by[w].insert(v);
                }
            }
        }

        self.stack.pop();
        closed
    }

    fn unblock(&mut self, v: usize) {
        self.blocked[v] = false;
        for w in std::mem::take(&mut self.blocked_by[v]) {
            if self.blocked[w] {
                self.unblock(w);
            }
        }
    }
}
