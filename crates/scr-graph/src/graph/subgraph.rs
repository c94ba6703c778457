//! Subgraphs made of cycles only.
//!
//! A cycle subgraph is rebuilt from the cycle's member order alone: member
//! `i` points at member `(i + 1) % n`. Edges the members share in the full
//! dependency graph are not carried over.

use super::DependencyGraph;
use crate::types::Cycle;

/// The graph formed by one cycle: its members as vertices and exactly the
/// circuit edges, including the edge from the last member back to the first.
#[must_use]
pub fn cycle_to_graph(cycle: &Cycle) -> DependencyGraph {
    let mut graph = DependencyGraph::new();
    add_cycle(&mut graph, cycle);
    graph
}

/// The union of the graphs of all `cycles`.
///
/// A component present in several cycles is a single vertex, and an edge two
/// cycles share appears once.
#[must_use]
pub fn all_cycles_to_graph(cycles: &[Cycle]) -> DependencyGraph {
    let mut graph = DependencyGraph::new();
    for cycle in cycles {
        add_cycle(&mut graph, cycle);
    }
    graph
}

fn add_cycle(graph: &mut DependencyGraph, cycle: &Cycle) {
    let nodes: Vec<_> = cycle
        .components()
        .iter()
        .map(|component| graph.add_vertex(component.clone()))
        .collect();

    let n = nodes.len();
    for i in 0..n {
        graph.add_edge(nodes[i], nodes[(i + 1) % n]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::find_cycles;
    use crate::types::{Component, ComponentState};

    fn node(name: &str, id: i64) -> Component {
        Component::registered(name, id, ComponentState::Active)
    }

    fn cycle(members: &[(&str, i64)]) -> Cycle {
        Cycle::new(members.iter().map(|(name, id)| node(name, *id)).collect()).unwrap()
    }

    #[test]
    fn single_member_cycle_keeps_its_self_loop() {
        let graph = cycle_to_graph(&cycle(&[("A", 1)]));

        assert_eq!(graph.vertex_count(), 1);
        assert_eq!(graph.edge_count(), 1);
        assert!(graph.contains_edge(&node("A", 1), &node("A", 1)));
    }

    #[test]
    fn two_member_cycle_has_both_directions() {
        let graph = cycle_to_graph(&cycle(&[("A", 1), ("B", 2)]));

        assert_eq!(graph.edge_count(), 2);
        assert!(graph.contains_edge(&node("A", 1), &node("B", 2)));
        assert!(graph.contains_edge(&node("B", 2), &node("A", 1)));
    }

    #[test]
    fn rebuilt_edges_ignore_other_edges_of_the_full_graph() {
        // A -> B -> C -> A plus a chord B -> A, which is itself a two-cycle;
        // the three-cycle's subgraph must not contain the chord.
        let full = DependencyGraph::from_edges(
            [],
            [
                (node("A", 1), node("B", 2)),
                (node("B", 2), node("C", 3)),
                (node("C", 3), node("A", 1)),
                (node("B", 2), node("A", 1)),
            ],
        );
        let three = find_cycles(&full)
            .into_iter()
            .find(|c| c.len() == 3)
            .expect("three-cycle present");

        let graph = cycle_to_graph(&three);

        let expected = DependencyGraph::from_edges(
            [],
            [
                (node("A", 1), node("B", 2)),
                (node("B", 2), node("C", 3)),
                (node("C", 3), node("A", 1)),
            ],
        );
        assert_eq!(graph, expected);
        assert!(!graph.contains_edge(&node("B", 2), &node("A", 1)));
    }

    #[test]
    fn union_shares_vertices_and_edges() {
        let graph = all_cycles_to_graph(&[
            cycle(&[("A", 1), ("B", 2)]),
            cycle(&[("B", 2), ("C", 3)]),
            cycle(&[("B", 2), ("A", 1)]),
        ]);

        assert_eq!(graph.vertex_count(), 3);
        assert_eq!(graph.edge_count(), 4);
    }

    #[test]
    fn no_cycles_give_empty_graph() {
        let graph = all_cycles_to_graph(&[]);
        assert!(graph.is_empty());
        assert_eq!(graph.edge_count(), 0);
    }
}
