//! Dependency graph construction from a component directory.

use std::collections::HashMap;

use petgraph::graph::NodeIndex;
use tracing::{debug, trace};

use super::DependencyGraph;
use crate::directory::ComponentDirectory;
use crate::error::Result;
use crate::types::{
    Component, ComponentDescription, ConfigurationId, SatisfiedReference, ServiceReference,
};

/// A kept configuration waiting for its edges.
struct PendingEdges {
    configuration_id: ConfigurationId,
    node: NodeIndex,
}

/// Counters reported once the graph is complete.
#[derive(Default)]
struct BuildStats {
    collapsed: usize,
    resolved: usize,
    foreign: usize,
    skipped: usize,
    vanished: usize,
}

/// Build the dependency graph of the components currently in `directory`.
///
/// Only configurations in state `SATISFIED` or `ACTIVE` become vertices. Each
/// service bound to one of their satisfied references becomes an edge when the
/// service's `component.name` names another kept component. Any other bound
/// service is unresolved: it is skipped unless `include_foreign_references` is
/// set, in which case it becomes a foreign vertex keyed by its service id.
///
/// # Snapshot consistency
///
/// The directory is read in two passes. The first lists descriptions and
/// configurations to collect vertices; the second re-reads the configurations
/// of each kept component to collect its edges. A runtime that changes in
/// between can yield a vertex whose configuration is gone by the second pass:
/// the vertex stays, without outgoing edges. Edge targets only resolve against
/// vertices from the first pass.
///
/// # Errors
///
/// Returns the directory's error unchanged if either pass fails.
pub fn build_graph<D: ComponentDirectory + ?Sized>(
    directory: &D,
    include_foreign_references: bool,
) -> Result<DependencyGraph> {
    let mut graph = DependencyGraph::new();
    let mut stats = BuildStats::default();

    let (registered, pending) = collect_vertices(directory, &mut graph, &mut stats)?;

    debug!(
        vertices = graph.vertex_count(),
        descriptions = pending.len(),
        "Collected component vertices"
    );

    for (description, kept) in &pending {
        let current = directory.list_configurations(description)?;

        for entry in kept {
            let Some(configuration) = current.iter().find(|c| c.id == entry.configuration_id)
            else {
                debug!(
                    component = %description.name,
                    configuration_id = %entry.configuration_id,
                    "Configuration disappeared between passes, keeping vertex without edges"
                );
                stats.vanished += 1;
                continue;
            };

            connect_references(
                &mut graph,
                &registered,
                entry.node,
                &configuration.satisfied_references,
                include_foreign_references,
                &mut stats,
            );
        }
    }

    debug!(
        vertices = graph.vertex_count(),
        edges = graph.edge_count(),
        collapsed = stats.collapsed,
        resolved = stats.resolved,
        foreign = stats.foreign,
        skipped = stats.skipped,
        vanished = stats.vanished,
        include_foreign_references,
        "Built dependency graph"
    );

    Ok(graph)
}

type PendingByDescription = Vec<(ComponentDescription, Vec<PendingEdges>)>;

/// First pass: one vertex per kept component name.
fn collect_vertices<D: ComponentDirectory + ?Sized>(
    directory: &D,
    graph: &mut DependencyGraph,
    stats: &mut BuildStats,
) -> Result<(HashMap<String, NodeIndex>, PendingByDescription)> {
    let mut registered: HashMap<String, NodeIndex> = HashMap::new();
    let mut pending: PendingByDescription = Vec::new();

    for description in directory.list_descriptions()? {
        let mut kept = Vec::new();

        for configuration in directory.list_configurations(&description)? {
            if !configuration.state.is_graphed() {
                trace!(
                    component = %description.name,
                    configuration_id = %configuration.id,
                    state = %configuration.state,
                    "Skipping configuration that is neither satisfied nor active"
                );
                continue;
            }

            let component = Component::registered(
                description.name.clone(),
                configuration.id,
                configuration.state,
            );
            if graph.contains_vertex(&component) {
                debug!(
                    component = %description.name,
                    configuration_id = %configuration.id,
                    "Another configuration already represents this component"
                );
                stats.collapsed += 1;
            }
            let node = graph.add_vertex(component);
            registered.insert(description.name.clone(), node);
            kept.push(PendingEdges {
                configuration_id: configuration.id,
                node,
            });
        }

        if !kept.is_empty() {
            pending.push((description, kept));
        }
    }

    Ok((registered, pending))
}

/// Second pass: edges for one configuration's satisfied references.
fn connect_references(
    graph: &mut DependencyGraph,
    registered: &HashMap<String, NodeIndex>,
    from: NodeIndex,
    references: &[SatisfiedReference],
    include_foreign_references: bool,
    stats: &mut BuildStats,
) {
    for reference in references {
        for service in &reference.bound_services {
            if let Some(&to) = service.component_name().and_then(|name| registered.get(name)) {
                graph.add_edge(from, to);
                stats.resolved += 1;
            } else if include_foreign_references {
                let to = graph.add_vertex(foreign_vertex(service));
                graph.add_edge(from, to);
                stats.foreign += 1;
            } else {
                trace!(
                    reference = %reference.name,
                    service_id = %service.id,
                    component_name = service.component_name(),
                    "Skipping service not provided by a kept component"
                );
                stats.skipped += 1;
            }
        }
    }
}

fn foreign_vertex(service: &ServiceReference) -> Component {
    Component::foreign(service.id, service.class_name())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::directory::{MockDirectory, RuntimeSnapshot, SnapshotDirectory};
    use crate::error::Error;
    use crate::types::{
        COMPONENT_NAME_PROPERTY, ComponentConfiguration, ComponentState, OBJECT_CLASS_PROPERTY,
    };
    use rstest::rstest;
    use serde_json::json;

    fn service_of(id: i64, component: &str) -> ServiceReference {
        ServiceReference::new(id).with_property(COMPONENT_NAME_PROPERTY, json!(component))
    }

    fn plain_service(id: i64, class: &str) -> ServiceReference {
        ServiceReference::new(id).with_property(OBJECT_CLASS_PROPERTY, json!([class]))
    }

    fn config(id: i64, state: ComponentState, bound: Vec<ServiceReference>) -> ComponentConfiguration {
        ComponentConfiguration {
            id: ConfigurationId(id),
            state,
            satisfied_references: vec![SatisfiedReference {
                name: "dep".to_string(),
                bound_services: bound,
            }],
        }
    }

    fn active(name: &str, id: i64) -> Component {
        Component::registered(name, id, ComponentState::Active)
    }

    #[test]
    fn resolves_edges_by_component_name() {
        let snapshot = RuntimeSnapshot::new()
            .with_component("A", vec![config(1, ComponentState::Active, vec![service_of(10, "B")])])
            .with_component("B", vec![config(2, ComponentState::Satisfied, vec![])]);

        let graph = build_graph(&SnapshotDirectory::new(snapshot), false).unwrap();

        assert_eq!(graph.vertex_count(), 2);
        assert_eq!(graph.edge_count(), 1);
        assert!(graph.contains_edge(&active("A", 1), &active("B", 2)));
    }

    #[rstest]
    #[case::unsatisfied_reference(ComponentState::UnsatisfiedReference)]
    #[case::unsatisfied_configuration(ComponentState::UnsatisfiedConfiguration)]
    #[case::failed_activation(ComponentState::FailedActivation)]
    #[case::unknown(ComponentState::Unknown)]
    fn excludes_ungraphed_states(#[case] state: ComponentState) {
        let snapshot = RuntimeSnapshot::new()
            .with_component("A", vec![config(1, ComponentState::Active, vec![service_of(10, "B")])])
            .with_component("B", vec![config(2, state, vec![service_of(11, "A")])]);

        let graph = build_graph(&SnapshotDirectory::new(snapshot), false).unwrap();

        assert_eq!(graph.vertex_count(), 1);
        assert_eq!(graph.edge_count(), 0);
        assert!(!graph.contains_vertex(&active("B", 2)));
    }

    #[test]
    fn unresolved_target_with_foreign_references_becomes_foreign_vertex() {
        let snapshot = RuntimeSnapshot::new()
            .with_component("A", vec![config(1, ComponentState::Active, vec![service_of(10, "B")])])
            .with_component("B", vec![config(2, ComponentState::UnsatisfiedReference, vec![])]);
        let directory = SnapshotDirectory::new(snapshot);

        let hidden = build_graph(&directory, false).unwrap();
        assert_eq!(hidden.vertex_count(), 1);
        assert_eq!(hidden.edge_count(), 0);

        let shown = build_graph(&directory, true).unwrap();
        assert_eq!(shown.vertex_count(), 2);
        assert!(shown.contains_edge(&active("A", 1), &Component::foreign(10, "")));
    }

    #[test]
    fn foreign_vertices_carry_class_and_id() {
        let snapshot = RuntimeSnapshot::new().with_component(
            "A",
            vec![config(
                1,
                ComponentState::Active,
                vec![plain_service(40, "org.example.Log"), plain_service(40, "org.example.Log")],
            )],
        );

        let graph = build_graph(&SnapshotDirectory::new(snapshot), true).unwrap();

        assert_eq!(graph.vertex_count(), 2);
        assert_eq!(graph.edge_count(), 1);
        let foreign = graph.vertex(&Component::foreign(40, "")).unwrap();
        assert_eq!(foreign.label(), "org.example.Log [40]");
    }

    #[test]
    fn unresolved_entry_does_not_hide_later_entries() {
        let snapshot = RuntimeSnapshot::new()
            .with_component(
                "A",
                vec![config(
                    1,
                    ComponentState::Active,
                    vec![plain_service(40, "org.example.Log"), service_of(10, "B")],
                )],
            )
            .with_component("B", vec![config(2, ComponentState::Active, vec![])]);

        let graph = build_graph(&SnapshotDirectory::new(snapshot), false).unwrap();

        assert!(graph.contains_edge(&active("A", 1), &active("B", 2)));
    }

    #[test]
    fn component_without_references_is_isolated_vertex() {
        let snapshot = RuntimeSnapshot::new().with_component(
            "A",
            vec![ComponentConfiguration {
                id: ConfigurationId(1),
                state: ComponentState::Satisfied,
                satisfied_references: vec![],
            }],
        );

        let graph = build_graph(&SnapshotDirectory::new(snapshot), true).unwrap();

        assert_eq!(graph.vertex_count(), 1);
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn self_reference_is_a_self_loop() {
        let snapshot = RuntimeSnapshot::new()
            .with_component("A", vec![config(1, ComponentState::Active, vec![service_of(10, "A")])]);

        let graph = build_graph(&SnapshotDirectory::new(snapshot), false).unwrap();

        assert!(graph.contains_edge(&active("A", 1), &active("A", 1)));
    }

    #[test]
    fn configurations_of_one_description_share_a_vertex() {
        let snapshot = RuntimeSnapshot::new()
            .with_component(
                "Factory",
                vec![
                    config(5, ComponentState::Active, vec![service_of(10, "B")]),
                    config(6, ComponentState::Active, vec![service_of(11, "C")]),
                ],
            )
            .with_component("B", vec![config(2, ComponentState::Active, vec![])])
            .with_component("C", vec![config(3, ComponentState::Active, vec![])]);

        let graph = build_graph(&SnapshotDirectory::new(snapshot), false).unwrap();

        assert_eq!(graph.vertex_count(), 3);
        let factory = graph.vertex(&active("Factory", 0)).unwrap();
        assert_eq!(factory.label(), "Factory [5]");
        assert!(graph.contains_edge(factory, &active("B", 2)));
        assert!(graph.contains_edge(factory, &active("C", 3)));
    }

    #[test]
    fn configuration_vanishing_between_passes_keeps_bare_vertex() {
        let directory = MockDirectory::new()
            .component_revisions(
                "A",
                vec![
                    vec![config(1, ComponentState::Active, vec![service_of(10, "B")])],
                    vec![],
                ],
            )
            .component("B", vec![config(2, ComponentState::Active, vec![])]);

        let graph = build_graph(&directory, false).unwrap();

        assert_eq!(graph.vertex_count(), 2);
        assert_eq!(graph.edge_count(), 0);
        assert_eq!(directory.reads_of("A"), 2);
    }

    #[test]
    fn edges_read_from_second_pass() {
        let directory = MockDirectory::new()
            .component_revisions(
                "A",
                vec![
                    vec![config(1, ComponentState::Active, vec![])],
                    vec![config(1, ComponentState::Active, vec![service_of(10, "B")])],
                ],
            )
            .component("B", vec![config(2, ComponentState::Active, vec![])]);

        let graph = build_graph(&directory, false).unwrap();

        assert!(graph.contains_edge(&active("A", 1), &active("B", 2)));
    }

    #[test]
    fn directory_failure_propagates() {
        let directory = MockDirectory::new()
            .component("A", vec![])
            .unavailable("runtime stopped");

        let err = build_graph(&directory, false).unwrap_err();
        assert!(matches!(err, Error::Directory(ref m) if m == "runtime stopped"));
    }

    #[test]
    fn configuration_failure_propagates() {
        let directory = MockDirectory::new()
            .component("A", vec![config(1, ComponentState::Active, vec![])])
            .failing_component("A");

        let err = build_graph(&directory, false).unwrap_err();
        assert!(matches!(err, Error::Directory(_)));
    }

    #[test]
    fn repeated_builds_are_equal() {
        let snapshot = RuntimeSnapshot::new()
            .with_component("A", vec![config(1, ComponentState::Active, vec![service_of(10, "B")])])
            .with_component("B", vec![config(2, ComponentState::Active, vec![service_of(11, "A")])]);
        let directory = SnapshotDirectory::new(snapshot);

        assert_eq!(
            build_graph(&directory, true).unwrap(),
            build_graph(&directory, true).unwrap()
        );
    }
}
