//! Common test utilities shared across integration tests.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use scr_graph::{
    COMPONENT_NAME_PROPERTY, ComponentConfiguration, ComponentState, ConfigurationId,
    OBJECT_CLASS_PROPERTY, RuntimeSnapshot, SatisfiedReference, ServiceReference,
};
use serde_json::json;

/// A configuration in `state` with the given references.
pub fn configuration(
    id: i64,
    state: ComponentState,
    references: Vec<SatisfiedReference>,
) -> ComponentConfiguration {
    ComponentConfiguration {
        id: ConfigurationId(id),
        state,
        satisfied_references: references,
    }
}

/// An active configuration with the given references.
pub fn active(id: i64, references: Vec<SatisfiedReference>) -> ComponentConfiguration {
    configuration(id, ComponentState::Active, references)
}

/// A reference bound to services.
pub fn reference(name: &str, services: Vec<ServiceReference>) -> SatisfiedReference {
    SatisfiedReference {
        name: name.to_string(),
        bound_services: services,
    }
}

/// A service registered by the named component.
pub fn component_service(service_id: i64, component: &str) -> ServiceReference {
    ServiceReference::new(service_id).with_property(COMPONENT_NAME_PROPERTY, json!(component))
}

/// A service registered outside any component.
pub fn plain_service(service_id: i64, class_name: &str) -> ServiceReference {
    ServiceReference::new(service_id).with_property(OBJECT_CLASS_PROPERTY, json!([class_name]))
}

/// A → B → C → A, plus D depending on A and a foreign logging service.
pub fn sample_runtime() -> RuntimeSnapshot {
    RuntimeSnapshot::new()
        .with_component(
            "A",
            vec![active(1, vec![reference("b", vec![component_service(20, "B")])])],
        )
        .with_component(
            "B",
            vec![active(2, vec![reference("c", vec![component_service(30, "C")])])],
        )
        .with_component(
            "C",
            vec![configuration(
                3,
                ComponentState::Satisfied,
                vec![reference("a", vec![component_service(10, "A")])],
            )],
        )
        .with_component(
            "D",
            vec![active(
                4,
                vec![
                    reference("a", vec![component_service(10, "A")]),
                    reference("log", vec![plain_service(99, "org.example.Log")]),
                ],
            )],
        )
        .with_component(
            "E",
            vec![configuration(
                5,
                ComponentState::UnsatisfiedReference,
                vec![reference("a", vec![component_service(10, "A")])],
            )],
        )
}

/// A runtime without cycles.
pub fn acyclic_runtime() -> RuntimeSnapshot {
    RuntimeSnapshot::new()
        .with_component(
            "A",
            vec![active(1, vec![reference("b", vec![component_service(20, "B")])])],
        )
        .with_component("B", vec![active(2, vec![])])
}

/// Write `snapshot` as JSON into `dir`.
pub fn write_snapshot(dir: &Path, file_name: &str, snapshot: &RuntimeSnapshot) -> PathBuf {
    let path = dir.join(file_name);
    let content = serde_json::to_string_pretty(snapshot).expect("Failed to encode snapshot");
    std::fs::write(&path, content).expect("Failed to write snapshot");
    path
}

/// Run the scr-graph binary in the specified directory.
pub fn run_scr_graph_in_dir(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_scr-graph"))
        .args(args)
        .current_dir(dir)
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute scr-graph binary")
}
