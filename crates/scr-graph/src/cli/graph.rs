//! `scr-graph graph` command implementation.

use std::path::Path;

use super::Settings;
use super::output::write_dot;

/// Run the graph command.
pub fn run(settings: &Settings, output: Option<&Path>) -> Result<(), scr_graph::Error> {
    let inspector = settings.open()?;

    let graph = inspector.build_graph(settings.include_foreign_references)?;

    write_dot(&graph, output)
}
