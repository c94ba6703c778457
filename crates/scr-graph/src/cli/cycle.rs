//! `scr-graph cycle` command implementation.

use std::path::Path;

use colored::Colorize;
use scr_graph::{CycleSelection, select_cycles};

use super::Settings;
use super::output::{write_dot, write_text};

/// Run the cycle command.
pub fn run(settings: &Settings, serial: usize, output: Option<&Path>) -> Result<(), scr_graph::Error> {
    let inspector = settings.open()?;

    let cycles = inspector.find_cycles(settings.include_foreign_references)?;
    let selection = select_cycles(&cycles, serial)?;

    if selection == CycleSelection::NoCycles {
        println!("{}", "No SCR cycle exists".green());
        return Ok(());
    }

    if settings.plain {
        write_text(&selection.render_plain(settings.identifier_only), output)
    } else {
        write_dot(&selection.to_graph(), output)
    }
}
