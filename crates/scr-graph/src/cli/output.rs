//! Where command output goes: stdout, or a file given with `--output`.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use scr_graph::{DependencyGraph, Error, Result};
use tracing::info;

/// Write `graph` as DOT.
pub fn write_dot(graph: &DependencyGraph, target: Option<&Path>) -> Result<()> {
    match target {
        Some(path) => {
            let mut writer = create(path)?;
            scr_graph::export(graph, &mut writer)?;
            info!(path = %path.display(), vertices = graph.vertex_count(), "Wrote DOT file");
            Ok(())
        }
        None => scr_graph::export(graph, &mut io::stdout().lock()),
    }
}

/// Write already rendered text.
pub fn write_text(text: &str, target: Option<&Path>) -> Result<()> {
    let result = match target {
        Some(path) => {
            let mut writer = create(path)?;
            writer.write_all(text.as_bytes()).and_then(|()| writer.flush())
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(text.as_bytes()).and_then(|()| stdout.flush())
        }
    };
    result.map_err(Error::Export)
}

fn create(path: &Path) -> Result<BufWriter<File>> {
    File::create(path).map(BufWriter::new).map_err(Error::Export)
}
