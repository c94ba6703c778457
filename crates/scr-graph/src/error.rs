//! Error types for scr-graph operations.
//!
//! ## Error Philosophy
//!
//! Graph queries are read-only snapshots of a live runtime, so the library
//! never retries and never swallows a failure:
//! - Collaborator failures (the runtime directory is unavailable) propagate
//! - Output sink failures propagate as [`Error::Export`]
//! - An unknown cycle serial is a user error, reported as
//!   [`Error::CycleOutOfRange`]
//!
//! A dependency that cannot be mapped to a known component is *not* an error.
//! It is skipped (or turned into a foreign vertex when requested), see
//! [`crate::build_graph`].

use std::path::PathBuf;
use thiserror::Error;

/// Result type for scr-graph operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type for scr-graph operations.
#[derive(Debug, Error)]
pub enum Error {
    /// The component directory could not be queried
    #[error("component directory unavailable: {0}")]
    Directory(String),

    /// A runtime snapshot could not be read or decoded
    #[error("invalid snapshot {}: {message}", path.display())]
    Snapshot {
        /// Snapshot file that failed to load
        path: PathBuf,
        /// Decoder message
        message: String,
    },

    /// File system operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Writing a rendered graph to its sink failed
    #[error("failed to export graph: {0}")]
    Export(#[source] std::io::Error),

    /// Invalid configuration or arguments
    #[error("configuration error: {0}")]
    Config(String),

    /// A cycle serial number outside `1..=available` was requested
    #[error("cycle #{requested} does not exist ({available} cycles found)")]
    CycleOutOfRange {
        /// The serial number that was asked for
        requested: usize,
        /// How many cycles exist
        available: usize,
    },
}

impl Error {
    /// Returns `true` if the error was caused by user input rather than by
    /// the runtime or the environment.
    #[must_use]
    pub fn is_user_error(&self) -> bool {
        matches!(self, Self::CycleOutOfRange { .. } | Self::Config(_))
    }
}
