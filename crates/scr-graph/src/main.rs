//! scr-graph CLI - Inspect service component dependencies from the command line.
//!
//! Reads a captured runtime snapshot and prints the component dependency
//! graph, or its cycles, as Graphviz DOT or as a plain listing.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing_subscriber::EnvFilter;

mod cli;

/// scr-graph: Service component dependency graphs and cycles.
#[derive(Parser)]
#[command(name = "scr-graph")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Runtime snapshot to inspect (JSON or YAML)
    #[arg(long, global = true)]
    snapshot: Option<PathBuf>,

    /// Configuration file (defaults to ./scr-graph.yaml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Verbose output (can be repeated: -v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the full component dependency graph as DOT
    Graph {
        /// Add vertices for services no known component declares
        #[arg(long)]
        foreign: bool,

        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print dependency cycles
    Cycle {
        /// List cycles one per line instead of DOT
        #[arg(short, long)]
        plain: bool,

        /// Show configuration and service ids instead of labels (plain listing)
        #[arg(short = 'r', long = "ids")]
        ids: bool,

        /// Show only the cycle with this number (0 shows all)
        #[arg(short, long, default_value = "0")]
        serial: usize,

        /// Add vertices for services no known component declares
        #[arg(long)]
        foreign: bool,

        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Logs go to stderr so stdout carries only graph output
    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let working_dir = match std::env::current_dir() {
        Ok(dir) => dir,
        Err(e) => {
            eprintln!(
                "{}: failed to get current directory: {e}",
                "error".red().bold()
            );
            return ExitCode::FAILURE;
        }
    };

    let result = cli::Settings::resolve(cli.config.as_deref(), cli.snapshot, &working_dir)
        .and_then(|settings| match cli.command {
            Commands::Graph { foreign, output } => {
                cli::graph::run(&settings.with_foreign(foreign), output.as_deref())
            }
            Commands::Cycle {
                plain,
                ids,
                serial,
                foreign,
                output,
            } => {
                let settings = settings.with_foreign(foreign).with_listing(plain, ids);
                cli::cycle::run(&settings, serial, output.as_deref())
            }
        });

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}: {e}", "error".red().bold());
            // Show cause chain for nested errors
            let mut source = std::error::Error::source(&e);
            while let Some(cause) = source {
                eprintln!("  {}: {cause}", "caused by".dimmed());
                source = std::error::Error::source(cause);
            }
            ExitCode::FAILURE
        }
    }
}
