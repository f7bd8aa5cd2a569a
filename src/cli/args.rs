//! CLI argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Derive C4 architecture views from a system graph
#[derive(Parser, Debug)]
#[command(name = "surveyor")]
#[command(about = "Derive C4 architecture views from a system graph")]
#[command(version)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

impl Args {
    pub fn parse_args() -> Self {
        Parser::parse()
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Derive views from a graph document and write the architecture document
    Draw {
        /// Path to the graph document (JSON)
        graph: PathBuf,

        /// Output file path (defaults to doc/architecture.json)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Config file path
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Rank direction for automatic layout (top-bottom, left-right)
        #[arg(long)]
        direction: Option<String>,

        /// Write compact JSON instead of pretty-printed
        #[arg(long)]
        compact: bool,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Load and project a graph document without writing output
    Check {
        /// Path to the graph document (JSON)
        graph: PathBuf,

        /// Config file path
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Show version information
    Version,
}
