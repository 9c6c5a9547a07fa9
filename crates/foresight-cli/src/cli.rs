//! CLI argument definitions using clap
//!
//! Command implementations live in the `commands` module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Foresight - Learn from test-suite health history
#[derive(Parser)]
#[command(name = "foresight")]
#[command(about = "Pattern mining and predictive insights for test-suite health", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Threshold config file (defaults to the data-dir override, then built-in values)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run a learning pass over a directory of health snapshots
    ///
    /// Every *.json file in the directory is read. A file may hold a single
    /// snapshot object or an array of snapshots.
    Learn {
        /// Directory containing snapshot JSON files
        #[arg(long)]
        history: PathBuf,

        /// Also write the learning model as JSON to this file
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Print the learning model as JSON instead of a summary
        #[arg(long)]
        json: bool,
    },

    /// Fit a least-squares trend to a series of values
    Trend {
        /// Values, oldest first
        #[arg(required = true, allow_negative_numbers = true)]
        values: Vec<f64>,
    },

    /// Show the effective configuration and where it came from
    Config,
}
