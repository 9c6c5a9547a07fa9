//! Foresight CLI - learning and predictive insights for test-suite health
//!
//! Usage:
//!   foresight learn --history DIR     Learn from a directory of snapshots
//!   foresight trend 90 80 70          Fit a trend to a series of scores
//!   foresight config                  Show the effective thresholds

mod cli;
mod commands;
mod history;


use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact().with_writer(std::io::stderr))
        .init();

    match cli.command {
        Commands::Learn {
            history,
            output,
            json,
        } => commands::cmd_learn(cli.config.as_deref(), &history, output.as_deref(), json),
        Commands::Trend { values } => commands::cmd_trend(cli.config.as_deref(), &values),
        Commands::Config => commands::cmd_config(cli.config.as_deref()),
    }
}
