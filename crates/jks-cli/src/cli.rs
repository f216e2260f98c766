//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Task and activity day planner.
///
/// Lays out logged activities and planned work of a day in side-by-side
/// columns.
#[derive(Debug, Parser)]
#[command(name = "jks", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Pack raw boxes into columns.
    ///
    /// Reads a JSON array of `{"start": .., "duration": ..}` objects and
    /// prints the column of each box.
    Layout {
        /// Input file, or `-` for stdin.
        file: Option<PathBuf>,

        /// Minimum height used for overlap checks (e.g. `0`, `90s`, `15m`).
        #[arg(long, default_value = "0")]
        min_duration: String,
    },

    /// Show the activities and plans of one day.
    Day {
        /// Agenda JSON file, or `-` for stdin. Defaults to the configured agenda.
        file: Option<PathBuf>,

        /// Day to show: YYYY-MM-DD, today, yesterday or tomorrow.
        #[arg(short, long, default_value = "today")]
        date: String,

        /// Minimum block height; overrides the configured value.
        #[arg(long)]
        min_duration: Option<String>,

        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },
}
