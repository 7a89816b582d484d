//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::commands::export::ExportArgs;
use crate::commands::import::ImportArgs;
use crate::commands::log::LogArgs;
use crate::commands::overview::OverviewArgs;
use crate::commands::select::SelectArgs;

/// Service hours tracker.
///
/// Logs monthly hours per service category plus LDC hours, and summarizes
/// them for all time and per service year (September to August).
#[derive(Debug, Parser)]
#[command(name = "hours", version, about, long_about = None)]
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
    /// List service categories.
    Categories,

    /// Select the category general hours are logged against.
    Select(SelectArgs),

    /// Log general or LDC hours for a month.
    Log(LogArgs),

    /// List logged entries.
    Entries,

    /// Show all-time and service-year totals.
    Overview(OverviewArgs),

    /// Write the dataset to a JSON file.
    Export(ExportArgs),

    /// Replace the dataset with a JSON file.
    Import(ImportArgs),

    /// Show where data is stored and whether it loaded cleanly.
    Status,
}
