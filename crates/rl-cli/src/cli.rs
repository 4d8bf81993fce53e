//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::commands::bests::BestsArgs;
use crate::commands::categorize::CategorizeArgs;
use crate::commands::milestones::MilestonesArgs;
use crate::commands::normalize::NormalizeArgs;
use crate::commands::summary::SummaryArgs;

/// Personal race log.
///
/// Normalizes a history of race results into categorized, analyzable records
/// and reports on them.
#[derive(Debug, Parser)]
#[command(name = "rl", version, about, long_about = None)]
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
    /// Print the normalized record set as JSON.
    Normalize(NormalizeArgs),

    /// Categorize a single event name.
    Categorize(CategorizeArgs),

    /// Show totals, distance counts and placement stats.
    Summary(SummaryArgs),

    /// Show the fastest race at each distance.
    Bests(BestsArgs),

    /// Show career milestones, newest first.
    Milestones(MilestonesArgs),
}
