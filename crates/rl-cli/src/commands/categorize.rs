//! Categorize command: resolves one event name to a distance category.

use std::fmt::Write as _;
use std::io::Write;

use anyhow::{Context, Result};
use clap::Args;
use rl_core::Categorization;
use rl_core::parse::UNKNOWN_SENTINEL;

use crate::Config;

#[derive(Debug, Clone, Args)]
pub struct CategorizeArgs {
    /// Event name as it appears in the results.
    pub event: String,

    /// Finish time, `H:MM:SS` or `MM:SS`.
    #[arg(long, default_value = UNKNOWN_SENTINEL)]
    pub time: String,

    /// Pace per mile, `M:SS`.
    #[arg(long, default_value = UNKNOWN_SENTINEL)]
    pub pace: String,

    /// Manual category label that overrides detection, e.g. "10K".
    #[arg(long)]
    pub distance_type: Option<String>,

    /// Output as JSON.
    #[arg(long)]
    pub json: bool,
}

pub fn run<W: Write>(writer: &mut W, args: &CategorizeArgs, config: &Config) -> Result<()> {
    let categorizer = config
        .categorizer()
        .context("invalid distance overrides")?;
    let categorization = categorizer.categorize(
        &args.event,
        &args.time,
        &args.pace,
        args.distance_type.as_deref(),
    );

    if args.json {
        writeln!(writer, "{}", serde_json::to_string_pretty(&categorization)?)?;
    } else {
        write!(writer, "{}", format_categorization(&args.event, &categorization))?;
    }
    Ok(())
}

pub fn format_categorization(event: &str, categorization: &Categorization) -> String {
    let mut output = String::new();
    writeln!(output, "Event:    {event}").unwrap();
    writeln!(output, "Label:    {}", categorization.label).unwrap();
    writeln!(output, "Category: {}", categorization.category).unwrap();
    writeln!(output, "Miles:    {}", categorization.distance_miles).unwrap();
    output
}
