//! Bests command: fastest finish at each standard distance.

use std::fmt::Write as _;
use std::io::Write;

use anyhow::{Context, Result};
use clap::Args;
use rl_core::NormalizedRecord;
use rl_core::format::{format_duration, format_pace};
use rl_core::stats::{self, PersonalBest};
use serde::Serialize;

use crate::Config;
use crate::input::InputArgs;

#[derive(Debug, Clone, Default, Args)]
pub struct BestsArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Output as JSON.
    #[arg(long)]
    pub json: bool,
}

/// JSON row for one personal best.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct BestRow<'a> {
    distance: &'a str,
    time: String,
    pace: String,
    event: &'a str,
    date: &'a str,
    id: &'a str,
}

impl<'a> From<&PersonalBest<'a>> for BestRow<'a> {
    fn from(best: &PersonalBest<'a>) -> Self {
        let record = best.record;
        Self {
            distance: best.category.label(),
            time: format_duration(record.total_minutes),
            pace: format_pace(record.pace_seconds),
            event: &record.raw.event,
            date: &record.raw.date,
            id: record.id.as_str(),
        }
    }
}

pub fn format_bests(bests: &[PersonalBest<'_>]) -> String {
    let mut output = String::new();
    if bests.is_empty() {
        writeln!(output, "No timed races recorded.").unwrap();
        return output;
    }

    writeln!(output, "PERSONAL BESTS").unwrap();
    writeln!(output, "──────────────").unwrap();
    for best in bests {
        let record = best.record;
        writeln!(
            output,
            "  {:<16} {:>8}  {:>5} /mi  {} ({})",
            best.category.label(),
            format_duration(record.total_minutes),
            format_pace(record.pace_seconds),
            record.raw.event,
            record.raw.date,
        )
        .unwrap();
    }
    output
}

pub fn format_bests_json(bests: &[PersonalBest<'_>]) -> Result<String> {
    let rows: Vec<BestRow<'_>> = bests.iter().map(BestRow::from).collect();
    Ok(serde_json::to_string_pretty(&rows)?)
}

fn load(args: &BestsArgs, config: &Config) -> Result<Vec<NormalizedRecord>> {
    let raw = args.input.load(config)?;
    let normalizer = config
        .normalizer("")
        .context("invalid distance overrides")?;
    Ok(normalizer.normalize(&raw))
}

pub fn run<W: Write>(writer: &mut W, args: &BestsArgs, config: &Config) -> Result<()> {
    let records = load(args, config)?;
    let bests = stats::personal_bests(&records);

    if args.json {
        writeln!(writer, "{}", format_bests_json(&bests)?)?;
    } else {
        write!(writer, "{}", format_bests(&bests))?;
    }
    Ok(())
}
