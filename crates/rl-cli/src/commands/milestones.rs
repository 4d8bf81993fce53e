//! Milestones command: career timeline, newest first.

use std::fmt::Write as _;
use std::io::Write;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::Args;
use rl_core::milestones::{self, Milestone, MilestoneKind};
use serde::Serialize;

use crate::Config;
use crate::input::InputArgs;

#[derive(Debug, Clone, Default, Args)]
pub struct MilestonesArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Output as JSON.
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct MilestoneRow<'a> {
    date: NaiveDate,
    #[serde(flatten)]
    kind: MilestoneKind,
    title: String,
    detail: String,
    race_id: &'a str,
}

pub fn format_milestones(found: &[Milestone<'_>]) -> String {
    let mut output = String::new();
    if found.is_empty() {
        writeln!(output, "No dated races recorded.").unwrap();
        return output;
    }

    writeln!(output, "MILESTONES").unwrap();
    writeln!(output, "──────────").unwrap();
    for milestone in found {
        writeln!(
            output,
            "  {}  {:<24} {}",
            milestone.date,
            milestone.title(),
            milestone.detail()
        )
        .unwrap();
    }
    output
}

pub fn format_milestones_json(found: &[Milestone<'_>]) -> Result<String> {
    let rows: Vec<MilestoneRow<'_>> = found
        .iter()
        .map(|m| MilestoneRow {
            date: m.date,
            kind: m.kind,
            title: m.title(),
            detail: m.detail(),
            race_id: m.record.id.as_str(),
        })
        .collect();
    Ok(serde_json::to_string_pretty(&rows)?)
}

pub fn run<W: Write>(writer: &mut W, args: &MilestonesArgs, config: &Config) -> Result<()> {
    let raw = args.input.load(config)?;
    let normalizer = config
        .normalizer("")
        .context("invalid distance overrides")?;
    let records = normalizer.normalize(&raw);
    let found = milestones::milestones(&records);

    if args.json {
        writeln!(writer, "{}", format_milestones_json(&found)?)?;
    } else {
        write!(writer, "{}", format_milestones(&found))?;
    }
    Ok(())
}
