//! Summary command: headline totals and breakdowns over the record set.

use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::io::Write;

use anyhow::{Context, Result};
use chrono::Weekday;
use clap::Args;
use rl_core::NormalizedRecord;
use rl_core::format::{format_pace, format_racing_time};
use rl_core::placement::PerformanceTier;
use rl_core::stats::{self, DistanceEquivalents, LabelCount, PaceByDistance, Summary, TierCounts};
use serde::Serialize;

use crate::Config;
use crate::input::InputArgs;

#[derive(Debug, Clone, Default, Args)]
pub struct SummaryArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Output as JSON.
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthCount {
    pub month: String,
    pub races: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeekdayCount {
    pub weekday: String,
    pub races: usize,
}

/// Everything the summary command reports.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryReport {
    pub summary: Summary,
    pub racing_time: String,
    pub unique_cities: usize,
    pub podiums: usize,
    pub favorite_month: Option<MonthCount>,
    pub distance_counts: Vec<LabelCount>,
    pub pace_by_distance: Vec<PaceByDistance>,
    pub races_per_year: BTreeMap<i32, usize>,
    pub miles_per_year: BTreeMap<i32, f64>,
    pub weekdays: Vec<WeekdayCount>,
    pub tiers: TierCounts,
    pub equivalents: DistanceEquivalents,
}

pub fn build_report(records: &[NormalizedRecord]) -> SummaryReport {
    let summary = stats::summarize(records);
    SummaryReport {
        racing_time: format_racing_time(summary.total_minutes),
        equivalents: DistanceEquivalents::from_miles(summary.total_miles),
        summary,
        unique_cities: stats::unique_cities(records),
        podiums: stats::podium_count(records),
        favorite_month: stats::favorite_month(records).map(|(month, races)| MonthCount {
            month: month.name().to_string(),
            races,
        }),
        distance_counts: stats::distance_counts(records),
        pace_by_distance: stats::pace_by_distance(records),
        races_per_year: stats::races_per_year(records),
        miles_per_year: stats::miles_per_year(records),
        weekdays: stats::weekday_counts(records)
            .into_iter()
            .map(|(weekday, races)| WeekdayCount {
                weekday: weekday_name(weekday).to_string(),
                races,
            })
            .collect(),
        tiers: stats::tier_counts(records),
    }
}

const fn weekday_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Mon",
        Weekday::Tue => "Tue",
        Weekday::Wed => "Wed",
        Weekday::Thu => "Thu",
        Weekday::Fri => "Fri",
        Weekday::Sat => "Sat",
        Weekday::Sun => "Sun",
    }
}

fn plural(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("{count} {noun}")
    } else {
        format!("{count} {noun}s")
    }
}

pub fn format_report(report: &SummaryReport) -> String {
    let mut output = String::new();

    if report.summary.total_races == 0 {
        writeln!(output, "No races recorded.").unwrap();
        return output;
    }

    let summary = &report.summary;
    writeln!(output, "RACE SUMMARY").unwrap();
    writeln!(output, "────────────").unwrap();
    writeln!(output, "Races:           {}", summary.total_races).unwrap();
    writeln!(output, "Total miles:     {:.1}", summary.total_miles).unwrap();
    writeln!(output, "Average miles:   {:.1}", summary.average_miles).unwrap();
    let pace = format_pace(summary.average_pace_seconds.unwrap_or_default());
    writeln!(output, "Average pace:    {pace} /mi").unwrap();
    writeln!(output, "Racing time:     {}", report.racing_time).unwrap();
    writeln!(output, "Cities:          {}", report.unique_cities).unwrap();
    writeln!(output, "Podium finishes: {}", report.podiums).unwrap();
    match &report.favorite_month {
        Some(favorite) => writeln!(
            output,
            "Favorite month:  {} ({})",
            favorite.month,
            plural(favorite.races, "race")
        )
        .unwrap(),
        None => writeln!(output, "Favorite month:  --").unwrap(),
    }

    writeln!(output).unwrap();
    writeln!(output, "BY DISTANCE").unwrap();
    writeln!(output, "───────────").unwrap();
    for row in &report.distance_counts {
        writeln!(output, "  {:<16} {}", row.label, row.count).unwrap();
    }

    writeln!(output).unwrap();
    writeln!(output, "PACE BY DISTANCE").unwrap();
    writeln!(output, "────────────────").unwrap();
    if report.pace_by_distance.is_empty() {
        writeln!(output, "  (no paces recorded)").unwrap();
    }
    for row in &report.pace_by_distance {
        writeln!(
            output,
            "  {:<16} {:>5} /mi  ({})",
            row.label,
            format_pace(row.average_pace_seconds),
            plural(row.races, "race")
        )
        .unwrap();
    }

    writeln!(output).unwrap();
    writeln!(output, "BY YEAR").unwrap();
    writeln!(output, "───────").unwrap();
    for (year, races) in &report.races_per_year {
        let miles = report.miles_per_year.get(year).copied().unwrap_or_default();
        writeln!(output, "  {year}  {races:>3}  {miles:>7.1} mi").unwrap();
    }

    writeln!(output).unwrap();
    writeln!(output, "BY WEEKDAY").unwrap();
    writeln!(output, "──────────").unwrap();
    for day in &report.weekdays {
        writeln!(output, "  {}  {}", day.weekday, day.races).unwrap();
    }

    writeln!(output).unwrap();
    writeln!(output, "PERFORMANCE TIERS").unwrap();
    writeln!(output, "─────────────────").unwrap();
    if report.tiers.ranked == 0 {
        writeln!(output, "  (no placements recorded)").unwrap();
    } else {
        for tier in PerformanceTier::ALL {
            let count = report.tiers.tiers.get(&tier).copied().unwrap_or_default();
            writeln!(output, "  {:<10} {count}", tier.label()).unwrap();
        }
        writeln!(output, "  ({} ranked)", plural(report.tiers.ranked, "race")).unwrap();
    }

    let eq = &report.equivalents;
    writeln!(output).unwrap();
    writeln!(output, "DISTANCE EQUIVALENTS").unwrap();
    writeln!(output, "────────────────────").unwrap();
    writeln!(output, "  Marathons:            {:.2}", eq.marathons).unwrap();
    writeln!(output, "  Cross-country trips:  {:.2}", eq.cross_country_trips).unwrap();
    writeln!(output, "  Appalachian Trails:   {:.2}", eq.appalachian_trails).unwrap();
    writeln!(output, "  Trips around Earth:   {:.2}", eq.equators).unwrap();

    output
}

pub fn run<W: Write>(writer: &mut W, args: &SummaryArgs, config: &Config) -> Result<()> {
    let raw = args.input.load(config)?;
    let normalizer = config
        .normalizer("")
        .context("invalid distance overrides")?;
    let records = normalizer.normalize(&raw);
    let report = build_report(&records);

    if args.json {
        writeln!(writer, "{}", serde_json::to_string_pretty(&report)?)?;
    } else {
        write!(writer, "{}", format_report(&report))?;
    }
    Ok(())
}
