//! Normalize command: prints the canonical record set as JSON.

use std::io::Write;

use anyhow::{Context, Result};
use clap::Args;
use rl_core::NormalizedRecord;
use uuid::Uuid;

use crate::Config;
use crate::input::InputArgs;

#[derive(Debug, Clone, Default, Args)]
pub struct NormalizeArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Synthesize `race-{index}` ids, identical across runs.
    #[arg(long)]
    pub stable_ids: bool,

    /// Pretty-print the JSON output.
    #[arg(long)]
    pub pretty: bool,
}

pub fn run<W: Write>(writer: &mut W, args: &NormalizeArgs, config: &Config) -> Result<()> {
    let raw = args.input.load(config)?;

    let config = Config {
        stable_ids: config.stable_ids || args.stable_ids,
        ..config.clone()
    };
    let token = Uuid::new_v4().simple().to_string();
    let normalizer = config
        .normalizer(&token[..8])
        .context("invalid distance overrides")?;
    let records = normalizer.normalize(&raw);

    writeln!(writer, "{}", format_records_json(&records, args.pretty)?)?;
    Ok(())
}

pub fn format_records_json(records: &[NormalizedRecord], pretty: bool) -> Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(records)?
    } else {
        serde_json::to_string(records)?
    };
    Ok(json)
}
